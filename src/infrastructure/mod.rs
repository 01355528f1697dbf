//! Infrastructure layer: store implementations and DI container
//!
//! This layer implements the node store boundary and wires up services.

pub mod di;
pub mod error;
pub mod record;
pub mod store;
pub mod traits;

pub use di::ServiceContainer;
pub use error::InfraError;
pub use record::NodeRecord;
pub use store::TomlNodeStore;
pub use traits::{InMemoryNodeStore, NodeStore};
