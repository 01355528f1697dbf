//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod markup;
pub mod render;
pub mod tree;
pub mod walk;

pub use builder::{ParentIndex, TreeAssembler, TreeResult};
pub use entities::*;
pub use error::DomainError;
pub use markup::{element_label, serialize, Element};
pub use render::render;
pub use tree::NodeTree;
pub use walk::{search_by_extension, traversal_log, SearchResult};
