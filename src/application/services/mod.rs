//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `NodeStore` boundary trait but are themselves
//! concrete structs, not traits.

mod command;
mod query;

pub use command::CommandService;
pub use query::{QueryService, SizeReport};
