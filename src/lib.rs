//! nodetree: a hierarchical store of directories and typed files
//!
//! A flat collection of nodes, each holding only its parent id, is assembled
//! into a tree on every request. Recursive passes over the tree compute
//! aggregate sizes, search by extension, log traversals, serialize to a
//! labeled element tree and render box-drawing text. Deleting a node removes
//! its whole subtree in one bulk store call.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, CommandService, QueryService};
pub use domain::{DomainError, Node, NodeId, NodeKind, NodeTree};
pub use infrastructure::{InMemoryNodeStore, NodeStore, ServiceContainer, TomlNodeStore};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
