//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::domain::NodeId;

/// Hierarchical file-node store: assemble, measure, search, render and prune a tree of typed files
#[derive(Parser, Debug)]
#[command(name = "nodetree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Node store file (overrides config and NODETREE_STORE_PATH)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed an empty store with the sample hierarchy
    Init,

    /// List the assembled tree with ids
    Tree {
        /// Start at this node instead of the root
        #[arg(long)]
        root: Option<NodeId>,
    },

    /// Show one node with its attributes
    Show {
        id: NodeId,
    },

    /// Aggregate size of a subtree, with its traversal log
    Size {
        id: NodeId,
    },

    /// Find files by extension (case-insensitive, leading dot optional)
    Search {
        extension: String,
    },

    /// Print the pre-order traversal log of a subtree
    Traverse {
        id: NodeId,
    },

    /// Print the structural serialization of a subtree as XML
    Xml {
        id: NodeId,
    },

    /// Render a subtree (default: whole tree) with box-drawing connectors
    Render {
        id: Option<NodeId>,
    },

    /// Create a directory
    Mkdir {
        name: String,
        /// Parent directory id (omit only for the first, root, node)
        #[arg(short, long)]
        parent: Option<NodeId>,
    },

    /// Create a typed file: word, image or text
    Touch {
        /// File kind: word | image | text
        kind: String,
        name: String,
        /// Size in KB
        #[arg(short, long)]
        size: f64,
        /// Parent directory id
        #[arg(short, long)]
        parent: Option<NodeId>,
        /// Page count (word)
        #[arg(long)]
        pages: Option<u32>,
        /// Width in pixels (image)
        #[arg(long)]
        width: Option<u32>,
        /// Height in pixels (image)
        #[arg(long)]
        height: Option<u32>,
        /// Text encoding (text; default from config)
        #[arg(long)]
        encoding: Option<String>,
    },

    /// Rename a node
    Rename {
        id: NodeId,
        name: String,
    },

    /// Delete a node and everything below it
    Rm {
        id: NodeId,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}
