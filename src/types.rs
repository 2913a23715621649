//! Core types for the treeforge directory builder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// NodeId: Stable handle of a node within one tree; never reused after deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl NodeId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The kind of a node, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Zero-byte file; never owns children
    File,
    /// Directory; owns an ordered list of children
    Folder,
}

impl NodeKind {
    /// Default name given at creation. Any number of siblings may share it.
    pub const fn placeholder(self) -> &'static str {
        match self {
            NodeKind::File => "new_file",
            NodeKind::Folder => "new_folder",
        }
    }

    pub const fn is_folder(self) -> bool {
        matches!(self, NodeKind::Folder)
    }

    pub const fn is_file(self) -> bool {
        matches!(self, NodeKind::File)
    }

    pub fn is_placeholder(self, name: &str) -> bool {
        name == self.placeholder()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::File => write!(f, "file"),
            NodeKind::Folder => write!(f, "folder"),
        }
    }
}
