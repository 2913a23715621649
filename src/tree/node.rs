//! Node representation for the virtual directory tree

use crate::depth::DepthGlyphs;
use crate::types::{NodeId, NodeKind};

/// A file or folder in the virtual tree.
///
/// Ownership flows top-down: a folder owns the ids listed in `children`.
/// `parent` is a plain back-reference used for ancestor checks and path
/// building, never for ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) kind: NodeKind,
    pub(crate) name: String,
    /// `None` for files; folders always carry a (possibly empty) list
    pub(crate) children: Option<Vec<NodeId>>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) nesting_level: usize,
    pub(crate) glyphs: DepthGlyphs,
}

impl Node {
    /// Create a detached top-level node with the kind's placeholder name
    pub(crate) fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            name: kind.placeholder().to_string(),
            children: kind.is_folder().then(Vec::new),
            parent: None,
            nesting_level: 0,
            glyphs: DepthGlyphs::for_level(0),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Children in insertion order; `None` for files
    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn nesting_level(&self) -> usize {
        self.nesting_level
    }

    pub fn glyphs(&self) -> &DepthGlyphs {
        &self.glyphs
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// True while the node still holds its kind's default name
    pub fn has_placeholder_name(&self) -> bool {
        self.kind.is_placeholder(&self.name)
    }
}
