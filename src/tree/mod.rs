//! Virtual Directory Tree
//!
//! Owns the node store for one canvas. Nodes live in an id-keyed store;
//! structure is expressed through each folder's ordered child list and the
//! canvas's ordered top-level list.

mod name;
mod node;

pub use name::{normalize_name, validate_name};
pub use node::Node;

use crate::error::TreeError;
use crate::mutation::MutationEngine;
use crate::types::{NodeId, NodeKind};
use std::collections::HashMap;
use tracing::debug;

/// The node store plus the implicit top-level canvas
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeModel {
    nodes: HashMap<NodeId, Node>,
    top_level: Vec<NodeId>,
    next_id: u64,
}

impl TreeModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new node at the end of the canvas with its placeholder name
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        self.next_id += 1;
        let id = NodeId(self.next_id);
        self.nodes.insert(id, Node::new(id, kind));
        self.top_level.push(id);
        debug!(node = %id, %kind, "Created node");
        id
    }

    /// Rename a node from raw user text.
    ///
    /// The text is normalized first; uniqueness against current siblings is
    /// enforced by the mutation engine. On a collision the node ends up with
    /// its placeholder name and the error is returned.
    pub fn rename_node(&mut self, id: NodeId, raw: &str) -> Result<String, TreeError> {
        let kind = self.node(id)?.kind;
        let name = normalize_name(raw, kind);
        MutationEngine::rename(self, id, name)
    }

    /// Remove a node and its whole subtree. Returns the number of nodes dropped.
    pub fn delete_node(&mut self, id: NodeId) -> Result<usize, TreeError> {
        self.node(id)?;
        let subtree = self.walk_from(id);
        self.detach(id)?;
        for node_id in &subtree {
            self.nodes.remove(node_id);
        }
        debug!(node = %id, removed = subtree.len(), "Deleted node");
        Ok(subtree.len())
    }

    /// Remove every top-level node and, transitively, their subtrees
    pub fn clear(&mut self) -> usize {
        let removed = self.nodes.len();
        self.nodes.clear();
        self.top_level.clear();
        debug!(removed, "Cleared canvas");
        removed
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a node or return `NodeNotFound`
    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.nodes.get(&id).ok_or(TreeError::NodeNotFound(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(&id).ok_or(TreeError::NodeNotFound(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node; empty for files and unknown ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).and_then(|n| n.children()).unwrap_or(&[])
    }

    pub fn top_level(&self) -> &[NodeId] {
        &self.top_level
    }

    /// The ordered member list of a container: a folder's children, or the
    /// canvas when `container` is `None`.
    pub fn container(&self, container: Option<NodeId>) -> Result<&[NodeId], TreeError> {
        match container {
            None => Ok(&self.top_level),
            Some(id) => self
                .node(id)?
                .children()
                .ok_or(TreeError::NotAFolder(id)),
        }
    }

    /// True when `ancestor` appears on the parent chain above `id`
    pub fn is_ancestor_of(&self, ancestor: NodeId, id: NodeId) -> bool {
        // A chain longer than the store can only come from a corrupted cycle.
        let mut remaining = self.nodes.len();
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            if parent_id == ancestor {
                return true;
            }
            if remaining == 0 {
                return false;
            }
            remaining -= 1;
            current = self.parent(parent_id);
        }
        false
    }

    /// `/`-joined names from the top-level ancestor down to `id`
    pub fn path_of(&self, id: NodeId) -> Result<String, TreeError> {
        let mut components = vec![self.node(id)?.name.clone()];
        let mut current = self.parent(id);
        while let Some(parent_id) = current {
            components.push(self.node(parent_id)?.name.clone());
            current = self.parent(parent_id);
        }
        components.reverse();
        Ok(components.join("/"))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order ids of the subtree rooted at `start` (including `start`)
    pub fn walk_from(&self, start: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(&current) {
                continue;
            }
            out.push(current);
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Pre-order ids of the whole canvas
    pub fn walk(&self) -> Vec<NodeId> {
        self.top_level
            .iter()
            .flat_map(|&id| self.walk_from(id))
            .collect()
    }

    /// Unlink a node from its container. The node keeps its subtree.
    pub(crate) fn detach(&mut self, id: NodeId) -> Result<(), TreeError> {
        let parent = self.node(id)?.parent;
        let members = match parent {
            None => &mut self.top_level,
            Some(parent_id) => self
                .node_mut(parent_id)?
                .children
                .as_mut()
                .ok_or(TreeError::NotAFolder(parent_id))?,
        };
        members.retain(|&member| member != id);
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Append a detached node to the end of a container
    pub(crate) fn attach(&mut self, id: NodeId, container: Option<NodeId>) -> Result<(), TreeError> {
        match container {
            None => self.top_level.push(id),
            Some(parent_id) => self
                .node_mut(parent_id)?
                .children
                .as_mut()
                .ok_or(TreeError::NotAFolder(parent_id))?
                .push(id),
        }
        self.node_mut(id)?.parent = container;
        Ok(())
    }

    /// Verify every structural invariant, reporting the first violation
    pub fn check_invariants(&self) -> Result<(), TreeError> {
        let violation = |msg: String| Err(TreeError::InvariantViolation(msg));

        let reachable = self.walk();
        if reachable.len() != self.nodes.len() {
            return violation(format!(
                "{} nodes stored but {} reachable from the canvas",
                self.nodes.len(),
                reachable.len()
            ));
        }

        for &id in &self.top_level {
            if self.node(id)?.parent.is_some() {
                return violation(format!("top-level node {} has a parent", id));
            }
        }

        for id in reachable {
            let node = self.node(id)?;
            if node.kind.is_file() && node.children.is_some() {
                return violation(format!("file {} has a children container", id));
            }
            if node.kind.is_folder() && node.children.is_none() {
                return violation(format!("folder {} has no children container", id));
            }
            if self.is_ancestor_of(id, id) {
                return violation(format!("node {} is its own ancestor", id));
            }

            let expected_level = match node.parent {
                None => 0,
                Some(parent_id) => self.node(parent_id)?.nesting_level + 1,
            };
            if node.nesting_level != expected_level {
                return violation(format!(
                    "node {} has level {} but expected {}",
                    id, node.nesting_level, expected_level
                ));
            }
            if node.glyphs != crate::depth::DepthGlyphs::for_level(node.nesting_level) {
                return violation(format!("node {} has stale glyphs", id));
            }

            for &child in node.children().unwrap_or(&[]) {
                if self.parent(child) != Some(id) {
                    return violation(format!("child {} does not point back to {}", child, id));
                }
            }
        }

        for container in std::iter::once(None).chain(
            self.nodes
                .values()
                .filter(|n| n.is_folder())
                .map(|n| Some(n.id)),
        ) {
            let members = self.container(container)?;
            // A node holding its own kind's placeholder never collides
            for (i, &a) in members.iter().enumerate() {
                let a = self.node(a)?;
                if a.has_placeholder_name() {
                    continue;
                }
                for &b in &members[i + 1..] {
                    let b = self.node(b)?;
                    if !b.has_placeholder_name() && b.name == a.name {
                        return violation(format!("duplicate sibling name '{}'", a.name));
                    }
                }
            }
        }

        Ok(())
    }
}
