//! Mutation Engine
//!
//! Validates and applies structural changes against the tree model. Every
//! operation checks its preconditions first and only then touches the store,
//! so a rejected operation leaves the tree exactly as it was.

use crate::depth;
use crate::error::TreeError;
use crate::tree::{validate_name, TreeModel};
use crate::types::NodeId;
use tracing::{debug, warn};

/// Stateless validator and executor for reparent and rename.
pub struct MutationEngine;

impl MutationEngine {
    /// Move `node` to the end of `target`'s children, or to the end of the
    /// canvas when `target` is `None`. Returns the node's new nesting level.
    ///
    /// Checks, first failure wins: target is not the node, target is not a
    /// descendant of the node, no non-placeholder sibling at the destination
    /// already holds the node's name.
    pub fn reparent(
        tree: &mut TreeModel,
        node: NodeId,
        target: Option<NodeId>,
    ) -> Result<usize, TreeError> {
        let (kind, name) = {
            let moved = tree.node(node)?;
            (moved.kind(), moved.name().to_string())
        };

        let target_level = match target {
            None => None,
            Some(target_id) => {
                if target_id == node || tree.is_ancestor_of(node, target_id) {
                    debug!(node = %node, target = %target_id, "Rejected cyclic reparent");
                    return Err(TreeError::CyclicReparent {
                        node,
                        target: target_id,
                    });
                }
                let target_node = tree.node(target_id)?;
                if !target_node.is_folder() {
                    return Err(TreeError::NotAFolder(target_id));
                }
                Some(target_node.nesting_level())
            }
        };

        if !kind.is_placeholder(&name) {
            Self::check_collision(tree, node, target, &name)?;
        }

        tree.detach(node)?;
        tree.attach(node, target)?;

        let level = target_level.map_or(0, |level| level + 1);
        depth::propagate_levels(tree, node, level)?;
        depth::recompute_glyphs(tree, node)?;

        debug!(node = %node, level, "Reparented node");
        Ok(level)
    }

    /// Commit an already-normalized name after checking it against the node's
    /// current siblings. On a collision the kind's placeholder is committed
    /// instead and `DuplicateName` is returned. A name that is not a single
    /// path component is refused with `InvalidName` and the node keeps its name.
    pub fn rename(tree: &mut TreeModel, node: NodeId, name: String) -> Result<String, TreeError> {
        let (kind, parent) = {
            let current = tree.node(node)?;
            (current.kind(), current.parent())
        };

        if let Err(err) = validate_name(&name) {
            warn!(node = %node, name = %name, "Rejected invalid name");
            return Err(err);
        }

        if !kind.is_placeholder(&name) {
            if let Err(err) = Self::check_collision(tree, node, parent, &name) {
                warn!(node = %node, name = %name, "Rename collided with a sibling; reverting");
                tree.node_mut(node)?.name = kind.placeholder().to_string();
                return Err(err);
            }
        }

        tree.node_mut(node)?.name = name.clone();
        debug!(node = %node, name = %name, "Renamed node");
        Ok(name)
    }

    /// Fail with `DuplicateName` when a member of `container` other than
    /// `node` already holds `name`. Placeholder names never collide.
    pub fn check_collision(
        tree: &TreeModel,
        node: NodeId,
        container: Option<NodeId>,
        name: &str,
    ) -> Result<(), TreeError> {
        let kind = tree.node(node)?.kind();
        if kind.is_placeholder(name) {
            return Ok(());
        }
        for &member in tree.container(container)? {
            if member == node {
                continue;
            }
            if tree.node(member)?.name() == name {
                return Err(TreeError::DuplicateName {
                    kind,
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}
