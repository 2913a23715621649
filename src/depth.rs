//! Depth Annotator
//!
//! Derives nesting levels and the depth glyphs a renderer draws in front of
//! each node. Everything here is a pure function of structure; the stored
//! values are a cache that must be refreshed whenever a subtree moves.

use crate::error::TreeError;
use crate::tree::TreeModel;
use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// Vertical bar drawn once per ancestor level above the immediate parent
pub const DEPTH_BAR: &str = "│";
/// Branch marker drawn in front of every nested node
pub const NEST_BAR: &str = "├─";

pub const DEPTH_PADDING: Padding = Padding { left: 2, right: 16 };
pub const NEST_PADDING: Padding = Padding { left: 2, right: 6 };

/// Horizontal padding around a glyph, in renderer units (pixels for a GUI)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Padding {
    pub left: u16,
    pub right: u16,
}

impl Padding {
    pub const ZERO: Padding = Padding { left: 0, right: 0 };
}

/// Rendering data for one node: the depth column and the connector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthGlyphs {
    depth_bars: usize,
    connector: &'static str,
    connector_padding: Padding,
}

impl DepthGlyphs {
    /// Glyphs for a node at nesting level `level`
    pub fn for_level(level: usize) -> Self {
        let connector = if level > 0 { NEST_BAR } else { "" };
        Self {
            depth_bars: level.saturating_sub(1),
            connector,
            // No gutter for top-level nodes
            connector_padding: if connector.is_empty() {
                Padding::ZERO
            } else {
                NEST_PADDING
            },
        }
    }

    /// Number of vertical bars in the depth column
    pub fn depth_bars(&self) -> usize {
        self.depth_bars
    }

    /// The depth column as one string, e.g. `"││"` at level 3
    pub fn depth_column(&self) -> String {
        DEPTH_BAR.repeat(self.depth_bars)
    }

    pub fn depth_padding(&self) -> Padding {
        DEPTH_PADDING
    }

    pub fn connector(&self) -> &'static str {
        self.connector
    }

    pub fn connector_padding(&self) -> Padding {
        self.connector_padding
    }
}

impl Default for DepthGlyphs {
    fn default() -> Self {
        Self::for_level(0)
    }
}

/// Set `node`'s level and cascade `parent + 1` to every descendant, pre-order.
pub fn propagate_levels(tree: &mut TreeModel, node: NodeId, level: usize) -> Result<(), TreeError> {
    tree.node_mut(node)?.nesting_level = level;

    // Collect first; the recursion needs the tree mutably
    let children: Vec<NodeId> = tree.children(node).to_vec();
    for child in children {
        propagate_levels(tree, child, level + 1)?;
    }
    Ok(())
}

/// Rebuild the glyphs of `node` and all of its descendants from their levels.
pub fn recompute_glyphs(tree: &mut TreeModel, node: NodeId) -> Result<(), TreeError> {
    let entry = tree.node_mut(node)?;
    entry.glyphs = DepthGlyphs::for_level(entry.nesting_level);

    let children: Vec<NodeId> = tree.children(node).to_vec();
    for child in children {
        recompute_glyphs(tree, child)?;
    }
    Ok(())
}

/// Recompute levels and glyphs for the whole canvas.
pub fn recompute_all(tree: &mut TreeModel) -> Result<(), TreeError> {
    let top_level = tree.top_level().to_vec();
    for node in top_level {
        propagate_levels(tree, node, 0)?;
        recompute_glyphs(tree, node)?;
    }
    Ok(())
}
