//! Renderer-facing snapshot of the tree

use crate::depth::{Padding, DEPTH_BAR};
use crate::tree::TreeModel;
use crate::types::{NodeId, NodeKind};
use serde::Serialize;

/// Columns per renderer padding unit when drawing as text
const UNITS_PER_COLUMN: u16 = 6;

/// Everything a renderer needs to draw one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: String,
    pub nesting_level: usize,
    pub depth_column: String,
    pub depth_padding: Padding,
    pub connector: String,
    pub connector_padding: Padding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NodeSnapshot>>,
}

/// Immutable copy of the canvas, top-level nodes first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TreeSnapshot {
    pub nodes: Vec<NodeSnapshot>,
}

impl TreeSnapshot {
    pub fn capture(tree: &TreeModel) -> Self {
        Self {
            nodes: tree
                .top_level()
                .iter()
                .filter_map(|&id| capture_node(tree, id))
                .collect(),
        }
    }

    /// Draw the tree as text lines using each node's glyphs
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            render_node(node, &mut out);
        }
        out
    }
}

fn capture_node(tree: &TreeModel, id: NodeId) -> Option<NodeSnapshot> {
    let node = tree.get(id)?;
    let glyphs = node.glyphs();
    Some(NodeSnapshot {
        id,
        kind: node.kind(),
        name: node.name().to_string(),
        nesting_level: node.nesting_level(),
        depth_column: glyphs.depth_column(),
        depth_padding: glyphs.depth_padding(),
        connector: glyphs.connector().to_string(),
        connector_padding: glyphs.connector_padding(),
        children: node.children().map(|children| {
            children
                .iter()
                .filter_map(|&child| capture_node(tree, child))
                .collect()
        }),
    })
}

fn columns(units: u16) -> usize {
    usize::from(units.div_ceil(UNITS_PER_COLUMN))
}

fn render_node(node: &NodeSnapshot, out: &mut String) {
    let bar_count = node.depth_column.chars().count();
    for _ in 0..bar_count {
        out.push_str(&" ".repeat(columns(node.depth_padding.left)));
        out.push_str(DEPTH_BAR);
        out.push_str(&" ".repeat(columns(node.depth_padding.right)));
    }
    if !node.connector.is_empty() {
        out.push_str(&" ".repeat(columns(node.connector_padding.left)));
        out.push_str(&node.connector);
        out.push_str(&" ".repeat(columns(node.connector_padding.right)));
    }
    let suffix = if node.kind.is_folder() { "/" } else { "" };
    out.push_str(&format!("{}{} ({})\n", node.name, suffix, node.id));

    for child in node.children.iter().flatten() {
        render_node(child, out);
    }
}
