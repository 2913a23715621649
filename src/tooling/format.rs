//! Format command outcomes, notices and node listings as text.

use crate::session::Outcome;
use crate::tree::TreeModel;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// A rule violation the user should see; the tree is already back in a valid state
pub fn format_notice(message: impl Display) -> String {
    format!("{} {}", "!".yellow().bold(), message)
}

/// One-line description of a successful command
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Created(node) => format!("Created {}", node),
        Outcome::Renamed { node, name } => format!("Renamed {} to '{}'", node, name),
        Outcome::DragStarted(drag) => format!("Dragging {}", drag.node()),
        Outcome::Moved { node, level } => format!("Moved {} (level {})", node, level),
        Outcome::Ignored => String::new(),
        Outcome::DragAborted => "Drag aborted".to_string(),
        Outcome::Deleted { node, removed } => {
            format!("Deleted {} ({} node{})", node, removed, plural(*removed))
        }
        Outcome::Cleared { removed } => {
            format!("Cleared canvas ({} node{})", removed, plural(*removed))
        }
        Outcome::Exported(artifact) => format!(
            "Forged {} ({} entries, {} bytes)",
            artifact.file_name,
            artifact.plan.entries.len(),
            artifact.bytes.len()
        ),
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Table of every node in pre-order
pub fn format_listing(tree: &TreeModel) -> String {
    if tree.is_empty() {
        return "Canvas is empty.\n".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Kind", "Name", "Level", "Path"]);
    for id in tree.walk() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        table.add_row(vec![
            id.to_string(),
            node.kind().to_string(),
            node.name().to_string(),
            node.nesting_level().to_string(),
            tree.path_of(id).unwrap_or_default(),
        ]);
    }
    format!("{}\nTotal: {} nodes.\n", table, tree.len())
}
