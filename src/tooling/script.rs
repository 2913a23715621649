//! Line-oriented command language used by `run` and `shell`.
//!
//! One command per line. Lines starting with `#` are comments; inside a
//! command `#3` refers to node 3.

use crate::types::{NodeId, NodeKind};
use std::path::PathBuf;

/// Where a dragged node is released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Folder(NodeId),
    Canvas,
    Trash,
}

/// A parsed script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    Add(NodeKind),
    Rename { node: NodeId, text: String },
    /// Drag and drop in one step
    Move { node: NodeId, target: DropTarget },
    Drag(NodeId),
    Drop(DropTarget),
    Abort,
    Clear,
    Show { json: bool },
    List,
    Export { dir: Option<PathBuf> },
    Check,
}

/// Parse one line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match verb {
        "add" => match args.as_slice() {
            ["file"] => ScriptCommand::Add(NodeKind::File),
            ["folder"] => ScriptCommand::Add(NodeKind::Folder),
            _ => return Err("usage: add file|folder".to_string()),
        },
        "rename" => {
            let (node, text) = match rest.split_once(char::is_whitespace) {
                Some((node, text)) => (node, text),
                None => (rest, ""),
            };
            if node.is_empty() {
                return Err("usage: rename #N <name>".to_string());
            }
            ScriptCommand::Rename {
                node: parse_node_ref(node)?,
                text: text.to_string(),
            }
        }
        "move" => match args.as_slice() {
            [node, target] => ScriptCommand::Move {
                node: parse_node_ref(node)?,
                target: parse_target(target)?,
            },
            _ => return Err("usage: move #N #M|canvas|trash".to_string()),
        },
        "trash" => match args.as_slice() {
            [node] => ScriptCommand::Move {
                node: parse_node_ref(node)?,
                target: DropTarget::Trash,
            },
            _ => return Err("usage: trash #N".to_string()),
        },
        "drag" => match args.as_slice() {
            [node] => ScriptCommand::Drag(parse_node_ref(node)?),
            _ => return Err("usage: drag #N".to_string()),
        },
        "drop" => match args.as_slice() {
            [target] => ScriptCommand::Drop(parse_target(target)?),
            _ => return Err("usage: drop #M|canvas|trash".to_string()),
        },
        "abort" => no_args(&args, ScriptCommand::Abort, "abort")?,
        "clear" => no_args(&args, ScriptCommand::Clear, "clear")?,
        "ls" => no_args(&args, ScriptCommand::List, "ls")?,
        "check" => no_args(&args, ScriptCommand::Check, "check")?,
        "show" => match args.as_slice() {
            [] => ScriptCommand::Show { json: false },
            ["json"] => ScriptCommand::Show { json: true },
            _ => return Err("usage: show [json]".to_string()),
        },
        "export" => ScriptCommand::Export {
            dir: (!rest.is_empty()).then(|| PathBuf::from(rest)),
        },
        other => return Err(format!("unknown command '{}'", other)),
    };
    Ok(Some(command))
}

fn no_args(args: &[&str], command: ScriptCommand, verb: &str) -> Result<ScriptCommand, String> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(format!("'{}' takes no arguments", verb))
    }
}

/// Parse `#N` into a node id
pub fn parse_node_ref(token: &str) -> Result<NodeId, String> {
    token
        .strip_prefix('#')
        .and_then(|digits| digits.parse::<u64>().ok())
        .map(NodeId)
        .ok_or_else(|| format!("expected a node reference like #3, got '{}'", token))
}

fn parse_target(token: &str) -> Result<DropTarget, String> {
    match token {
        "canvas" => Ok(DropTarget::Canvas),
        "trash" => Ok(DropTarget::Trash),
        other => parse_node_ref(other).map(DropTarget::Folder),
    }
}
