//! Error types for tree mutation, export, sessions, and the CLI.

use crate::types::{NodeId, NodeKind};
use thiserror::Error;

/// Rule violations and lookup failures raised by the tree and mutation engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("A {kind} named '{name}' already exists here")]
    DuplicateName { kind: NodeKind, name: String },

    #[error("Cannot move {node} into itself or one of its descendants ({target})")]
    CyclicReparent { node: NodeId, target: NodeId },

    #[error("'{name}' is not a valid name: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Node {0} is not a folder")]
    NotAFolder(NodeId),

    #[error("Tree invariant violated: {0}")]
    InvariantViolation(String),
}

/// Export failures; all are detected before any archive entry is produced
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Root folder is missing")]
    MissingRoot,

    #[error("Root folder '{root}' must have at least {required} elements (found {found})")]
    InsufficientContent {
        root: String,
        found: usize,
        required: usize,
    },

    #[error("Expected exactly one top-level folder, found {count}")]
    AmbiguousRoot { count: usize },

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => ExportError::Io(e),
            other => ExportError::Archive(other.to_string()),
        }
    }
}

/// Errors raised by the command session
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("A drag of {0} is already in progress")]
    DragInProgress(NodeId),

    #[error("No drag in progress")]
    NoActiveDrag,

    #[error("Drag session does not match the active drag")]
    StaleDrag,

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl SessionError {
    /// True for rule violations the user should be told about and can recover from.
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            SessionError::Tree(TreeError::DuplicateName { .. })
                | SessionError::Tree(TreeError::InvalidName { .. })
                | SessionError::Tree(TreeError::CyclicReparent { .. })
                | SessionError::Export(ExportError::MissingRoot)
                | SessionError::Export(ExportError::InsufficientContent { .. })
                | SessionError::Export(ExportError::AmbiguousRoot { .. })
        )
    }
}

/// Top-level error for the CLI layer
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Line {line}: {message}")]
    ScriptError { line: usize, message: String },

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// True when the error is a recoverable rule violation rather than a fault
    pub fn is_rule_violation(&self) -> bool {
        matches!(self, ApiError::Session(e) if e.is_rule_violation())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
