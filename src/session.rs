//! Command Session
//!
//! The single entry point the input layer talks to. A session owns one tree
//! and turns discrete commands into mutations. Drags are explicit: starting a
//! drag hands back a [`DragSession`] value that must be passed to exactly one
//! drop or abort; nothing is committed until then.

use crate::config::ForgeConfig;
use crate::error::{SessionError, TreeError};
use crate::export::{ArchiveExporter, ArchiveWriter, ExportOptions, ZipArchiveWriter};

pub use crate::export::ExportArtifact;
use crate::mutation::MutationEngine;
use crate::snapshot::TreeSnapshot;
use crate::tree::TreeModel;
use crate::types::{NodeId, NodeKind};
use tracing::{debug, info};

/// Handle for an in-flight drag gesture.
///
/// Deliberately not `Clone`: a drag ends exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct DragSession {
    node: NodeId,
    token: u64,
}

impl DragSession {
    /// The node being dragged
    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Discrete commands emitted by the input layer
#[derive(Debug)]
pub enum Command {
    AddFile,
    AddFolder,
    Rename { node: NodeId, text: String },
    BeginDrag(NodeId),
    DropOnFolder { drag: DragSession, target: NodeId },
    DropOnCanvas(DragSession),
    DropOnTrash(DragSession),
    AbortDrag(DragSession),
    Clear,
    Export,
}

/// What a successful command did
#[derive(Debug)]
pub enum Outcome {
    Created(NodeId),
    Renamed { node: NodeId, name: String },
    DragStarted(DragSession),
    Moved { node: NodeId, level: usize },
    /// Drop onto the node itself or a descendant: silently a no-op
    Ignored,
    DragAborted,
    Deleted { node: NodeId, removed: usize },
    Cleared { removed: usize },
    Exported(ExportArtifact),
}

/// One user's editing session
pub struct Session {
    tree: TreeModel,
    active_drag: Option<(NodeId, u64)>,
    next_token: u64,
    export_options: ExportOptions,
    writer: Box<dyn ArchiveWriter>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ExportOptions::default(), Box::new(ZipArchiveWriter::default()))
    }
}

impl Session {
    pub fn new(export_options: ExportOptions, writer: Box<dyn ArchiveWriter>) -> Self {
        Self {
            tree: TreeModel::new(),
            active_drag: None,
            next_token: 0,
            export_options,
            writer,
        }
    }

    /// Session configured from `[export]`, writing zip archives
    pub fn from_config(config: &ForgeConfig) -> Self {
        Self::new(
            ExportOptions::from(&config.export),
            Box::new(ZipArchiveWriter::new(config.export.compression)),
        )
    }

    pub fn tree(&self) -> &TreeModel {
        &self.tree
    }

    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot::capture(&self.tree)
    }

    /// Node currently being dragged, if any
    pub fn dragging(&self) -> Option<NodeId> {
        self.active_drag.map(|(node, _)| node)
    }

    /// Dispatch one command
    pub fn apply(&mut self, command: Command) -> Result<Outcome, SessionError> {
        match command {
            Command::AddFile => Ok(Outcome::Created(self.add(NodeKind::File))),
            Command::AddFolder => Ok(Outcome::Created(self.add(NodeKind::Folder))),
            Command::Rename { node, text } => {
                let name = self.rename(node, &text)?;
                Ok(Outcome::Renamed { node, name })
            }
            Command::BeginDrag(node) => self.begin_drag(node).map(Outcome::DragStarted),
            Command::DropOnFolder { drag, target } => self.drop_on_folder(drag, target),
            Command::DropOnCanvas(drag) => self.drop_on_canvas(drag),
            Command::DropOnTrash(drag) => {
                let node = drag.node;
                let removed = self.drop_on_trash(drag)?;
                Ok(Outcome::Deleted { node, removed })
            }
            Command::AbortDrag(drag) => {
                self.abort_drag(drag)?;
                Ok(Outcome::DragAborted)
            }
            Command::Clear => Ok(Outcome::Cleared {
                removed: self.clear(),
            }),
            Command::Export => self.export().map(Outcome::Exported),
        }
    }

    pub fn add(&mut self, kind: NodeKind) -> NodeId {
        self.tree.create_node(kind)
    }

    /// Rename from raw text. A collision leaves the placeholder in place and
    /// returns `DuplicateName`.
    pub fn rename(&mut self, node: NodeId, text: &str) -> Result<String, SessionError> {
        Ok(self.tree.rename_node(node, text)?)
    }

    pub fn begin_drag(&mut self, node: NodeId) -> Result<DragSession, SessionError> {
        if let Some((active, _)) = self.active_drag {
            return Err(SessionError::DragInProgress(active));
        }
        self.tree.node(node)?;
        self.next_token += 1;
        self.active_drag = Some((node, self.next_token));
        debug!(node = %node, "Drag started");
        Ok(DragSession {
            node,
            token: self.next_token,
        })
    }

    /// End the drag on a folder. A cyclic target is a silent no-op.
    pub fn drop_on_folder(&mut self, drag: DragSession, target: NodeId) -> Result<Outcome, SessionError> {
        let node = self.finish_drag(drag)?;
        self.reparent(node, Some(target))
    }

    pub fn drop_on_canvas(&mut self, drag: DragSession) -> Result<Outcome, SessionError> {
        let node = self.finish_drag(drag)?;
        self.reparent(node, None)
    }

    /// End the drag on the trash: the node and its subtree are deleted
    pub fn drop_on_trash(&mut self, drag: DragSession) -> Result<usize, SessionError> {
        let node = self.finish_drag(drag)?;
        Ok(self.tree.delete_node(node)?)
    }

    /// End the drag without a drop target; the tree is untouched
    pub fn abort_drag(&mut self, drag: DragSession) -> Result<(), SessionError> {
        let node = self.finish_drag(drag)?;
        debug!(node = %node, "Drag aborted");
        Ok(())
    }

    /// Remove everything from the canvas. Any active drag is cancelled with it.
    pub fn clear(&mut self) -> usize {
        self.active_drag = None;
        self.tree.clear()
    }

    /// Validate, flatten and write the archive. The tree is not modified.
    pub fn export(&self) -> Result<ExportArtifact, SessionError> {
        let artifact =
            ArchiveExporter::new(&self.tree, self.export_options).export(self.writer.as_ref())?;
        info!(
            root = %artifact.plan.root_name,
            entries = artifact.plan.entries.len(),
            "Export ready"
        );
        Ok(artifact)
    }

    fn finish_drag(&mut self, drag: DragSession) -> Result<NodeId, SessionError> {
        match self.active_drag {
            None => Err(SessionError::NoActiveDrag),
            Some((node, token)) if node == drag.node && token == drag.token => {
                self.active_drag = None;
                Ok(node)
            }
            Some(_) => Err(SessionError::StaleDrag),
        }
    }

    fn reparent(&mut self, node: NodeId, target: Option<NodeId>) -> Result<Outcome, SessionError> {
        match MutationEngine::reparent(&mut self.tree, node, target) {
            Ok(level) => Ok(Outcome::Moved { node, level }),
            Err(TreeError::CyclicReparent { .. }) => Ok(Outcome::Ignored),
            Err(err) => Err(err.into()),
        }
    }
}
