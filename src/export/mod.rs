//! Archive Exporter
//!
//! Walks the export root and flattens it into archive entries. Validation of
//! the root happens before the walk, so a failed export never yields a
//! partial entry list. Exporting never mutates the tree.

mod zip_writer;

pub use zip_writer::ZipArchiveWriter;

use crate::config::ExportConfig;
use crate::error::{ExportError, TreeError};
use crate::tree::TreeModel;
use crate::types::{NodeId, NodeKind};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One entry handed to the archive writer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// `/`-joined path starting at the root folder's name, without trailing slash
    pub path: String,
    pub is_directory: bool,
    pub content: Vec<u8>,
}

impl ArchiveEntry {
    pub fn directory(path: String) -> Self {
        Self {
            path,
            is_directory: true,
            content: Vec::new(),
        }
    }

    /// Files are always zero-byte placeholders
    pub fn empty_file(path: String) -> Self {
        Self {
            path,
            is_directory: false,
            content: Vec::new(),
        }
    }
}

/// Validated export: the root and its flattened entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPlan {
    pub root: NodeId,
    pub root_name: String,
    pub entries: Vec<ArchiveEntry>,
}

impl ExportPlan {
    /// File name the archive is offered under: `<rootName>.zip`
    pub fn archive_name(&self) -> String {
        format!("{}.zip", self.root_name)
    }
}

/// Consumes a flat entry list and produces an archive blob.
pub trait ArchiveWriter {
    fn write_archive(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ExportError>;
}

/// Root selection and content thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub min_root_children: usize,
    pub require_single_root: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            min_root_children: 2,
            require_single_root: false,
        }
    }
}

impl From<&ExportConfig> for ExportOptions {
    fn from(config: &ExportConfig) -> Self {
        Self {
            min_root_children: config.min_root_children,
            require_single_root: config.require_single_root,
        }
    }
}

/// Read-only exporter over one tree
pub struct ArchiveExporter<'a> {
    tree: &'a TreeModel,
    options: ExportOptions,
}

impl<'a> ArchiveExporter<'a> {
    pub fn new(tree: &'a TreeModel, options: ExportOptions) -> Self {
        Self { tree, options }
    }

    /// The first top-level folder in canvas order
    pub fn select_root(&self) -> Result<NodeId, ExportError> {
        let folders: Vec<NodeId> = self
            .tree
            .top_level()
            .iter()
            .copied()
            .filter(|&id| self.tree.get(id).is_some_and(|n| n.is_folder()))
            .collect();

        match folders.as_slice() {
            [] => Err(ExportError::MissingRoot),
            [root] => Ok(*root),
            [_, ..] if self.options.require_single_root => Err(ExportError::AmbiguousRoot {
                count: folders.len(),
            }),
            [root, ..] => {
                warn!(
                    count = folders.len(),
                    root = %root,
                    "Several top-level folders; exporting the first"
                );
                Ok(*root)
            }
        }
    }

    /// Validate the root and flatten it into entries
    pub fn plan(&self) -> Result<ExportPlan, ExportError> {
        let root = self.select_root()?;
        let root_node = self.tree.node(root).map_err(invariant)?;
        let found = root_node.children().map_or(0, |c| c.len());
        if found < self.options.min_root_children {
            return Err(ExportError::InsufficientContent {
                root: root_node.name().to_string(),
                found,
                required: self.options.min_root_children,
            });
        }

        let mut entries = Vec::new();
        self.visit(root, "", &mut HashSet::new(), &mut entries)?;
        Ok(ExportPlan {
            root,
            root_name: root_node.name().to_string(),
            entries,
        })
    }

    /// Validate, flatten and hand the entries to `writer`
    pub fn export(&self, writer: &dyn ArchiveWriter) -> Result<ExportArtifact, ExportError> {
        let plan = self.plan()?;
        let bytes = writer.write_archive(&plan.entries)?;
        Ok(ExportArtifact {
            file_name: plan.archive_name(),
            plan,
            bytes,
        })
    }

    /// Emit `folder`'s directory entry, then its children in insertion order.
    /// Placeholder siblings can share a path; each path is emitted once and
    /// same-named folders merge.
    fn visit(
        &self,
        folder: NodeId,
        base_path: &str,
        seen: &mut HashSet<String>,
        entries: &mut Vec<ArchiveEntry>,
    ) -> Result<(), ExportError> {
        let node = self.tree.node(folder).map_err(invariant)?;
        let path = if base_path.is_empty() {
            node.name().to_string()
        } else {
            format!("{}/{}", base_path, node.name())
        };
        if seen.insert(path.clone()) {
            entries.push(ArchiveEntry::directory(path.clone()));
        }

        for &child in self.tree.children(folder) {
            let child_node = self.tree.node(child).map_err(invariant)?;
            match child_node.kind() {
                NodeKind::File => {
                    let file_path = format!("{}/{}", path, child_node.name());
                    if seen.insert(file_path.clone()) {
                        entries.push(ArchiveEntry::empty_file(file_path));
                    } else {
                        debug!(path = %file_path, "Skipping repeated archive path");
                    }
                }
                // Recursion emits the subfolder's own entry, so empty folders survive
                NodeKind::Folder => self.visit(child, &path, seen, entries)?,
            }
        }
        Ok(())
    }
}

fn invariant(err: TreeError) -> ExportError {
    ExportError::Archive(format!("tree changed during export: {}", err))
}

/// Archive produced by an export
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub plan: ExportPlan,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Save as `<dir>/<rootName>.zip`, creating `dir` if needed. Returns the archive path.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!(
            path = %path.display(),
            entries = self.plan.entries.len(),
            bytes = self.bytes.len(),
            "Exported archive"
        );
        Ok(path)
    }
}
