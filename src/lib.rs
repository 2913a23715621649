//! Treeforge: File Tree Sketching and Zip Export
//!
//! Sketch a hierarchy of files and folders on a canvas, move nodes around by
//! drag and drop, and forge the result into a zip archive whose layout
//! mirrors the tree. Names are unique among siblings, nesting levels and
//! depth glyphs always match tree position, and exports are validated before
//! any archive entry is produced.

pub mod config;
pub mod depth;
pub mod error;
pub mod export;
pub mod logging;
pub mod mutation;
pub mod session;
pub mod snapshot;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::{ApiError, ExportError, SessionError, TreeError};
pub use session::{Command, DragSession, Outcome, Session};
pub use tree::TreeModel;
pub use types::{NodeId, NodeKind};
