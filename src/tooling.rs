//! Tooling & Integration Layer
//!
//! Command-line front end: the script language, output formatting and the
//! `run`/`shell` commands built on top of [`crate::session::Session`].

pub mod cli;
pub mod format;
pub mod script;

pub use cli::{Cli, CliContext, Commands};
pub use script::{parse_line, DropTarget, ScriptCommand};
