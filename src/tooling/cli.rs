//! CLI Tooling
//!
//! `treeforge run <script>` replays a command script against a fresh session;
//! `treeforge shell` reads the same commands interactively. Rule violations
//! are reported as notices and never stop a script.

use crate::config::{ConfigLoader, ForgeConfig};
use crate::error::{ApiError, SessionError};
use crate::logging::LoggingConfig;
use crate::session::{Command, DragSession, Outcome, Session};
use crate::tooling::format::{format_listing, format_notice, format_outcome};
use crate::tooling::script::{parse_line, DropTarget, ScriptCommand};
use crate::types::NodeKind;
use clap::{Parser, Subcommand};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;
use std::io::Read;
use std::path::PathBuf;
use tracing::{debug, info};

/// Treeforge CLI - sketch a file tree and forge it into a zip archive
#[derive(Parser)]
#[command(name = "treeforge")]
#[command(about = "Build a file/folder tree and export it as a zip archive")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory searched for treeforge.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory archives are written to (overrides export.output_dir)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Logging config with command-line flags applied on top
    pub fn logging_overrides(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut logging = base.clone();
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Execute a command script, one command per line ("-" reads stdin)
    Run {
        /// Script file
        script: PathBuf,
    },
    /// Interactive prompt accepting the script commands
    Shell,
}

/// CLI context: one session plus the drag started by a `drag` line
pub struct CliContext {
    config: ForgeConfig,
    session: Session,
    pending_drag: Option<DragSession>,
    output_dir: PathBuf,
}

impl CliContext {
    /// Create a new CLI context
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self, ApiError> {
        let config = if let Some(cfg_path) = &config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::with_config(config, output_dir))
    }

    /// Context over an already loaded config
    pub fn with_config(config: ForgeConfig, output_dir: Option<PathBuf>) -> Self {
        let output_dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
        Self {
            session: Session::from_config(&config),
            config,
            pending_drag: None,
            output_dir,
        }
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Execute a CLI command
    pub fn execute(&mut self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Run { script } => {
                let text = if script.as_os_str() == "-" {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                } else {
                    std::fs::read_to_string(script)?
                };
                info!(script = %script.display(), "Running script");
                self.run_script(&text)
            }
            Commands::Shell => self.run_shell(),
        }
    }

    /// Run every line of a script. Rule violations become notices in the
    /// output; any other failure stops the script at that line.
    pub fn run_script(&mut self, text: &str) -> Result<String, ApiError> {
        let mut lines = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            match self.execute_line(line_no, line) {
                Ok(out) if out.is_empty() => {}
                Ok(out) => lines.push(out),
                Err(err) if err.is_rule_violation() => lines.push(format_notice(err)),
                Err(ApiError::ScriptError { line, message }) => {
                    return Err(ApiError::ScriptError { line, message })
                }
                Err(err) => {
                    return Err(ApiError::ScriptError {
                        line: line_no,
                        message: err.to_string(),
                    })
                }
            }
        }
        Ok(lines.join("\n"))
    }

    /// Parse and execute one line
    pub fn execute_line(&mut self, line_no: usize, line: &str) -> Result<String, ApiError> {
        let command = parse_line(line).map_err(|message| ApiError::ScriptError {
            line: line_no,
            message,
        })?;
        match command {
            Some(command) => {
                debug!(line = line_no, command = ?command, "Executing");
                self.execute_command(command)
            }
            None => Ok(String::new()),
        }
    }

    fn execute_command(&mut self, command: ScriptCommand) -> Result<String, ApiError> {
        let outcome = match command {
            ScriptCommand::Add(NodeKind::File) => self.session.apply(Command::AddFile)?,
            ScriptCommand::Add(NodeKind::Folder) => self.session.apply(Command::AddFolder)?,
            ScriptCommand::Rename { node, text } => {
                self.session.apply(Command::Rename { node, text })?
            }
            ScriptCommand::Move { node, target } => {
                let drag = self.session.begin_drag(node)?;
                self.release(drag, target)?
            }
            ScriptCommand::Drag(node) => {
                let drag = self.session.begin_drag(node)?;
                let message = format!("Dragging {}", drag.node());
                self.pending_drag = Some(drag);
                return Ok(message);
            }
            ScriptCommand::Drop(target) => {
                let drag = self.pending_drag.take().ok_or(SessionError::NoActiveDrag)?;
                self.release(drag, target)?
            }
            ScriptCommand::Abort => {
                let drag = self.pending_drag.take().ok_or(SessionError::NoActiveDrag)?;
                self.session.apply(Command::AbortDrag(drag))?
            }
            ScriptCommand::Clear => {
                self.pending_drag = None;
                self.session.apply(Command::Clear)?
            }
            ScriptCommand::Show { json: false } => {
                return Ok(self.session.snapshot().render_text().trim_end().to_string())
            }
            ScriptCommand::Show { json: true } => {
                return Ok(serde_json::to_string_pretty(&self.session.snapshot())?)
            }
            ScriptCommand::List => {
                return Ok(format_listing(self.session.tree()).trim_end().to_string())
            }
            ScriptCommand::Export { dir } => {
                let artifact = self.session.export()?;
                let dir = dir.unwrap_or_else(|| self.output_dir.clone());
                artifact.write_to_dir(&dir).map_err(SessionError::from)?;
                Outcome::Exported(artifact)
            }
            ScriptCommand::Check => {
                self.session
                    .tree()
                    .check_invariants()
                    .map_err(SessionError::from)?;
                return Ok(format!(
                    "OK: {} nodes, invariants hold",
                    self.session.tree().len()
                ));
            }
        };
        Ok(format_outcome(&outcome))
    }

    fn release(&mut self, drag: DragSession, target: DropTarget) -> Result<Outcome, SessionError> {
        match target {
            DropTarget::Folder(folder) => self.session.apply(Command::DropOnFolder {
                drag,
                target: folder,
            }),
            DropTarget::Canvas => self.session.apply(Command::DropOnCanvas(drag)),
            DropTarget::Trash => self.session.apply(Command::DropOnTrash(drag)),
        }
    }

    /// Prompt loop; `quit`, `exit` or end of input leaves it
    fn run_shell(&mut self) -> Result<String, ApiError> {
        let theme = ColorfulTheme::default();
        let mut line_no = 0;
        loop {
            let line = match Input::<String>::with_theme(&theme)
                .with_prompt("forge")
                .allow_empty(true)
                .interact_text()
            {
                Ok(line) => line,
                Err(dialoguer::Error::IO(err)) if is_end_of_input(&err) => break,
                Err(dialoguer::Error::IO(err)) => return Err(err.into()),
            };
            line_no += 1;
            let trimmed = line.trim();
            if matches!(trimmed, "quit" | "exit") {
                break;
            }
            match self.execute_line(line_no, trimmed) {
                Ok(out) if out.is_empty() => {}
                Ok(out) => println!("{}", out),
                Err(err) => println!("{}", format_notice(err)),
            }
        }
        Ok(format!(
            "Session ended with {} nodes.",
            self.session.tree().len()
        ))
    }
}

/// Ctrl-D and Ctrl-C end the shell quietly; other terminal errors are faults
fn is_end_of_input(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::UnexpectedEof | std::io::ErrorKind::Interrupted
    )
}
