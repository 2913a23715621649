//! Integration tests for tree editing, export, and the CLI

mod cli_scripts;
mod export_scenarios;
mod support;
mod tree_properties;
mod tree_rules;
