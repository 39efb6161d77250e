//! Command-line parsing for the linac QA console.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the pipeline code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::CheckKind;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "linqa", version, about = "Linac QA console (terminal client for the QA calculation backend)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive console.
    ///
    /// One tab per check; results render into a panel that can be exported
    /// to JSON at any time.
    Tui(TuiArgs),
    /// Submit one check from the command line and print the rendered results.
    Submit(SubmitArgs),
    /// List the registered checks, their endpoints, and their input fields.
    Checks,
}

/// Options for the interactive console.
#[derive(Debug, Parser, Clone)]
pub struct TuiArgs {
    /// Backend base URL (overrides LINQA_BASE_URL).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory for exported result files.
    #[arg(long, value_name = "DIR", default_value = "exports")]
    pub export_dir: PathBuf,

    /// Preference store path (overrides LINQA_PREFS).
    #[arg(long, value_name = "FILE")]
    pub prefs: Option<PathBuf>,
}

/// Options for a one-shot submission.
#[derive(Debug, Parser)]
pub struct SubmitArgs {
    /// Which check to submit.
    #[arg(value_enum)]
    pub check: CheckKind,

    /// Input field, repeatable: -i key=value.
    #[arg(short = 'i', long = "input", value_name = "KEY=VALUE")]
    pub inputs: Vec<String>,

    /// Backend base URL (overrides LINQA_BASE_URL).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Export the rendered results to this directory after printing.
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,
}
