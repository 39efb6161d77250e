//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - dispatches to the interactive console or one-shot commands
//! - wires the submission pipeline to the renderer and exporter

use std::collections::HashMap;

use clap::Parser;

use crate::cli::{Command, SubmitArgs};
use crate::data::QaClient;
use crate::error::AppError;
use crate::io::export::export_results;
use crate::render::ResultPanel;

pub mod pipeline;

/// Entry point for the `linqa` binary.
pub fn run() -> Result<(), AppError> {
    // We want `linqa` and `linqa --base-url ...` to behave like `linqa tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing. This preserves a clean clap structure while
    // retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => crate::tui::run(args),
        Command::Submit(args) => handle_submit(args),
        Command::Checks => {
            print!("{}", crate::report::format_checks());
            Ok(())
        }
    }
}

fn handle_submit(args: SubmitArgs) -> Result<(), AppError> {
    let spec = args.check.spec();
    let raw_values = parse_inputs(&args.inputs)?;
    let client = QaClient::from_env(args.base_url);

    let mut panel = ResultPanel::new();
    pipeline::submit_check(&client, spec, &raw_values, &mut panel)?;
    print!("{}", crate::report::format_panel(spec, &panel));

    if let Some(dir) = &args.export {
        let path = export_results(spec, &panel, dir)?;
        println!("Exported {}", path.display());
    }

    Ok(())
}

/// Parse repeated `-i key=value` pairs into raw field text.
///
/// Values are kept verbatim; whether they parse as numbers is the payload
/// builder's concern.
fn parse_inputs(inputs: &[String]) -> Result<HashMap<String, String>, AppError> {
    let mut out = HashMap::new();
    for pair in inputs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(AppError::new(
                1,
                format!("Invalid input '{pair}': expected key=value."),
            ));
        };
        out.insert(key.trim().to_string(), value.to_string());
    }
    Ok(out)
}

/// Rewrite argv so `linqa` defaults to `linqa tui`.
///
/// Rules:
/// - `linqa`                        -> `linqa tui`
/// - `linqa --base-url ...`         -> `linqa tui --base-url ...`
/// - `linqa --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "submit" | "checks");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["linqa"])), argv(&["linqa", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["linqa", "--base-url", "http://qa:5000"])),
            argv(&["linqa", "tui", "--base-url", "http://qa:5000"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["linqa", "submit", "odi"])),
            argv(&["linqa", "submit", "odi"])
        );
        assert_eq!(rewrite_args(argv(&["linqa", "--help"])), argv(&["linqa", "--help"]));
    }

    #[test]
    fn input_pairs_split_on_the_first_equals() {
        let parsed = parse_inputs(&argv(&["set_angle=90", "measured_angle=90.4"])).unwrap();
        assert_eq!(parsed.get("set_angle").unwrap(), "90");
        assert_eq!(parsed.get("measured_angle").unwrap(), "90.4");

        let err = parse_inputs(&argv(&["missing-separator"])).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }
}
