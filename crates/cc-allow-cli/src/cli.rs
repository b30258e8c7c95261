//! Command-line surface (§6 "CLI"): `cc-allow [--config PATH] [--debug]`
//! reads a hook invocation from stdin and exits; `--version`/`--check`
//! short-circuit that and report instead of evaluating.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "cc-allow")]
#[command(about = "Permission-decision engine for a PreToolUse hook", version)]
pub struct Cli {
    /// Explicit config file, layered on top of the discovered stack
    /// (§6 "Config file layout").
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit a structured trace of config loading and rule evaluation to
    /// stderr in addition to the normal exit-code decision.
    #[arg(long)]
    pub debug: bool,

    /// Load the config stack, report any validation errors, and exit
    /// without reading stdin or evaluating a tool call.
    #[arg(long)]
    pub check: bool,
}

#[cfg(test)]
#[path = "cli.test.rs"]
mod tests;
