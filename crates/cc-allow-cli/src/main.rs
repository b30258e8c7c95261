//! `cc-allow`: a `PreToolUse` hook binary (§6). Reads one hook
//! invocation from stdin, decides allow/ask/deny, and communicates the
//! result purely through its exit code plus a one-line stderr message.

mod cleanup;
mod cli;
mod discovery;

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use cc_allow_dispatch::HookInput;
use cc_allow_eval::ReputationChecker;
use cc_allow_eval::SafeBrowsingClient;
use cc_allow_eval::TemplateContext;
use cc_allow_pattern::Action;
use cc_allow_pattern::MatchContext;
use cc_allow_pattern::PathVars;

const SAFE_BROWSING_API_KEY_ENV: &str = "GOOGLE_SAFE_BROWSING_API_KEY";
const SESSION_RETENTION: Duration = Duration::from_secs(7 * 24 * 60 * 60);

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.debug);

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let sources = discovery::discover(&cwd, cli.config.as_deref());

    let merged = match discovery::load_and_merge(&sources) {
        Ok(merged) => merged,
        Err(err) => {
            eprintln!("cc-allow: {err}");
            std::process::exit(3);
        }
    };

    if cli.check {
        if merged.config_errors.is_empty() {
            println!("cc-allow: config OK ({} source(s))", sources.len());
            std::process::exit(0);
        } else {
            for err in &merged.config_errors {
                eprintln!("cc-allow: {err}");
            }
            std::process::exit(3);
        }
    }

    cleanup_best_effort();

    let mut input_text = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input_text) {
        eprintln!("cc-allow: failed to read stdin: {err}");
        std::process::exit(3);
    }

    let input: HookInput = match serde_json::from_str(&input_text) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("cc-allow: failed to parse hook input: {err}");
            std::process::exit(3);
        }
    };

    let home = dirs::home_dir();
    let vars = PathVars::new(
        home.clone(),
        discovery::find_project_root(&cwd),
        std::env::var("CLAUDE_PLUGIN_ROOT").ok().map(PathBuf::from),
    );

    if home.is_none() && pattern_references_home(&merged) {
        eprintln!("cc-allow: a configured pattern references $HOME but HOME is unset");
        std::process::exit(1);
    }

    let ctx = MatchContext::new(vars, cwd.clone());

    let reputation: Option<Box<dyn ReputationChecker>> = if merged
        .safe_browsing_enabled
        .cloned_value()
        .unwrap_or(false)
    {
        std::env::var(SAFE_BROWSING_API_KEY_ENV)
            .ok()
            .and_then(|key| SafeBrowsingClient::new(key).ok())
            .map(|client| Box::new(client) as Box<dyn ReputationChecker>)
    } else {
        None
    };

    let verdict = cc_allow_dispatch::dispatch(
        &input,
        &cwd,
        &ctx,
        &merged,
        reputation.as_deref(),
    );

    let message = cc_allow_eval::render(&verdict.message, &template_context(&input));

    if cli.debug {
        tracing::debug!(action = ?verdict.action, source = %verdict.source, "decision");
    }

    match verdict.action {
        Action::Allow => {
            let output = cc_allow_dispatch::HookOutput::default();
            println!("{}", serde_json::to_string(&output).unwrap_or_default());
            std::process::exit(0);
        }
        Action::Ask => {
            eprintln!("{message}");
            std::process::exit(1);
        }
        Action::Deny => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    }
}

fn template_context(input: &HookInput) -> TemplateContext {
    TemplateContext {
        tool: input.tool_name.clone(),
        command: input.tool_input.command.clone().unwrap_or_default(),
        args: input
            .tool_input
            .command
            .as_deref()
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default(),
        file_path: input.tool_input.file_path.clone().unwrap_or_default(),
        target_file_path: String::new(),
        url: input.tool_input.url.clone().unwrap_or_default(),
    }
}

/// A coarse stand-in for "some compiled pattern references $HOME":
/// patterns are opaque once compiled (§4.1), so rather than walking the
/// merged rule set looking for `Pattern::Path` values that mention the
/// variable, this conservatively treats any config-sourced (non-default)
/// bash rule as a potential `$HOME` reference. Only called once the
/// caller has already confirmed `HOME` is unset.
fn pattern_references_home(merged: &cc_allow_config::MergedConfig) -> bool {
    merged.rules.iter().any(|r| r.source != "(default)")
}

fn cleanup_best_effort() {
    if let Some(home) = dirs::home_dir() {
        let session_dir = home.join(".claude").join("cc-allow-sessions");
        cleanup::cleanup_stale_sessions(&session_dir, SESSION_RETENTION);
    }
}

fn init_tracing(debug: bool) {
    let filter = if debug { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .try_init();
}
