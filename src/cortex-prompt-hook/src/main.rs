//! Cortex prompt hook - `UserPromptSubmit` hook binary.
//!
//! Reads the hook input from stdin, writes the composed context to stdout and
//! appends one entry to the session log. Diagnostics go to stderr only.

use std::io::{self, Read, Write};
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cortex_prompt_flags::{HookInput, PromptFlagsConfig, SystemEnvironment, help, run_hook};

/// Environment variable holding a tracing filter; overrides `--log-level`.
const LOG_FILTER_ENV: &str = "CORTEX_PROMPT_FLAGS_LOG";

/// Cortex prompt flag hook
#[derive(Parser)]
#[command(name = "cortex-prompt-hook")]
#[command(about = "Expands trailing prompt flags (-u, -test, ...) into assistant context")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "CORTEX_PROMPT_FLAGS_CONFIG")]
    config: Option<PathBuf>,

    /// Session log directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Do not write the session log
    #[arg(long)]
    no_log: bool,

    /// Diagnostic log filter, written to stderr
    #[arg(long, default_value = "off")]
    log_level: String,

    /// Print every flag and exit
    #[arg(long)]
    list_flags: bool,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Report panics in the hook error format instead of the default message.
fn install_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        eprintln!("[Hook Error: {message}]");
    }));
}

fn resolve_config(args: &Args) -> Result<PromptFlagsConfig> {
    let mut config = PromptFlagsConfig::resolve(args.config.as_deref())
        .context("failed to load prompt flag configuration")?;

    if let Some(dir) = &args.log_dir {
        config.logging.dir = Some(dir.clone());
    }
    if args.no_log {
        config.logging.enabled = false;
    }
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    if args.list_flags {
        let mut listing = help::flag_listing();
        if !listing.ends_with('\n') {
            listing.push('\n');
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(listing.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    let config = resolve_config(&args)?;

    let mut raw = Vec::new();
    io::stdin()
        .read_to_end(&mut raw)
        .context("failed to read hook input")?;
    let input = HookInput::parse_bytes(&raw);

    let working_dir = match input.working_dir() {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to determine working directory")?,
    };
    debug!(
        session_id = %input.session_id,
        working_dir = %working_dir.display(),
        "processing prompt"
    );
    let environment =
        SystemEnvironment::new(working_dir).with_git_timeout(config.context.git_timeout());

    let mut stdout = io::stdout().lock();
    let composition = run_hook(&input, &config, environment, &mut stdout)
        .context("failed to write context")?;

    debug!(
        applied = ?composition.applied_flags,
        fragments = composition.fragments.len(),
        "prompt processed"
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(&args.log_level);
    install_panic_hook();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[Hook Error: {e:#}]");
            ExitCode::FAILURE
        }
    }
}
