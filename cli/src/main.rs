//! throttle-replay - run a lemma proposal trace through the throttle.
//!
//! ```text
//! main() -> load policy -> parse_trace() -> Replay::apply() per step
//!                                              |
//!                                              v
//!                               one verdict line per proposal, then stats
//! ```

mod replay;

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use throttle_config::{default_config_path, load_policy};
use throttle_core::ThrottlePolicy;

use replay::{Replay, parse_trace};

#[derive(Parser)]
#[command(name = "throttle-replay")]
#[command(about = "Replay a JSON-lines lemma proposal trace through the throttle")]
struct Cli {
    /// Trace file to replay, or `-` for stdin
    trace: PathBuf,
    /// Throttle config (TOML). Defaults to the user config file if present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print only the final statistics
    #[arg(long)]
    quiet: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries the verdicts; logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn resolve_policy(explicit: Option<PathBuf>) -> Result<ThrottlePolicy> {
    let Some(path) = explicit.or_else(default_config_path) else {
        return Ok(ThrottlePolicy::default());
    };
    let policy = load_policy(&path)
        .with_context(|| format!("loading throttle config {}", path.display()))?;
    tracing::info!(path = %path.display(), promotion = ?policy.promotion(), "Throttle policy loaded");
    Ok(policy)
}

fn open_trace(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file =
        File::open(path).with_context(|| format!("opening trace {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let policy = resolve_policy(cli.config)?;
    let steps = parse_trace(open_trace(&cli.trace)?)
        .with_context(|| format!("parsing trace {}", cli.trace.display()))?;

    let mut replay = Replay::new(policy);
    for (kind, threshold) in replay.policy().thresholds().iter() {
        tracing::debug!(%kind, threshold, "Ban threshold");
    }
    let mut out = io::stdout().lock();
    for step in &steps {
        if let Some(decision) = replay.apply(step)
            && !cli.quiet
        {
            writeln!(out, "{decision}")?;
        }
    }
    if replay.depth() > 0 {
        tracing::debug!(depth = replay.depth(), "Trace ended with open scopes");
    }
    writeln!(out, "{}", replay.into_stats())?;
    Ok(())
}
