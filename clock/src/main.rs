//! Live digital clock for the terminal.
//!
//! Prints the local time as `HH:MM:SS`, rewriting one line in place every
//! tick, optionally followed by the latest commit of a git repository.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use clock::core::time_format::format_time;
use clock::display::{TerminalDisplay, run_display};
use clock::exit_codes;
use clock::io::clock::{Clock, SystemClock};
use clock::io::config::{ClockConfig, DEFAULT_CONFIG_PATH, load_config, write_config};
use clock::io::git::{CommitProbe, CommitSource};
use clock::logging;
use clock::ticker::Ticker;
use tracing::info;

#[derive(Parser)]
#[command(name = "clock", version, about = "Live digital clock")]
struct Cli {
    /// Path to the TOML config (missing file means defaults).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the current time once.
    Now,
    /// Print the latest commit once.
    Commit {
        /// Repository to inspect (defaults to the working directory).
        #[arg(long)]
        repo: Option<PathBuf>,
    },
    /// Show a live clock, updated every tick.
    Watch {
        /// Show the latest commit next to the time.
        #[arg(long)]
        commit: bool,
        /// Stop after this many ticks.
        #[arg(long)]
        ticks: Option<u64>,
        /// Repository to inspect (defaults to the working directory).
        #[arg(long)]
        repo: Option<PathBuf>,
    },
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    match cli.command {
        Command::Init { force } => cmd_init(&cli.config, force),
        Command::Now => cmd_now(),
        Command::Commit { repo } => cmd_commit(&cli.config, repo),
        Command::Watch {
            commit,
            ticks,
            repo,
        } => cmd_watch(&cli.config, commit, ticks, repo),
    }
}

fn cmd_init(path: &Path, force: bool) -> Result<i32> {
    if !force && path.exists() {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    write_config(path, &ClockConfig::default())
        .with_context(|| format!("write {}", path.display()))?;
    println!("{}", path.display());
    Ok(exit_codes::OK)
}

fn cmd_now() -> Result<i32> {
    println!("{}", format_time(&SystemClock.now()));
    Ok(exit_codes::OK)
}

fn cmd_commit(config_path: &Path, repo: Option<PathBuf>) -> Result<i32> {
    let config = load_config(config_path)?;
    let probe = CommitProbe::new(&config.commit, repo);
    match probe.last_commit() {
        Ok(line) => {
            println!("{line}");
            Ok(exit_codes::OK)
        }
        Err(err) => {
            println!("{err}");
            Ok(exit_codes::PROBE_FAILED)
        }
    }
}

fn cmd_watch(
    config_path: &Path,
    commit: bool,
    ticks: Option<u64>,
    repo: Option<PathBuf>,
) -> Result<i32> {
    let mut config = load_config(config_path)?;
    if commit {
        config.commit.enabled = true;
    }

    let source: Option<Box<dyn CommitSource>> = if config.commit.enabled {
        Some(Box::new(CommitProbe::new(&config.commit, repo)))
    } else {
        None
    };
    let ticker = Ticker::new(Box::new(SystemClock), source, config.commit.refresh);

    info!(
        interval_ms = config.tick_interval_ms,
        commit = config.commit.enabled,
        "starting clock"
    );
    let stdout = std::io::stdout();
    let rendered = if stdout.is_terminal() {
        let mut display = TerminalDisplay::styled(stdout.lock(), config.display.rgb()?);
        run_display(&ticker, &mut display, config.tick_interval(), ticks)?
    } else {
        let mut display = TerminalDisplay::plain(stdout.lock());
        run_display(&ticker, &mut display, config.tick_interval(), ticks)?
    };
    info!(rendered, "clock stopped");
    Ok(exit_codes::OK)
}
