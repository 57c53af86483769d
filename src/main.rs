//! Binary entrypoint for the EconAdmin CLI.
//!
//! Commands:
//! - `init` - write a starter `econadmin.toml`
//! - `run <command...>` - execute one admin command against the configured snapshot
//! - `shell` - read admin commands from stdin until EOF or `quit`
//!
//! Balance changes live only for the lifetime of the process; the snapshot file
//! is never rewritten.
//!
//! See the library crate docs for module-level details: `econadmin::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use econadmin::commands::AdminProcessor;
use econadmin::config::Config;
use econadmin::host::MemoryHost;
use econadmin::logutil::AUDIT_TARGET;

#[derive(Parser)]
#[command(name = "econadmin")]
#[command(about = "Admin toolkit for game server currencies and bank accounts")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "econadmin.toml", global = true)]
    config: String,

    /// Economy snapshot path, overriding `host.snapshot` from the config
    #[arg(short, long, global = true)]
    snapshot: Option<String>,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration file
    Init,
    /// Execute a single admin command, e.g. `run /ea-preview "*Credit"`
    Run {
        /// Command line words
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        line: Vec<String>,
    },
    /// Interactive session reading commands from stdin
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
        }
        Commands::Run { line } => {
            let (processor, mut host) = open_session(&cli.config, cli.snapshot, cli.verbose).await?;
            let line = join_args(&line);
            for reply in processor.handle_line(&mut host, &line)? {
                println!("{}", reply);
            }
        }
        Commands::Shell => {
            let (processor, mut host) = open_session(&cli.config, cli.snapshot, cli.verbose).await?;
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
                    break;
                }
                match processor.handle_line(&mut host, trimmed) {
                    Ok(replies) => {
                        for reply in replies {
                            println!("{}", reply);
                        }
                    }
                    Err(e) => error!("Command failed: {}", e),
                }
            }
            info!("Shell closed; in-memory changes discarded");
        }
    }

    Ok(())
}

/// Load config, start logging and read the economy snapshot.
async fn open_session(
    config_path: &str,
    snapshot: Option<String>,
    verbosity: u8,
) -> Result<(AdminProcessor, MemoryHost)> {
    let config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path).await?
    } else {
        eprintln!("Config file {} not found; using defaults", config_path);
        Config::default()
    };
    init_logging(&Some(config.clone()), verbosity);
    info!("Starting EconAdmin v{}", env!("CARGO_PKG_VERSION"));

    let snapshot = snapshot.unwrap_or_else(|| config.host.snapshot.clone());
    let host = MemoryHost::load(&snapshot).await?;
    Ok((AdminProcessor::new(config.admin), host))
}

/// Re-join shell arguments, quoting any that contain whitespace so multi-word
/// names survive tokenizing.
fn join_args(args: &[String]) -> String {
    args.iter()
        .map(|arg| {
            if arg.contains(char::is_whitespace) && !arg.starts_with('"') {
                format!("\"{}\"", arg)
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Level filters: CLI verbosity overrides the configured level, and audit
/// records always pass whatever the base level is.
fn apply_filters(builder: &mut env_logger::Builder, config: &Option<Config>, verbosity: u8) {
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.logging.level_filter(),
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    builder.filter_module(AUDIT_TARGET, log::LevelFilter::Info.max(base_level));
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    apply_filters(&mut builder, config, verbosity);

    let log_file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.as_ref())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
    let audit_path = config
        .as_ref()
        .and_then(|cfg| cfg.logging.audit_file.clone());

    match log_file {
        Some(f) => {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            // Mirror to the console only when attached to a terminal
            let is_tty = atty::is(atty::Stream::Stderr);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }

                if record.target() == AUDIT_TARGET {
                    append_audit(audit_path.as_deref(), &line);
                }

                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        None => {
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if record.target() == AUDIT_TARGET {
                    append_audit(audit_path.as_deref(), &line);
                }
                writeln!(fmt, "{}", line)
            });
        }
    }
    let _ = builder.try_init();
}

/// Append one formatted line to the audit log, if one is configured.
fn append_audit(path: Option<&str>, line: &str) {
    use std::io::Write;
    let Some(path) = path else {
        return;
    };
    if let Ok(mut af) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
    {
        let _ = writeln!(af, "{}", line);
    }
}
