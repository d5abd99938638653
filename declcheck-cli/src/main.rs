mod render;
mod session;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use declcheck_core::{Stage, analyze};
use tracing::info;

use crate::session::Session;

/// Lexical, syntax and semantic checks for variable declarations.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, global = true, value_enum)]
    log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the stages in order on one source
    Check {
        #[arg(short, long, help = "Source file (reads stdin when omitted)")]
        input: Option<PathBuf>,

        #[arg(short, long, help = "Write the report to a file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(
            long,
            value_enum,
            default_value = "semantic",
            help = "Last stage to run"
        )]
        stage: StageArg,

        #[arg(long, help = "List the tokens of every line after lexical analysis")]
        tokens: bool,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Drive one pipeline stage by stage from a command script
    Session {
        #[arg(short, long, help = "Command script (reads stdin when omitted)")]
        script: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StageArg {
    Lexical,
    Syntax,
    Semantic,
}

impl From<StageArg> for Stage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Lexical => Stage::Lexical,
            StageArg::Syntax => Stage::Syntax,
            StageArg::Semantic => Stage::Semantic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

/// Resolved settings for a `check` run.
#[derive(Debug)]
struct CheckOptions {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    through: Stage,
    show_tokens: bool,
    format: OutputFormat,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet, cli.log, cli.log_format)?;
    execute(cli.command)
}

fn execute(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Check {
            input,
            output,
            stage,
            tokens,
            format,
        } => run_check(CheckOptions {
            input,
            output,
            through: stage.into(),
            show_tokens: tokens,
            format,
        }),
        Commands::Session { script } => {
            let script = read_source(script.as_deref())?;
            let mut session = Session::new();
            session.run_script(&script, &mut io::stdout().lock())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_check(options: CheckOptions) -> Result<ExitCode> {
    let source = read_source(options.input.as_deref())?;
    let report = analyze(&source, options.through);
    info!(
        passed = report.passed.len(),
        success = report.is_success(),
        "analysis finished"
    );

    let mut rendered = Vec::new();
    match options.format {
        OutputFormat::Text => render::write_report(&mut rendered, &report, options.show_tokens)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut rendered, &report)
                .context("failed to serialize report")?;
            rendered.push(b'\n');
        }
    }

    match &options.output {
        Some(path) => write_output(path, &rendered)?,
        None => io::stdout().lock().write_all(&rendered)?,
    }

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_source(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {parent:?}"))?;
        }
    }
    fs::write(path, bytes)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    Ok(())
}

// Logs go to stderr; stdout carries only verdicts and reports.
fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_level: Option<LogLevel>,
    log_format: LogFormat,
) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if let Some(level) = log_level {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true);

    match log_format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(formatter)
            .with(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(formatter.json())
            .with(filter)
            .try_init(),
    }
    .context("failed to install log subscriber")?;

    Ok(())
}
