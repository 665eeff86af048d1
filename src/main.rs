//! Logbridge CLI - inspect the bridge's event output

use std::io;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use logbridge::{
    install, ActivityKind, BridgeError, BridgeLogger, ErrorInfo, EvalSettings, EventSink,
    HostField, HostLogger, JsonLinesSink, ResultKind, TraceEntry, TracingSink, Verbosity,
};

#[derive(Parser)]
#[command(name = "logbridge")]
#[command(about = "Structured-event bridge for hierarchical evaluator diagnostics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SinkKind {
    /// One JSON object per line on stdout
    Json,
    /// Forward through the tracing subscriber
    Tracing,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive a scripted host session through the bridge
    Demo {
        /// Where finished events are delivered
        #[arg(short, long, value_enum, default_value = "json")]
        sink: SinkKind,
    },

    /// Apply one fetcher setting and report whether the host accepted it
    Settings {
        #[arg(short, long)]
        key: String,

        #[arg(short, long)]
        value: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo { sink } => run_demo(sink),
        Commands::Settings { key, value } => apply_setting(&key, &value),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_demo(sink: SinkKind) -> Result<()> {
    let sink: Arc<dyn EventSink> = match sink {
        SinkKind::Json => Arc::new(JsonLinesSink::new(io::stdout())),
        SinkKind::Tracing => Arc::new(TracingSink::new()),
    };

    let logger = Arc::new(BridgeLogger::new(sink));
    install(logger.clone());

    // A representative host session: a build activity with fields, a log
    // line, a progress result, a stop, and an error with a causal trace.
    logger.log(Verbosity::Info, b"evaluating flake outputs");
    logger.start_activity(
        7,
        Verbosity::Info,
        ActivityKind::Build,
        "building foo",
        &[HostField::Str(b"foo"), HostField::Int(1)],
        0,
    );
    logger.result(
        7,
        ResultKind::Progress,
        &[HostField::Int(1), HostField::Int(4)],
    );
    logger.stop_activity(7);
    logger.log_error(&ErrorInfo {
        level: Verbosity::Error,
        message: "eval failed".to_string(),
        traces: vec![
            TraceEntry {
                hint: "while evaluating x".to_string(),
                pos: "demo.expr:3:2".to_string(),
            },
            TraceEntry {
                hint: "while calling f".to_string(),
                pos: "demo.expr:1:1".to_string(),
            },
        ],
    });

    Ok(())
}

fn apply_setting(key: &str, value: &str) -> Result<()> {
    let mut settings = EvalSettings::new();
    if !settings.set(key, value) {
        return Err(BridgeError::SettingRejected {
            key: key.to_string(),
        }
        .into());
    }
    println!("{} {} = {}", "✓".green(), key, value);
    Ok(())
}
