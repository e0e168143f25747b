//! JCS Decoder CLI.
//!
//! Reads one JSON document from a file or stdin and reports whether it
//! decodes, or dumps the decoded tree with members in canonical order.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jcs_decoder::{JsonDecoder, Limits};

#[derive(Parser)]
#[command(name = "jcs-decode")]
#[command(about = "Strict JSON decoder for canonicalization", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Reject documents nesting deeper than this many containers.
    #[arg(long, global = true)]
    max_depth: Option<u64>,

    /// Reject documents longer than this many characters.
    #[arg(long, global = true)]
    max_size: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a document and report success or the diagnostic
    Check {
        /// Input file (stdin when omitted)
        path: Option<PathBuf>,
    },

    /// Decode a document and print the tree with canonical member order
    Dump {
        /// Input file (stdin when omitted)
        path: Option<PathBuf>,
    },
}

fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn decode(path: Option<&Path>, limits: Limits) -> Result<JsonDecoder, ExitCode> {
    let text = read_input(path).map_err(|e| {
        eprintln!("error: failed to read input: {}", e);
        ExitCode::from(2)
    })?;

    JsonDecoder::with_limits(&text, limits).map_err(|e| {
        tracing::info!(code = e.code(), offset = e.offset(), "document rejected");
        eprintln!("error: {}", e);
        ExitCode::FAILURE
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let limits = Limits {
        max_input_size: cli.max_size,
        max_nesting_depth: cli.max_depth,
    };
    tracing::debug!(?limits, "resolved decoder limits");

    match cli.command {
        Commands::Check { path } => match decode(path.as_deref(), limits) {
            Ok(_) => {
                println!("ok");
                ExitCode::SUCCESS
            }
            Err(code) => code,
        },
        Commands::Dump { path } => {
            let decoder = match decode(path.as_deref(), limits) {
                Ok(d) => d,
                Err(code) => return code,
            };
            match serde_json::to_string_pretty(decoder.root()) {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}
