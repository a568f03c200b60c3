//! Pidgin command-line tool: encode segment lists into prompt markup and
//! decode model output back into structured content.
//!
//! # Command overview
//!
//! ```text
//! pidgin <COMMAND> [OPTIONS]
//!
//! Commands:
//!   encode     Encode a JSON segment list into pidgin text
//!   decode     Decode pidgin text against a directory of files
//!   roundtrip  Encode, then decode the result against the same store
//!   help       Print help information
//!
//! Global options:
//!   -v, --verbose    Log store and codec activity to stderr
//!   -h, --help       Print help
//!   -V, --version    Print version
//! ```
//!
//! # Exit codes
//!
//! | Code | Meaning                                            |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | Error (I/O failure, bad JSON, rejected input, ...) |
//!
//! Results go to stdout as JSON. Logs and errors go to stderr.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_decode;
mod cmd_encode;
mod cmd_roundtrip;
mod mount;
mod output;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The pidgin prompt-markup tool.
#[derive(Parser)]
#[command(name = "pidgin", version, about = "Pidgin prompt markup codec")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log store and codec activity (overridden by `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON segment list into pidgin text.
    Encode(EncodeArgs),
    /// Decode pidgin text, resolving file tags against a directory.
    Decode(DecodeArgs),
    /// Encode a segment list, then decode the result.
    Roundtrip(RoundtripArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Encoder settings shared by `encode` and `roundtrip`.
///
/// ```text
/// ┌────────────────┬──────────────────────────────────────────────────┐
/// │ Flag           │ Effect                                           │
/// ├────────────────┼──────────────────────────────────────────────────┤
/// │ --max-inline N │ Longest text part inlined bare (default 1000)    │
/// │ --inline-text  │ Never file long text behind <content>            │
/// │ --notebooklm   │ Start with use_notebooklm = true                 │
/// └────────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct EncoderFlags {
    /// Longest text part, in characters, that is inlined without a
    /// `<content>` wrapper.
    #[arg(long, default_value_t = pidgin_encoder::MAX_INLINE_CHARACTER_LENGTH)]
    pub max_inline: usize,

    /// Inline long text parts instead of filing them in the store.
    #[arg(long)]
    pub inline_text: bool,

    /// Request NotebookLM regardless of the segments.
    #[arg(long)]
    pub notebooklm: bool,
}

/// Arguments for `pidgin encode`.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// JSON file holding a segment array, or `{"segments": [...]}`.
    pub input: PathBuf,

    /// Preload every file in this directory into the store.
    #[arg(long)]
    pub mount: Option<PathBuf>,

    /// Write the JSON result here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the store's file listing to stderr after encoding.
    #[arg(long)]
    pub list_files: bool,

    #[command(flatten)]
    pub encoder: EncoderFlags,
}

/// Arguments for `pidgin decode`.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// File holding the pidgin text to decode.
    pub input: PathBuf,

    /// Directory whose files back `<file src="/mnt/NAME" />` handles.
    #[arg(long)]
    pub mount: Option<PathBuf>,

    /// Write the JSON result here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `pidgin roundtrip`.
#[derive(clap::Args)]
pub struct RoundtripArgs {
    /// JSON file holding a segment array, or `{"segments": [...]}`.
    pub input: PathBuf,

    #[command(flatten)]
    pub encoder: EncoderFlags,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Encode(args) => cmd_encode::run(&args),
        Commands::Decode(args) => cmd_decode::run(&args),
        Commands::Roundtrip(args) => cmd_roundtrip::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
