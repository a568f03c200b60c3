//! Implementation of `pidgin encode`.
//!
//! Reads a JSON segment list, encodes it against a fresh in-memory store
//! (optionally preloaded with `--mount DIR`) and prints the wire result.
//!
//! # Input format
//!
//! Either a bare array or an object carrying the caller's NotebookLM flag:
//!
//! ```json
//! {
//!   "useNotebooklm": false,
//!   "segments": [
//!     { "type": "text", "text": "Summarize:\n" },
//!     { "type": "asset", "title": "Notes",
//!       "content": { "parts": [{ "text": "Ship on Friday." }] } },
//!     { "type": "tool", "path": "control-flow/routing",
//!       "title": "Reviewer", "instance": "agents/reviewer" }
//!   ]
//! }
//! ```
//!
//! # Output
//!
//! ```text
//! success: {"text": "...", "use_memory": .., "use_notebooklm": .., "custom_tool_urls": [..]}
//! failure: {"error": "Agent: ..."}          (exit code 1)
//! ```
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use pidgin_encoder::{EncoderConfig, PidginEncoder};
use pidgin_types::{ContentStore, Outcome, Segment};
use serde::Deserialize;

use crate::mount::load_store;
use crate::output::write_json;
use crate::{EncodeArgs, EncoderFlags};

// ── Manifest serde types ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Manifest {
    List(Vec<Segment>),
    Wrapped {
        segments: Vec<Segment>,
        #[serde(default, rename = "useNotebooklm")]
        use_notebooklm: bool,
    },
}

impl Manifest {
    pub(crate) fn into_parts(self) -> (Vec<Segment>, bool) {
        match self {
            Self::List(segments) => (segments, false),
            Self::Wrapped {
                segments,
                use_notebooklm,
            } => (segments, use_notebooklm),
        }
    }
}

pub(crate) fn read_manifest(path: &Path) -> Result<Manifest> {
    let src =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    serde_json::from_str(&src)
        .with_context(|| format!("failed to parse segments in {}", path.display()))
}

pub(crate) fn encoder_config(flags: &EncoderFlags, use_notebooklm: bool) -> EncoderConfig {
    EncoderConfig {
        max_inline_chars: flags.max_inline,
        text_as_files: !flags.inline_text,
        use_notebooklm: flags.notebooklm || use_notebooklm,
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Run the `pidgin encode` command.
///
/// # Errors
///
/// Returns an error if the input or mount directory cannot be read, the
/// JSON is not a segment list, or the encoder rejects the segments. In the
/// last case the `{"error"}` object is still printed first.
pub fn run(args: &EncodeArgs) -> Result<()> {
    let (segments, use_notebooklm) = read_manifest(&args.input)?.into_parts();
    let store = load_store(args.mount.as_deref())?;

    let config = encoder_config(&args.encoder, use_notebooklm);
    let outcome = Outcome::from(PidginEncoder::with_config(&store, config).encode(&segments));
    write_json(&outcome, args.output.as_deref())?;

    if args.list_files {
        eprintln!("{}", store.list_files());
    }

    if let Outcome::Err { error } = outcome {
        bail!(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> (Vec<Segment>, bool) {
        serde_json::from_str::<Manifest>(json).unwrap().into_parts()
    }

    #[test]
    fn bare_array_manifest() {
        let (segments, flag) = parse(r#"[{"type": "text", "text": "hi"}]"#);
        assert_eq!(segments, vec![Segment::text("hi")]);
        assert!(!flag);
    }

    #[test]
    fn wrapped_manifest_carries_flag() {
        let (segments, flag) =
            parse(r#"{"useNotebooklm": true, "segments": [{"type": "text", "text": "hi"}]}"#);
        assert_eq!(segments.len(), 1);
        assert!(flag);
    }

    #[test]
    fn flags_map_onto_config() {
        let flags = EncoderFlags {
            max_inline: 10,
            inline_text: true,
            notebooklm: false,
        };
        assert_eq!(
            encoder_config(&flags, true),
            EncoderConfig {
                max_inline_chars: 10,
                text_as_files: false,
                use_notebooklm: true,
            }
        );
    }
}
