//! Implementation of `pidgin decode`.
//!
//! Reads pidgin text from a file, resolves `<file>` tags against the files
//! in `--mount DIR` and prints the decoded content:
//!
//! ```text
//! success: {"parts": [...], "role": "user"}
//! failure: {"error": "Agent unable to proceed: ..."}   (exit code 1)
//! ```
use std::fs;

use anyhow::{Context, Result, bail};
use pidgin_decoder::PidginDecoder;
use pidgin_types::Outcome;

use crate::DecodeArgs;
use crate::mount::load_store;
use crate::output::write_json;

/// Run the `pidgin decode` command.
///
/// # Errors
///
/// Returns an error if the input or mount directory cannot be read, or if
/// a `<file>` handle does not resolve.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let store = load_store(args.mount.as_deref())?;

    let outcome = Outcome::from(PidginDecoder::decode(&text, &store));
    write_json(&outcome, args.output.as_deref())?;

    if let Outcome::Err { error } = outcome {
        bail!(error);
    }
    Ok(())
}
