//! Implementation of `pidgin roundtrip`.
//!
//! Encodes a segment list and decodes the resulting text against the same
//! store, then prints both halves:
//!
//! ```text
//! {
//!   "encoded": {"text": "...", ...} | {"error": "..."},
//!   "decoded": {"parts": [...], "role": "user"} | {"error": "..."}   (absent if encoding failed)
//! }
//! ```
use anyhow::{Result, bail};
use pidgin_decoder::PidginDecoder;
use pidgin_encoder::{MemoryContentStore, PidginEncoder};
use pidgin_types::{Content, Outcome, PidginText};
use serde::Serialize;

use crate::RoundtripArgs;
use crate::cmd_encode::{encoder_config, read_manifest};
use crate::output::write_json;

#[derive(Serialize)]
struct Roundtrip {
    encoded: Outcome<PidginText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    decoded: Option<Outcome<Content>>,
}

/// Run the `pidgin roundtrip` command.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or if either
/// half of the round trip fails.
pub fn run(args: &RoundtripArgs) -> Result<()> {
    let (segments, use_notebooklm) = read_manifest(&args.input)?.into_parts();
    let store = MemoryContentStore::new();
    let config = encoder_config(&args.encoder, use_notebooklm);

    let report = match PidginEncoder::with_config(&store, config).encode(&segments) {
        Ok(encoded) => {
            let decoded = Outcome::from(PidginDecoder::decode(&encoded.text, &store));
            Roundtrip {
                encoded: Outcome::Ok(encoded),
                decoded: Some(decoded),
            }
        }
        Err(err) => Roundtrip {
            encoded: Outcome::Err {
                error: err.to_string(),
            },
            decoded: None,
        },
    };
    write_json(&report, None)?;

    match report {
        Roundtrip {
            encoded: Outcome::Err { error },
            ..
        }
        | Roundtrip {
            decoded: Some(Outcome::Err { error }),
            ..
        } => bail!(error),
        _ => Ok(()),
    }
}
