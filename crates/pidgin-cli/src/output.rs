use std::fs;
use std::io::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty-print `value` as JSON to `output`, or to stdout.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    let mut json = serde_json::to_string_pretty(value).context("cannot serialize result")?;
    json.push('\n');
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("cannot write {}", path.display()))
        }
        None => io::stdout()
            .write_all(json.as_bytes())
            .context("cannot write to stdout"),
    }
}
