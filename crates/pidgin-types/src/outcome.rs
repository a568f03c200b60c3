use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::segment::CustomToolUrl;

/// Successful result of encoding a segment list into pidgin.
///
/// Besides the text itself the encoder reports the side-channel signals it
/// picked up from tool segments, so the caller can switch on the matching
/// capabilities before invoking the model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PidginText {
    pub text: String,
    pub use_memory: bool,
    pub use_notebooklm: bool,
    pub custom_tool_urls: Vec<CustomToolUrl>,
}

/// Wire form of an engine result: either the success value's own fields,
/// or a lone `{"error": "..."}` object. Never both.
///
/// `Err` is listed first so that untagged deserialization does not mistake
/// an error object for a success value whose fields all have defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Err { error: String },
    Ok(T),
}

impl<T, E: Display> From<Result<T, E>> for Outcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::Err {
                error: e.to_string(),
            },
        }
    }
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}
