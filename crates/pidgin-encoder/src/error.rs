/// A single malformed segment found while encoding.
///
/// The encoder never stops at the first bad segment. It collects one of
/// these per offending segment and reports them together in
/// [`EncodeError::Rejected`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SegmentError {
    /// An `asset` segment with no content or an empty part list.
    #[error("Agent: Invalid asset format")]
    InvalidAsset,

    /// An `input` segment with no content or an empty part list.
    #[error("Agent: Invalid input format")]
    InvalidInput,

    /// A routing tool segment without an `instance` to route to.
    #[error("Agent: Malformed route, missing instance param")]
    MissingRouteInstance,

    /// A segment whose `type` the encoder does not know.
    #[error("Unknown segment type: {kind}")]
    UnknownType { kind: String },
}

/// Errors that can occur while encoding segments into pidgin.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   └── Rejected { errors: Vec<SegmentError> }
///         ├── InvalidAsset
///         ├── InvalidInput
///         ├── MissingRouteInstance
///         └── UnknownType { kind }
/// ```
///
/// Registration failures inside a content block are not errors at this
/// level: the offending part is dropped and encoding carries on.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// One or more segments were malformed. Displays as the fixed
    /// `Agent: ` banner followed by every message, comma-separated.
    #[error("Agent: {}", join(.errors))]
    Rejected { errors: Vec<SegmentError> },
}

fn join(errors: &[SegmentError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_joins_messages_with_commas() {
        let err = EncodeError::Rejected {
            errors: vec![
                SegmentError::MissingRouteInstance,
                SegmentError::UnknownType {
                    kind: "video".into(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Agent: Agent: Malformed route, missing instance param,Unknown segment type: video"
        );
    }
}
