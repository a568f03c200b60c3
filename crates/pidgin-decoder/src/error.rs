use pidgin_types::StoreError;

/// Errors that can occur while decoding pidgin text.
///
/// The scanner accepts any input, so the only way decoding fails is a
/// `<file>` handle the content store cannot resolve. Like encoding, the
/// decoder collects every such failure before giving up:
///
/// ```text
///   DecodeError
///   └── Unresolved { errors: Vec<StoreError> }   ← one per bad <file> tag
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// One or more `<file>` handles did not resolve. Displays as the fixed
    /// banner followed by every store message, comma-separated.
    #[error("Agent unable to proceed: {}", join(.errors))]
    Unresolved { errors: Vec<StoreError> },
}

fn join(errors: &[StoreError]) -> String {
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
    fn unresolved_lists_every_handle() {
        let err = DecodeError::Unresolved {
            errors: vec![
                StoreError::NotFound {
                    handle: "/mnt/a.txt".into(),
                },
                StoreError::NotFound {
                    handle: "/mnt/b.txt".into(),
                },
            ],
        };
        assert_eq!(
            err.to_string(),
            "Agent unable to proceed: file \"/mnt/a.txt\" not found,file \"/mnt/b.txt\" not found"
        );
    }
}
