use pidgin_types::content_store::ContentStore;
use pidgin_types::{Content, Part};
use pidgin_wire::{Token, tokenize};
use tracing::{debug, warn};

use crate::error::DecodeError;
use crate::merge::merge_text_parts;

/// Pidgin decoder: turns model output back into structured content.
///
/// The decoder is stateless; the content store carries everything that
/// outlives a call. Decoding runs in three steps:
///
/// ```text
///   text ──▶ tokenize ──▶ resolve ──▶ merge ──▶ Content { parts, role: user }
///
///   Text("..")             → text part, verbatim
///   File { src }           → every part store.get(src) returns
///   Link { href, title }   → text part with the trimmed title; href dropped
/// ```
///
/// Only `<file>` and `<a>` are tags to the decoder. A `<content>` block is
/// plain text here, so its inline copy is what comes back.
///
/// # Usage
///
/// ```rust
/// use pidgin_decoder::PidginDecoder;
/// use pidgin_encoder::MemoryContentStore;
/// use pidgin_types::{ContentStore, Part};
///
/// let store = MemoryContentStore::new();
/// store.write("report.md", "# My Report");
///
/// let content =
///     PidginDecoder::decode(r#"See the report: <file src="/mnt/report.md" />"#, &store)
///         .unwrap();
/// assert_eq!(content.parts, vec![Part::text("See the report: \n# My Report")]);
/// ```
pub struct PidginDecoder;

impl PidginDecoder {
    /// Decode `text`, resolving `<file>` handles through `store`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Unresolved`] listing every handle the store
    /// could not resolve. No parts are returned in that case.
    pub fn decode(text: &str, store: &dyn ContentStore) -> Result<Content, DecodeError> {
        let mut parts = Vec::new();
        let mut errors = Vec::new();

        for token in tokenize(text) {
            match token {
                Token::Text(text) => parts.push(Part::text(text)),
                Token::File { src } => match store.get(src) {
                    Ok(resolved) => {
                        debug!(handle = src, parts = resolved.len(), "resolved file");
                        parts.extend(resolved);
                    }
                    Err(err) => {
                        warn!(handle = src, error = %err, "unresolved file");
                        errors.push(err);
                    }
                },
                Token::Link { title, .. } => parts.push(Part::text(title.trim())),
            }
        }

        if !errors.is_empty() {
            return Err(DecodeError::Unresolved { errors });
        }
        Ok(Content::user(merge_text_parts(parts)))
    }
}

/// Decode `text` against `store`. Same as [`PidginDecoder::decode`].
///
/// # Errors
///
/// See [`PidginDecoder::decode`].
pub fn from_pidgin_string(text: &str, store: &dyn ContentStore) -> Result<Content, DecodeError> {
    PidginDecoder::decode(text, store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pidgin_encoder::MemoryContentStore;
    use pidgin_types::Role;

    fn decode(text: &str, store: &MemoryContentStore) -> Content {
        PidginDecoder::decode(text, store).unwrap()
    }

    #[test]
    fn plain_text_passthrough() {
        let store = MemoryContentStore::new();
        let content = decode("hello world", &store);
        assert_eq!(content.parts, vec![Part::text("hello world")]);
        assert_eq!(content.role, Some(Role::User));
    }

    #[test]
    fn resolves_file_tag() {
        let store = MemoryContentStore::new();
        store.write("report.md", "# My Report");
        let content = decode(r#"See the report: <file src="/mnt/report.md" />"#, &store);
        assert_eq!(content.parts, vec![Part::text("See the report: \n# My Report")]);
    }

    #[test]
    fn resolves_multiple_file_tags() {
        let store = MemoryContentStore::new();
        store.write("a.txt", "content A");
        store.write("b.txt", "content B");
        let content = decode(
            r#"First: <file src="/mnt/a.txt" /> Second: <file src="/mnt/b.txt" />"#,
            &store,
        );
        assert_eq!(
            content.parts,
            vec![Part::text("First: \ncontent A\n Second: \ncontent B")]
        );
    }

    #[test]
    fn extracts_link_title() {
        let store = MemoryContentStore::new();
        let content = decode(r#"Go to <a href="/agents/writer">the writer</a> for help"#, &store);
        assert_eq!(content.parts, vec![Part::text("Go to \nthe writer\n for help")]);
    }

    #[test]
    fn link_title_is_trimmed() {
        let store = MemoryContentStore::new();
        let content = decode("<a href=\"/route-1\">\n  Next  \n</a>", &store);
        assert_eq!(content.parts, vec![Part::text("Next")]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let store = MemoryContentStore::new();
        let err = PidginDecoder::decode(r#"<file src="/mnt/nonexistent.txt" />"#, &store)
            .unwrap_err();
        assert!(err.to_string().to_lowercase().contains("unable to proceed"));
    }

    #[test]
    fn every_missing_file_is_reported() {
        let store = MemoryContentStore::new();
        store.write("ok.txt", "fine");
        let err = PidginDecoder::decode(
            r#"<file src="/mnt/x" /><file src="/mnt/ok.txt" /><file src="/mnt/y" />"#,
            &store,
        )
        .unwrap_err();
        let DecodeError::Unresolved { errors } = err;
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn empty_string_has_no_parts() {
        let store = MemoryContentStore::new();
        let content = decode("", &store);
        assert!(content.parts.is_empty());
        assert_eq!(content.role, Some(Role::User));
    }

    #[test]
    fn data_parts_split_text_runs() {
        let store = MemoryContentStore::new();
        let image = Part::inline_data("image/png", "iVBORw0KGgo=");
        let handle = store.add_part(&image).unwrap();
        let content = decode(&format!("before <file src=\"{handle}\" /> after"), &store);
        assert_eq!(
            content.parts,
            vec![Part::text("before "), image, Part::text(" after")]
        );
    }

    #[test]
    fn content_tag_is_carried_as_text() {
        let store = MemoryContentStore::new();
        let text = "<content src=\"/mnt/never-registered.txt\">\nbody</content>";
        assert_eq!(decode(text, &store).parts, vec![Part::text(text)]);
    }

    #[test]
    fn free_function_matches_decoder() {
        let store = MemoryContentStore::new();
        assert_eq!(
            from_pidgin_string("x", &store).unwrap(),
            PidginDecoder::decode("x", &store).unwrap()
        );
    }
}
