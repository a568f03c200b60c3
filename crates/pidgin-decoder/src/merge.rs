use pidgin_types::Part;

/// Fold each run of consecutive pure text parts into one part, joining the
/// texts with `\n`.
///
/// Any other part, including a text part with extra keys, ends the run and
/// is kept as is. Order is preserved and the result has no two adjacent
/// pure text parts, so merging twice is the same as merging once.
///
/// ```rust
/// use pidgin_decoder::merge_text_parts;
/// use pidgin_types::Part;
///
/// let merged = merge_text_parts(vec![
///     Part::text("a"),
///     Part::text("b"),
///     Part::inline_data("image/png", "x"),
///     Part::text("c"),
/// ]);
/// assert_eq!(
///     merged,
///     vec![
///         Part::text("a\nb"),
///         Part::inline_data("image/png", "x"),
///         Part::text("c"),
///     ]
/// );
/// ```
#[must_use]
pub fn merge_text_parts(parts: Vec<Part>) -> Vec<Part> {
    let mut merged: Vec<Part> = Vec::with_capacity(parts.len());
    for part in parts {
        if let (Some(Part::Text { text: run }), Part::Text { text }) = (merged.last_mut(), &part) {
            run.push('\n');
            run.push_str(text);
            continue;
        }
        merged.push(part);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_stays_empty() {
        assert!(merge_text_parts(Vec::new()).is_empty());
    }

    #[test]
    fn consecutive_text_is_joined_with_newline() {
        let merged = merge_text_parts(vec![Part::text("a"), Part::text("b"), Part::text("c")]);
        assert_eq!(merged, vec![Part::text("a\nb\nc")]);
    }

    #[test]
    fn data_parts_are_boundaries() {
        let image = Part::inline_data("image/png", "x");
        let merged = merge_text_parts(vec![Part::text("a"), image.clone(), Part::text("b")]);
        assert_eq!(merged, vec![Part::text("a"), image, Part::text("b")]);
    }

    #[test]
    fn text_with_extra_keys_is_not_merged() {
        let annotated: Part = serde_json::from_value(json!({"text": "t", "thought": true})).unwrap();
        let merged = merge_text_parts(vec![Part::text("a"), annotated.clone(), Part::text("b")]);
        assert_eq!(merged, vec![Part::text("a"), annotated, Part::text("b")]);
    }

    #[test]
    fn merging_is_idempotent() {
        let parts = vec![
            Part::text("a"),
            Part::text("b"),
            Part::stored_data("gs://bucket/x", "application/pdf"),
            Part::text("c"),
            Part::text(""),
        ];
        let once = merge_text_parts(parts);
        let twice = merge_text_parts(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }
}
