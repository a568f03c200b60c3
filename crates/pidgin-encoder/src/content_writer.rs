use pidgin_types::{ContentStore, Part};
use pidgin_wire::tags;
use tracing::{debug, warn};

use crate::config::MAX_INLINE_CHARACTER_LENGTH;

/// Renders the parts of one content block as pidgin fragments.
///
/// Each part becomes one fragment; [`finish`](Self::finish) joins them with
/// a newline. Writing a part never fails:
///
/// ```text
/// ┌─────────────────────────────┬─────────────────────────────────────────┐
/// │ Part                        │ Fragment                                │
/// ├─────────────────────────────┼─────────────────────────────────────────┤
/// │ text, short or !files       │ the text                                │
/// │ text, long and files        │ <content src="H">\nTEXT</content>       │
/// │ stored data, NotebookLM URL │ the URL                                 │
/// │ any other part              │ <file src="H" />                        │
/// └─────────────────────────────┴─────────────────────────────────────────┘
/// ```
///
/// A long text part the store refuses is inlined instead. Any other part
/// the store refuses is dropped, with a log line.
pub struct ContentWriter<'a> {
    store: &'a dyn ContentStore,
    max_inline_chars: usize,
    text_as_files: bool,
    fragments: Vec<String>,
}

impl<'a> ContentWriter<'a> {
    #[must_use]
    pub fn new(store: &'a dyn ContentStore, text_as_files: bool) -> Self {
        Self {
            store,
            max_inline_chars: MAX_INLINE_CHARACTER_LENGTH,
            text_as_files,
            fragments: Vec::new(),
        }
    }

    /// Override the inline threshold, counted in characters.
    #[must_use]
    pub fn max_inline_chars(mut self, max: usize) -> Self {
        self.max_inline_chars = max;
        self
    }

    pub fn write_part(&mut self, part: &Part) -> &mut Self {
        if let Some(text) = part.as_text() {
            let fragment = self.text_fragment(part, text);
            self.fragments.push(fragment);
            return self;
        }

        if let Part::StoredData(stored) = part {
            if stored.is_notebooklm() {
                self.fragments.push(stored.handle.clone());
                return self;
            }
        }

        match self.store.add_part(part) {
            Ok(handle) => self.fragments.push(tags::file(&handle)),
            Err(err) => warn!(error = %err, "dropping part the content store rejected"),
        }
        self
    }

    pub fn write_parts<'p>(&mut self, parts: impl IntoIterator<Item = &'p Part>) -> &mut Self {
        for part in parts {
            self.write_part(part);
        }
        self
    }

    /// Join the fragments written so far.
    #[must_use]
    pub fn finish(self) -> String {
        self.fragments.join("\n")
    }

    fn text_fragment(&self, part: &Part, text: &str) -> String {
        if !self.text_as_files || text.chars().count() <= self.max_inline_chars {
            return text.to_string();
        }
        let text_part;
        let registered = if part.is_pure_text() {
            part
        } else {
            text_part = Part::text(text);
            &text_part
        };
        match self.store.add_part(registered) {
            Ok(handle) => {
                debug!(handle = %handle, chars = text.chars().count(), "filed long text");
                tags::content(&handle, text)
            }
            Err(err) => {
                warn!(error = %err, "content store rejected long text, inlining it");
                text.to_string()
            }
        }
    }
}
