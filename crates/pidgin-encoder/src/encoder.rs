use pidgin_types::content_store::ContentStore;
use pidgin_types::segment::ToolKind;
use pidgin_types::{Content, CustomToolUrl, PidginText, Segment, ToolRef};
use pidgin_wire::tags;
use tracing::{debug, warn};

use crate::config::EncoderConfig;
use crate::content_writer::ContentWriter;
use crate::error::{EncodeError, SegmentError};

/// Pidgin encoder: turns an ordered list of segments into prompt text.
///
/// The encoder is the producer-facing API. It walks the segments once,
/// emitting a fragment per segment and collecting the side-channel signals
/// (memory, NotebookLM, custom tools) that travel next to the text.
///
/// # Segment handling
///
/// ```text
/// ┌─────────────────┬───────────────────────────────────┬────────────────────┐
/// │ Segment         │ Emitted                           │ Side effect        │
/// ├─────────────────┼───────────────────────────────────┼────────────────────┤
/// │ text            │ the text, verbatim                │                    │
/// │ asset           │ <asset title="T">..</asset>       │ parts filed        │
/// │ input           │ <input source-agent="T">..</input>│ parts filed        │
/// │ tool: routing   │ <a href="/route-N">TITLE</a>      │ route registered   │
/// │ tool: memory    │ Use Memory                        │ use_memory         │
/// │ tool: notebooklm│ Use NotebookLM                    │ use_notebooklm     │
/// │ tool: other     │ nothing                           │ custom_tool_urls   │
/// │ untyped         │ nothing                           │                    │
/// │ unknown type    │ nothing                           │ error              │
/// └─────────────────┴───────────────────────────────────┴────────────────────┘
/// ```
///
/// Fragments are concatenated with no separator.
///
/// # Errors are batched
///
/// A malformed segment does not stop the walk. Every problem is recorded
/// and, if there was at least one, `encode` returns
/// [`EncodeError::Rejected`] with all of them and no text. Part-level
/// failures inside a content block are a different matter: see
/// [`ContentWriter`].
///
/// # Usage
///
/// ```rust
/// use pidgin_encoder::{MemoryContentStore, PidginEncoder};
/// use pidgin_types::{Content, Part, Segment};
///
/// let store = MemoryContentStore::new();
/// let result = PidginEncoder::new(&store)
///     .encode(&[
///         Segment::text("Summarize this:\n"),
///         Segment::asset("Notes", Content::new(vec![Part::text("Ship on Friday.")])),
///     ])
///     .unwrap();
///
/// assert_eq!(
///     result.text,
///     "Summarize this:\n<asset title=\"Notes\">\nShip on Friday.\n</asset>"
/// );
/// ```
pub struct PidginEncoder<'a> {
    store: &'a dyn ContentStore,
    config: EncoderConfig,
}

/// Running state of one `encode` call.
#[derive(Default)]
struct Accumulator {
    fragments: Vec<String>,
    errors: Vec<SegmentError>,
    use_memory: bool,
    use_notebooklm: bool,
    custom_tool_urls: Vec<CustomToolUrl>,
}

impl<'a> PidginEncoder<'a> {
    /// Create an encoder with the default configuration.
    #[must_use]
    pub fn new(store: &'a dyn ContentStore) -> Self {
        Self::with_config(store, EncoderConfig::default())
    }

    #[must_use]
    pub fn with_config(store: &'a dyn ContentStore, config: EncoderConfig) -> Self {
        Self { store, config }
    }

    /// Set the NotebookLM flag the caller already knows about. Tool
    /// segments can only turn it on.
    pub fn use_notebooklm(&mut self, enabled: bool) -> &mut Self {
        self.config.use_notebooklm = enabled;
        self
    }

    /// Encode `segments` into pidgin text.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::Rejected`] listing every malformed segment
    /// when at least one segment could not be encoded.
    pub fn encode(&self, segments: &[Segment]) -> Result<PidginText, EncodeError> {
        let mut acc = Accumulator {
            use_notebooklm: self.config.use_notebooklm,
            ..Accumulator::default()
        };

        for segment in segments {
            self.encode_segment(segment, &mut acc);
        }

        if !acc.errors.is_empty() {
            warn!(count = acc.errors.len(), "rejecting malformed segments");
            return Err(EncodeError::Rejected { errors: acc.errors });
        }

        debug!(
            segments = segments.len(),
            fragments = acc.fragments.len(),
            "encoded segments"
        );
        Ok(PidginText {
            text: acc.fragments.concat(),
            use_memory: acc.use_memory,
            use_notebooklm: acc.use_notebooklm,
            custom_tool_urls: acc.custom_tool_urls,
        })
    }

    /// Encode the parts of a single content block, newline-joined. Never
    /// fails; see [`ContentWriter`] for what happens to rejected parts.
    #[must_use]
    pub fn encode_content(&self, content: &Content) -> String {
        let mut writer = ContentWriter::new(self.store, self.config.text_as_files)
            .max_inline_chars(self.config.max_inline_chars);
        writer.write_parts(&content.parts);
        writer.finish()
    }

    fn encode_segment(&self, segment: &Segment, acc: &mut Accumulator) {
        match segment {
            Segment::Text { text } => {
                if !text.is_empty() {
                    acc.fragments.push(text.clone());
                }
            }
            Segment::Asset { title, content } => match non_empty(content.as_ref()) {
                Some(content) => {
                    let inner = self.encode_content(content);
                    acc.fragments.push(tags::asset(title, &inner));
                }
                None => acc.errors.push(SegmentError::InvalidAsset),
            },
            Segment::Input { title, content } => match non_empty(content.as_ref()) {
                Some(content) => {
                    let inner = self.encode_content(content);
                    acc.fragments.push(tags::input(title, &inner));
                }
                None => acc.errors.push(SegmentError::InvalidInput),
            },
            Segment::Tool(tool) => self.encode_tool(tool, acc),
            Segment::Unknown { kind } => acc.errors.push(SegmentError::UnknownType {
                kind: kind.clone(),
            }),
            Segment::Untyped => {}
        }
    }

    fn encode_tool(&self, tool: &ToolRef, acc: &mut Accumulator) {
        match tool.kind() {
            ToolKind::Route => match tool.instance() {
                Some(instance) => {
                    let token = self.store.add_route(instance);
                    acc.fragments.push(tags::link(&token, &tool.title));
                }
                None => acc.errors.push(SegmentError::MissingRouteInstance),
            },
            ToolKind::Memory => {
                acc.use_memory = true;
                acc.fragments.push("Use Memory".to_string());
            }
            ToolKind::NotebookLm => {
                acc.use_notebooklm = true;
                acc.fragments.push("Use NotebookLM".to_string());
            }
            ToolKind::Custom => acc.custom_tool_urls.push(CustomToolUrl {
                url: tool.path.clone(),
                title: tool.title.clone(),
            }),
        }
    }
}

fn non_empty(content: Option<&Content>) -> Option<&Content> {
    content.filter(|c| !c.is_empty())
}

/// Encode `segments` with the default configuration.
///
/// # Errors
///
/// See [`PidginEncoder::encode`].
pub fn to_pidgin(
    segments: &[Segment],
    store: &dyn ContentStore,
    use_notebooklm: bool,
) -> Result<PidginText, EncodeError> {
    PidginEncoder::new(store)
        .use_notebooklm(use_notebooklm)
        .encode(segments)
}

/// Encode one content block on its own.
#[must_use]
pub fn content_to_pidgin_string(
    content: &Content,
    store: &dyn ContentStore,
    text_as_files: bool,
) -> String {
    let config = EncoderConfig {
        text_as_files,
        ..EncoderConfig::default()
    };
    PidginEncoder::with_config(store, config).encode_content(content)
}
