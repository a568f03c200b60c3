/// Text parts longer than this many characters are filed in the content
/// store and wrapped in `<content src="...">` instead of inlined bare.
pub const MAX_INLINE_CHARACTER_LENGTH: usize = 1000;

/// Configuration for [`PidginEncoder`](crate::PidginEncoder).
///
/// ```text
/// ┌──────────────────┬─────────┬──────────────────────────────────────────┐
/// │ Field            │ Default │ Purpose                                  │
/// ├──────────────────┼─────────┼──────────────────────────────────────────┤
/// │ max_inline_chars │ 1000    │ Longest text inlined without <content>   │
/// │ text_as_files    │ true    │ File long text in asset/input blocks     │
/// │ use_notebooklm   │ false   │ Initial NotebookLM signal (runtime flag) │
/// └──────────────────┴─────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncoderConfig {
    /// Length threshold in characters (Unicode scalar values). A text part
    /// of exactly this length is still inlined.
    pub max_inline_chars: usize,

    /// When `false`, long text in `asset`/`input` blocks is inlined like
    /// short text and never registered with the store.
    pub text_as_files: bool,

    /// Runtime flag sent alongside the segments. The encoder ORs it with
    /// any NotebookLM tool segment it sees.
    pub use_notebooklm: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            max_inline_chars: MAX_INLINE_CHARACTER_LENGTH,
            text_as_files: true,
            use_notebooklm: false,
        }
    }
}
