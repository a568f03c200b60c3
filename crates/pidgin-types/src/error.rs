/// Errors reported by a [`ContentStore`](crate::ContentStore).
///
/// The encoder and decoder treat these very differently: a failed
/// registration while encoding a content block silently drops that one
/// part, while a failed resolution while decoding is collected and fails
/// the whole decode.
///
/// ```text
/// ┌────────────────────┬───────────────────────────────────────────────┐
/// │ Variant            │ Raised by                                     │
/// ├────────────────────┼───────────────────────────────────────────────┤
/// │ NotFound           │ get() with a handle the store never issued    │
/// │ UnsupportedPart    │ add_part() with a part it cannot store        │
/// └────────────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The handle does not name anything in the store.
    #[error("file \"{handle}\" not found")]
    NotFound { handle: String },

    /// The part has no shape the store knows how to file away, for
    /// example an opaque part with neither text nor a mime type.
    #[error("unsupported part: {reason}")]
    UnsupportedPart { reason: &'static str },
}
