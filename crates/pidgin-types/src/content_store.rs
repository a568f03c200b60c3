use crate::error::StoreError;
use crate::part::Part;

/// Scratch storage that hands out path-like handles for content parts.
///
/// The encoder registers large text and binary parts here and embeds the
/// returned handles in `<content>` / `<file>` tags; the decoder resolves
/// `<file>` handles back into parts. Routing targets get short tokens the
/// same way, for `<a href>`.
///
/// Handles are opaque to the engine. The only requirement is that a
/// handle returned by a registration stays resolvable for the rest of the
/// session.
///
/// ```text
/// Encode path:
///   part ──▶ store.add_part(part) ──▶ "/mnt/image1.png" ──▶ <file src=".." />
///
/// Decode path:
///   <file src=".." /> ──▶ store.get(handle) ──▶ [part, ...]
/// ```
///
/// All methods take `&self`; implementations use interior mutability.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`. If several encodes run against
/// one store at once, the store alone guarantees handles never collide.
pub trait ContentStore: Send + Sync {
    /// Register one part and return its handle.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the part cannot be stored.
    fn add_part(&self, part: &Part) -> Result<String, StoreError>;

    /// Register a routing target and return the token that stands for it.
    fn add_route(&self, instance: &str) -> String;

    /// Resolve a handle to the part(s) it was registered with.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] for a handle the store never issued.
    fn get(&self, handle: &str) -> Result<Vec<Part>, StoreError>;

    /// Store `content` as a text file called `name` and return its handle.
    fn write(&self, name: &str, content: &str) -> String;

    /// Newline-separated listing of every file handle, for inspection.
    fn list_files(&self) -> String;
}
