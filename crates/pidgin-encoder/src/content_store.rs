use std::collections::HashMap;
use std::sync::RwLock;

use pidgin_types::{ContentStore, Part, StoreError};
use tracing::debug;

/// Virtual mount every file handle lives under.
pub const DEFAULT_MOUNT: &str = "/mnt/";

/// Session-scoped store that files parts under a virtual mount and hands
/// out `/route-{n}` tokens for routing targets.
///
/// Handles name the kind of data they hold and are never reused for
/// different content: a registration skips any path already taken by a
/// written file, and writing over a registered handle forgets its dedup
/// entry. All state sits behind one [`RwLock`].
///
/// # Handles
///
/// Every registered part gets `{mount}{stem}{n}.{ext}`:
///
/// ```text
/// ┌───────────┬─────────────────────────────────────────────────────┐
/// │ Piece     │ Source                                              │
/// ├───────────┼─────────────────────────────────────────────────────┤
/// │ mount     │ "/mnt/" unless set with `with_mount`                │
/// │ stem      │ image | video | audio | text | file (from the mime) │
/// │ n         │ one counter for all parts, starting at 1            │
/// │ ext       │ fixed mime table, "bin" when unknown                │
/// └───────────┴─────────────────────────────────────────────────────┘
/// ```
///
/// Text parts register as `text/plain`. The counter lives under the write
/// lock and skips numbers whose path is already occupied, so neither
/// concurrent registrations nor earlier `write`s collide with a new handle.
///
/// # Deduplication
///
/// A part identical to one registered earlier (same BLAKE3 fingerprint)
/// gets the earlier handle back. Re-encoding decoded output therefore
/// reproduces the same markup instead of minting fresh handles.
///
/// # Routes
///
/// Routing targets get `/route-{n}` from a separate counter. The same
/// instance always maps to the same token.
///
/// # Example
///
/// ```rust
/// use pidgin_encoder::MemoryContentStore;
/// use pidgin_types::{ContentStore, Part};
///
/// let store = MemoryContentStore::new();
/// let png = Part::inline_data("image/png", "iVBORw0KGgo=");
/// let handle = store.add_part(&png).unwrap();
/// assert_eq!(handle, "/mnt/image1.png");
/// assert_eq!(store.get(&handle).unwrap(), vec![png]);
/// ```
#[derive(Debug)]
pub struct MemoryContentStore {
    mount: String,
    state: RwLock<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    files: HashMap<String, Vec<Part>>,
    fingerprints: HashMap<[u8; 32], String>,
    route_tokens: HashMap<String, String>,
    route_instances: HashMap<String, String>,
    files_issued: usize,
    routes_issued: usize,
}

impl MemoryContentStore {
    /// Create an empty store mounted at [`DEFAULT_MOUNT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_mount(DEFAULT_MOUNT)
    }

    /// Create an empty store whose handles start with `mount`.
    #[must_use]
    pub fn with_mount(mount: &str) -> Self {
        let mut mount = mount.to_string();
        if !mount.ends_with('/') {
            mount.push('/');
        }
        Self {
            mount,
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Return the number of files in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .expect("content store lock poisoned")
            .files
            .len()
    }

    /// Return `true` if the store holds no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The routing instance a token was issued for.
    #[must_use]
    pub fn resolve_route(&self, token: &str) -> Option<String> {
        self.state
            .read()
            .expect("content store lock poisoned")
            .route_instances
            .get(token)
            .cloned()
    }

    /// Expand a bare file name to a full handle under the mount.
    fn path_for(&self, name: &str) -> String {
        if name.starts_with(&self.mount) {
            name.to_string()
        } else {
            format!("{}{}", self.mount, name.trim_start_matches('/'))
        }
    }
}

impl Default for MemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentStore for MemoryContentStore {
    fn add_part(&self, part: &Part) -> Result<String, StoreError> {
        let (stem, ext) = file_kind(part)?;
        let fingerprint = fingerprint(part);

        let mut state = self.state.write().expect("content store lock poisoned");
        if let Some(existing) = fingerprint.and_then(|fp| state.fingerprints.get(&fp)) {
            debug!(handle = %existing, "part already registered");
            return Ok(existing.clone());
        }

        let handle = loop {
            state.files_issued += 1;
            let candidate = format!("{}{stem}{}.{ext}", self.mount, state.files_issued);
            if !state.files.contains_key(&candidate) {
                break candidate;
            }
        };
        state.files.insert(handle.clone(), vec![part.clone()]);
        if let Some(fp) = fingerprint {
            state.fingerprints.insert(fp, handle.clone());
        }
        debug!(handle = %handle, "registered part");
        Ok(handle)
    }

    fn add_route(&self, instance: &str) -> String {
        let mut state = self.state.write().expect("content store lock poisoned");
        if let Some(token) = state.route_tokens.get(instance) {
            return token.clone();
        }
        state.routes_issued += 1;
        let token = format!("/route-{}", state.routes_issued);
        state
            .route_tokens
            .insert(instance.to_string(), token.clone());
        state
            .route_instances
            .insert(token.clone(), instance.to_string());
        debug!(token = %token, instance, "registered route");
        token
    }

    fn get(&self, handle: &str) -> Result<Vec<Part>, StoreError> {
        let path = self.path_for(handle);
        self.state
            .read()
            .expect("content store lock poisoned")
            .files
            .get(&path)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                handle: handle.to_string(),
            })
    }

    fn write(&self, name: &str, content: &str) -> String {
        let path = self.path_for(name);
        let mut state = self.state.write().expect("content store lock poisoned");
        if state
            .files
            .insert(path.clone(), vec![Part::text(content)])
            .is_some()
        {
            state.fingerprints.retain(|_, handle| *handle != path);
            debug!(path = %path, "overwrote file");
        }
        path
    }

    fn list_files(&self) -> String {
        let state = self.state.read().expect("content store lock poisoned");
        let mut paths: Vec<&str> = state.files.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths.join("\n")
    }
}

/// Handle stem and extension for a part.
fn file_kind(part: &Part) -> Result<(&'static str, &'static str), StoreError> {
    if part.as_text().is_some() {
        return Ok(("text", "txt"));
    }
    let mime = part.mime_type().ok_or(StoreError::UnsupportedPart {
        reason: "part carries neither text nor a mime type",
    })?;
    let essence = mime.split(';').next().unwrap_or(mime).trim();
    let stem = match essence.split('/').next() {
        Some("image") => "image",
        Some("video") => "video",
        Some("audio") => "audio",
        Some("text") => "text",
        _ => "file",
    };
    Ok((stem, extension(essence)))
}

fn extension(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/quicktime" => "mov",
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/wav" | "audio/x-wav" => "wav",
        "audio/ogg" => "ogg",
        "text/plain" => "txt",
        "text/markdown" => "md",
        "text/html" => "html",
        "text/csv" => "csv",
        "application/json" => "json",
        "application/pdf" => "pdf",
        _ => "bin",
    }
}

/// BLAKE3 fingerprint of a part's identity, or `None` for parts that are
/// never deduplicated.
fn fingerprint(part: &Part) -> Option<[u8; 32]> {
    let mut hasher = blake3::Hasher::new();
    match part {
        Part::Text { text } => {
            hasher.update(b"text\0");
            hasher.update(text.as_bytes());
        }
        Part::InlineData(blob) => {
            hasher.update(b"inline\0");
            hasher.update(blob.mime_type.as_bytes());
            hasher.update(b"\0");
            hasher.update(blob.data.as_bytes());
        }
        Part::StoredData(stored) => {
            hasher.update(b"stored\0");
            hasher.update(stored.mime_type.as_bytes());
            hasher.update(b"\0");
            hasher.update(stored.handle.as_bytes());
        }
        Part::Other(_) => return None,
    }
    Some(hasher.finalize().into())
}
