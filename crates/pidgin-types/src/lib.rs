#![warn(clippy::pedantic)]

pub mod error;
pub mod part;
pub mod content;
pub mod segment;
pub mod outcome;
pub mod content_store;

pub use content::{Content, Role};
pub use content_store::ContentStore;
pub use error::StoreError;
pub use outcome::{Outcome, PidginText};
pub use part::{Blob, NOTEBOOKLM_URL_PREFIX, Part, StoredData};
pub use segment::{CustomToolUrl, Segment, ToolKind, ToolRef};
