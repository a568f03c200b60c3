#![warn(clippy::pedantic)]

pub mod config;
pub mod content_writer;
pub mod encoder;
pub mod error;

mod content_store;

pub use config::{EncoderConfig, MAX_INLINE_CHARACTER_LENGTH};
pub use content_store::{DEFAULT_MOUNT, MemoryContentStore};
pub use content_writer::ContentWriter;
pub use encoder::{PidginEncoder, content_to_pidgin_string, to_pidgin};
pub use error::{EncodeError, SegmentError};
