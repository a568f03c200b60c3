#![warn(clippy::pedantic)]

pub mod decoder;
pub mod error;
pub mod merge;

pub use decoder::{PidginDecoder, from_pidgin_string};
pub use error::DecodeError;
pub use merge::merge_text_parts;
