#![warn(clippy::pedantic)]

pub mod scanner;
pub mod tags;

pub use scanner::{Scanner, Token, tokenize};
