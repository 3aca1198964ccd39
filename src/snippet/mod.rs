//! Snippet templates with brace placeholders

pub mod lexer;
mod template;

pub use template::{Segment, Template};
