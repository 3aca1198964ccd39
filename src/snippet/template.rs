//! Parsed snippet templates and placeholder substitution

use std::collections::BTreeMap;

use crate::error::{RenderError, SnippetError, Span};

use super::lexer::{lex, Token};

/// One piece of a parsed snippet
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, with brace escapes already collapsed
    Literal(String),
    /// A `{key}` placeholder
    Placeholder { key: String, span: Span },
}

/// A snippet parsed into literal and placeholder segments
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse snippet text.
    ///
    /// Fails on the first lone brace or unsupported placeholder key.
    pub fn parse(source: &str) -> Result<Self, SnippetError> {
        let mut segments = Vec::new();
        let mut literal = String::new();

        for (token, span) in lex(source) {
            match token {
                Token::Text(text) => literal.push_str(&text),
                Token::EscapedOpen => literal.push('{'),
                Token::EscapedClose => literal.push('}'),
                Token::Open => return Err(SnippetError::UnmatchedBrace { brace: '{', span }),
                Token::Close => return Err(SnippetError::UnmatchedBrace { brace: '}', span }),
                Token::Placeholder(key) => {
                    if !is_plain_key(&key) {
                        return Err(SnippetError::InvalidPlaceholder { key, span });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder { key, span });
                }
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Placeholder keys in order of first appearance, without duplicates
    pub fn placeholders(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder { key, .. } = segment {
                if !keys.contains(&key.as_str()) {
                    keys.push(key);
                }
            }
        }
        keys
    }

    /// Substitute every placeholder from `values`.
    ///
    /// The first placeholder without a value aborts substitution.
    pub fn substitute(&self, values: &BTreeMap<String, String>) -> Result<String, RenderError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder { key, span } => match values.get(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(RenderError::MissingFactor {
                            key: key.clone(),
                            span: span.clone(),
                        })
                    }
                },
            }
        }
        Ok(out)
    }
}

/// Keys are looked up verbatim; attribute, index, conversion and format-spec
/// syntax is not supported, and empty or numeric keys are positional.
fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && !key.chars().all(|c| c.is_ascii_digit())
        && !key.contains(['.', '[', '!', ':'])
}
