//! Error types for blueprint resolution, rendering and persistence

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in snippet text
pub type Span = std::ops::Range<usize>;

/// A required variable was not supplied by the caller.
///
/// This is the only error that aborts factor resolution: continuing would
/// fabricate a value for the factor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("variable '{variable}' not provided")]
    MissingVariable { variable: String },
}

/// Malformed snippet text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnippetError {
    #[error("single '{brace}' encountered in snippet")]
    UnmatchedBrace { brace: char, span: Span },

    #[error("invalid placeholder '{{{key}}}': keys must be plain names")]
    InvalidPlaceholder { key: String, span: Span },
}

impl SnippetError {
    pub fn span(&self) -> &Span {
        match self {
            Self::UnmatchedBrace { span, .. } => span,
            Self::InvalidPlaceholder { span, .. } => span,
        }
    }
}

/// Errors that can occur while rendering a fragment
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("snippet syntax error: {0}")]
    Snippet(#[from] SnippetError),

    /// Snippet references a placeholder with no resolved factor
    #[error("factor and snippet not matching, lacking key '{key}'")]
    MissingFactor { key: String, span: Span },
}

impl RenderError {
    /// Get the snippet span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Resolve(_) => None,
            Self::Snippet(e) => Some(e.span()),
            Self::MissingFactor { span, .. } => Some(span),
        }
    }

    /// Format the error with snippet context using ariadne
    ///
    /// Errors without a span fall back to their display text.
    pub fn format(&self, snippet: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return format!("Error: {}\n", self);
        };

        let label = match self {
            Self::MissingFactor { key, .. } => format!("no factor named '{}'", key),
            _ => self.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(snippet)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Error: {}\n", self),
        }
    }
}

/// Errors that can occur when reading or writing blueprint documents
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to access blueprint file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse blueprint document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("blueprint document has no type tag")]
    MissingType,

    #[error("unexpected document type '{found}' (expected '{expected}')")]
    WrongType { found: String, expected: &'static str },
}

/// Errors that can occur when loading the configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Errors raised by a drawing-tool integration
#[derive(Debug, Error)]
pub enum DrawingError {
    #[error("drawing tool requires factor '{0}'")]
    MissingFactor(&'static str),

    #[error("failed to prepare figure {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}")]
    ToolFailed { command: String, status: String },
}

/// Errors from session operations on the active blueprint
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No blueprint loaded!")]
    NoBlueprint,

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// A registry lookup found no entry under the given name
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no such built-in {kind} '{name}'")]
    NotFound { kind: &'static str, name: String },
}
