//! Figure Blueprint - LaTeX figure fragments from reusable blueprints
//!
//! A [`Blueprint`] turns a few named variables into a rendered LaTeX
//! fragment, and can run a macro (such as opening a drawing tool) to create
//! the asset the fragment refers to.
//!
//! # Example
//!
//! ```rust
//! use figure_blueprint::render_default;
//!
//! let fragment = render_default("Binary Tree").unwrap();
//! assert!(fragment.contains(r"\incfig{Binary Tree}"));
//! assert!(fragment.contains(r"\label{fig:Binary Tree}"));
//! ```

pub mod blueprint;
pub mod config;
pub mod drawing;
pub mod error;
pub mod registry;
pub mod session;
pub mod snippet;

pub use blueprint::{
    default_blueprint, Blueprint, BlueprintConfig, Factor, Factors, Selector, Variables,
    DOCUMENT_TYPE,
};
pub use config::{Config, DrawingConfig};
pub use drawing::{DrawingTool, Inkscape};
pub use error::{DocumentError, RenderError, ResolveError, SessionError};
pub use registry::MacroRegistry;
pub use session::{BufferField, Session, TextField, IMPORT_FAILED, IMPORT_OK, NO_DEPENDENCY};

/// Render the built-in figure blueprint for a figure called `name`
///
/// # Example
///
/// ```rust
/// use figure_blueprint::render_default;
///
/// let fragment = render_default("").unwrap();
/// assert!(fragment.contains(r"\caption{untitled}"));
/// ```
pub fn render_default(name: &str) -> Result<String, RenderError> {
    let variables: Variables = [("name".to_string(), name.to_string())].into();
    default_blueprint().render(&variables)
}
