//! The active blueprint and the operations an application performs on it
//!
//! A [`Session`] owns the one "current" blueprint slot. The slot starts
//! empty, is filled by [`Session::load_default`] or a successful
//! [`Session::import`], and is only ever replaced whole.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::blueprint::{default_blueprint, Blueprint, Variables};
use crate::error::SessionError;
use crate::registry::MacroRegistry;

/// Shown in place of an empty dependency
pub const NO_DEPENDENCY: &str = "% No dependency";

/// Status returned by [`Session::import`] on success
pub const IMPORT_OK: i32 = 0;
/// Status returned by [`Session::import`] on any failure
pub const IMPORT_FAILED: i32 = -1;

/// A writable text field in the presentation layer
pub trait TextField {
    /// Whether the field shows placeholder hint text rather than content
    fn set_hinting(&mut self, hinting: bool);
    fn set_content(&mut self, content: String);
    fn content(&self) -> &str;
}

/// In-memory text field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferField {
    pub content: String,
    pub hinting: bool,
}

impl TextField for BufferField {
    fn set_hinting(&mut self, hinting: bool) {
        self.hinting = hinting;
    }

    fn set_content(&mut self, content: String) {
        self.content = content;
    }

    fn content(&self) -> &str {
        &self.content
    }
}

/// Holds the current blueprint and the field its dependency is shown in
#[derive(Debug)]
pub struct Session<F: TextField> {
    current: Option<Arc<Blueprint>>,
    dependency_field: F,
}

impl<F: TextField> Session<F> {
    /// Create a session with no blueprint loaded
    pub fn new(dependency_field: F) -> Self {
        Self {
            current: None,
            dependency_field,
        }
    }

    /// The current blueprint, if any
    pub fn current(&self) -> Option<Arc<Blueprint>> {
        self.current.clone()
    }

    /// Swap in a new blueprint, returning the previous one
    pub fn replace(&mut self, blueprint: Blueprint) -> Option<Arc<Blueprint>> {
        self.current.replace(Arc::new(blueprint))
    }

    pub fn dependency_field(&self) -> &F {
        &self.dependency_field
    }

    fn require(&self) -> Result<Arc<Blueprint>, SessionError> {
        self.current.clone().ok_or_else(|| {
            error!(critical = true, "No blueprint loaded!");
            SessionError::NoBlueprint
        })
    }

    /// Make the built-in figure blueprint current
    pub fn load_default(&mut self) {
        self.replace(default_blueprint());
        info!("Default blueprint loaded");
    }

    /// Show the current blueprint's dependency in the dependency field
    pub fn show(&mut self) {
        let Ok(blueprint) = self.require() else {
            return;
        };

        let text = match blueprint.dependency() {
            "" => NO_DEPENDENCY,
            dependency => dependency,
        };

        self.dependency_field.set_hinting(false);
        self.dependency_field.set_content(text.to_string());
        debug!("{}", self.dependency_field.content());
    }

    /// Write the current blueprint to `path`
    pub fn export(&self, path: &Path) -> Result<(), SessionError> {
        let blueprint = self.require()?;
        debug!(blueprint = ?blueprint, "exporting");

        blueprint.write(path).map_err(|e| {
            error!("{}", e);
            e
        })?;
        info!("Blueprint exported at {}", path.display());
        Ok(())
    }

    /// Load a blueprint document from `path` and make it current.
    ///
    /// Returns [`IMPORT_OK`] and shows the new blueprint on success. Any
    /// read, parse or type-tag failure returns [`IMPORT_FAILED`] and leaves
    /// the current blueprint untouched.
    pub fn import(&mut self, path: &Path) -> i32 {
        match Blueprint::read(path) {
            Ok(blueprint) => {
                self.replace(blueprint);
                info!("Blueprint imported from {}", path.display());
                self.show();
                IMPORT_OK
            }
            Err(e) => {
                error!("{}", e);
                IMPORT_FAILED
            }
        }
    }

    /// Render the current blueprint
    pub fn fragment(&self, variables: &Variables) -> Result<String, SessionError> {
        Ok(self.require()?.render(variables)?)
    }

    /// Run the current blueprint's macro
    pub fn run_macro(
        &self,
        variables: &Variables,
        macros: &MacroRegistry,
    ) -> Result<(), SessionError> {
        Ok(self.require()?.run_macro(variables, macros)?)
    }
}
