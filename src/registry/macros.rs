//! Built-in macros run after factor resolution

use tracing::{error, info};

use crate::blueprint::Factors;
use crate::drawing::DrawingTool;
use crate::error::LookupError;

/// A resolved macro, ready to run against a factor mapping
pub type MacroAction<'a> = Box<dyn Fn(&Factors) + 'a>;

/// Macro name bound to the drawing-tool integration
pub const DRAWING_MACRO: &str = "inkscape";

const BUILTINS: &[&str] = &[DRAWING_MACRO];

/// Registry of built-in macros and the collaborators they drive
pub struct MacroRegistry {
    drawing: Box<dyn DrawingTool>,
}

impl MacroRegistry {
    /// Create a registry whose drawing macro drives `drawing`
    pub fn new(drawing: impl DrawingTool + 'static) -> Self {
        Self {
            drawing: Box::new(drawing),
        }
    }

    /// Check if a built-in macro exists
    pub fn contains(name: &str) -> bool {
        BUILTINS.contains(&name)
    }

    /// Get all built-in macro names
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUILTINS.iter().copied()
    }

    /// Find a built-in macro by name
    pub fn lookup(&self, name: &str) -> Result<MacroAction<'_>, LookupError> {
        match name {
            DRAWING_MACRO => {
                let tool = self.drawing.as_ref();
                let action: MacroAction<'_> = Box::new(move |factors: &Factors| {
                    match tool.create(factors) {
                        Ok(()) => info!(tool = tool.name(), "figure created"),
                        Err(e) => error!(tool = tool.name(), "{}", e),
                    }
                });
                Ok(action)
            }
            _ => Err(LookupError::NotFound {
                kind: "macro",
                name: name.to_string(),
            }),
        }
    }

    /// Find a built-in macro, falling back to a logged no-op
    pub fn resolve(&self, name: &str) -> MacroAction<'_> {
        match self.lookup(name) {
            Ok(action) => action,
            Err(e) => {
                error!("{}", e);
                Box::new(|_: &Factors| {})
            }
        }
    }
}

impl std::fmt::Debug for MacroRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MacroRegistry")
            .field("drawing", &self.drawing.name())
            .finish()
    }
}
