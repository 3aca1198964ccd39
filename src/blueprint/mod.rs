//! Blueprints: reusable rules for turning variables into a LaTeX fragment
//!
//! A blueprint declares the variables a caller supplies, how each snippet
//! placeholder ("factor") is derived from one of those variables, the snippet
//! itself, and an optional macro to run once factors are known.
//!
//! # Example
//!
//! ```rust
//! use figure_blueprint::{Blueprint, BlueprintConfig, Factor, Variables};
//!
//! let blueprint = Blueprint::new(BlueprintConfig {
//!     variables: vec!["name".to_string()],
//!     snippet: r"\ref{{fig:{label}}}".to_string(),
//!     factors: [("label".to_string(), Factor::new("$slugify", "name"))].into(),
//!     ..Default::default()
//! });
//!
//! let vars: Variables = [("name".to_string(), "Binary Tree".to_string())].into();
//! assert_eq!(blueprint.render(&vars).unwrap(), r"\ref{fig:binary-tree}");
//! ```

mod defaults;
mod document;
pub mod lint;
mod selector;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::{RenderError, ResolveError};
use crate::registry::{transform, MacroRegistry};
use crate::snippet::Template;

pub use defaults::{default_blueprint, DEFAULT_DEPENDENCY, DEFAULT_SNIPPET};
pub use document::DOCUMENT_TYPE;
pub use selector::{Selector, BUILTIN_PREFIX};

/// Caller-supplied variable values, by variable name
pub type Variables = BTreeMap<String, String>;

/// Resolved factor values, by factor name
pub type Factors = BTreeMap<String, String>;

/// How one factor is derived: a transform applied to a declared variable.
///
/// Persisted as a two-element array `[selector, variable]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Selector, String)", into = "(Selector, String)")]
pub struct Factor {
    pub selector: Selector,
    pub variable: String,
}

impl Factor {
    pub fn new(selector: impl Into<Selector>, variable: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            variable: variable.into(),
        }
    }
}

impl From<(Selector, String)> for Factor {
    fn from((selector, variable): (Selector, String)) -> Self {
        Self { selector, variable }
    }
}

impl From<Factor> for (Selector, String) {
    fn from(factor: Factor) -> Self {
        (factor.selector, factor.variable)
    }
}

/// The declarative definition a blueprint is built from.
///
/// Every field is optional in persisted form and defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlueprintConfig {
    #[serde(rename = "variable")]
    pub variables: Vec<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub dependency: String,
    #[serde(rename = "factor")]
    pub factors: BTreeMap<String, Factor>,
    pub snippet: String,
    #[serde(rename = "macro")]
    pub macro_selector: Selector,
}

/// A `null` dependency is read as no dependency
fn null_as_empty<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// An immutable figure-generation rule.
///
/// "Updating" a blueprint means building a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    variables: Vec<String>,
    dependency: String,
    factors: BTreeMap<String, Factor>,
    snippet: String,
    macro_selector: Selector,
}

impl Blueprint {
    /// Build a blueprint; duplicate variable names keep their first position
    pub fn new(config: BlueprintConfig) -> Self {
        let mut variables: Vec<String> = Vec::with_capacity(config.variables.len());
        for var in config.variables {
            if variables.contains(&var) {
                warn!("Duplicate variable '{}' ignored", var);
            } else {
                variables.push(var);
            }
        }

        Self {
            variables,
            dependency: config.dependency,
            factors: config.factors,
            snippet: config.snippet,
            macro_selector: config.macro_selector,
        }
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    pub fn factors(&self) -> &BTreeMap<String, Factor> {
        &self.factors
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    pub fn macro_selector(&self) -> &Selector {
        &self.macro_selector
    }

    /// Check if `name` is a declared variable
    pub fn declares(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v == name)
    }

    /// Copy the definition back out as a config
    pub fn to_config(&self) -> BlueprintConfig {
        BlueprintConfig {
            variables: self.variables.clone(),
            dependency: self.dependency.clone(),
            factors: self.factors.clone(),
            snippet: self.snippet.clone(),
            macro_selector: self.macro_selector.clone(),
        }
    }

    /// Derive every factor from the supplied variables.
    ///
    /// Factors bound to undeclared variables or external transforms are
    /// logged and left out of the result. A declared variable missing from
    /// `variables` aborts resolution.
    pub fn resolve_factors(&self, variables: &Variables) -> Result<Factors, ResolveError> {
        let mut factors = Factors::new();

        for (name, factor) in &self.factors {
            if !self.declares(&factor.variable) {
                error!(factor = %name, "No such variable '{}'", factor.variable);
                continue;
            }

            let Some(value) = variables.get(&factor.variable) else {
                error!(critical = true, "Variable '{}' not provided", factor.variable);
                return Err(ResolveError::MissingVariable {
                    variable: factor.variable.clone(),
                });
            };

            let resolved = match &factor.selector {
                Selector::BuiltIn(transform) => transform::resolve(transform, value),
                Selector::Identity => value.clone(),
                Selector::External(method) => {
                    error!(factor = %name, "External factor method '{}' not implemented", method);
                    continue;
                }
            };
            factors.insert(name.clone(), resolved);
        }

        Ok(factors)
    }

    /// Resolve factors and substitute them into the snippet.
    ///
    /// Every failure is logged at the highest severity before it is returned.
    pub fn render(&self, variables: &Variables) -> Result<String, RenderError> {
        let factors = self.resolve_factors(variables)?;

        let fragment = Template::parse(&self.snippet)
            .map_err(RenderError::from)
            .and_then(|template| template.substitute(&factors));

        if let Err(e) = &fragment {
            error!(critical = true, "{}", e);
        }
        fragment
    }

    /// Run the blueprint's macro against freshly resolved factors.
    ///
    /// Empty and external macros never resolve factors; only a missing
    /// variable for a built-in macro is an error.
    pub fn run_macro(
        &self,
        variables: &Variables,
        macros: &MacroRegistry,
    ) -> Result<(), ResolveError> {
        match &self.macro_selector {
            Selector::BuiltIn(name) => {
                let action = macros.resolve(name);
                action(&self.resolve_factors(variables)?);
            }
            Selector::Identity => debug!("No macro."),
            Selector::External(name) => {
                error!("External macro '{}' not implemented", name)
            }
        }
        Ok(())
    }
}

impl From<BlueprintConfig> for Blueprint {
    fn from(config: BlueprintConfig) -> Self {
        Self::new(config)
    }
}
