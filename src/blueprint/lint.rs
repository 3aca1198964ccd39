//! Static checks for blueprint definitions.
//!
//! Resolution and rendering degrade quietly on configuration mistakes; these
//! checks surface the same mistakes up front, without supplying variables.

use std::fmt;

use super::{Blueprint, Selector};
use crate::registry::{transform, MacroRegistry};
use crate::snippet::Template;

/// A lint warning about a blueprint defect
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Variable,
    Transform,
    Macro,
    Snippet,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Variable => write!(f, "variable"),
            LintCategory::Transform => write!(f, "transform"),
            LintCategory::Macro => write!(f, "macro"),
            LintCategory::Snippet => write!(f, "snippet"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)
    }
}

/// Run all checks on a blueprint.
pub fn check(blueprint: &Blueprint) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_factors(blueprint, &mut warnings);
    check_macro(blueprint, &mut warnings);
    check_snippet(blueprint, &mut warnings);
    warnings
}

fn warn(warnings: &mut Vec<LintWarning>, category: LintCategory, message: String) {
    warnings.push(LintWarning { category, message });
}

fn check_factors(blueprint: &Blueprint, warnings: &mut Vec<LintWarning>) {
    for (name, factor) in blueprint.factors() {
        if !blueprint.declares(&factor.variable) {
            warn(
                warnings,
                LintCategory::Variable,
                format!(
                    "factor \"{}\" uses undeclared variable \"{}\"",
                    name, factor.variable
                ),
            );
        }
        match &factor.selector {
            Selector::BuiltIn(t) if !transform::contains(t) => warn(
                warnings,
                LintCategory::Transform,
                format!("factor \"{}\" uses unknown built-in transform \"{}\"", name, t),
            ),
            Selector::External(t) => warn(
                warnings,
                LintCategory::Transform,
                format!(
                    "factor \"{}\" uses external transform \"{}\", which is not supported",
                    name, t
                ),
            ),
            _ => {}
        }
    }
}

fn check_macro(blueprint: &Blueprint, warnings: &mut Vec<LintWarning>) {
    match blueprint.macro_selector() {
        Selector::BuiltIn(m) if !MacroRegistry::contains(m) => warn(
            warnings,
            LintCategory::Macro,
            format!("unknown built-in macro \"{}\"", m),
        ),
        Selector::External(m) => warn(
            warnings,
            LintCategory::Macro,
            format!("external macro \"{}\" is not supported", m),
        ),
        _ => {}
    }
}

fn check_snippet(blueprint: &Blueprint, warnings: &mut Vec<LintWarning>) {
    let template = match Template::parse(blueprint.snippet()) {
        Ok(t) => t,
        Err(e) => {
            warn(warnings, LintCategory::Snippet, e.to_string());
            return;
        }
    };

    let placeholders = template.placeholders();
    for key in &placeholders {
        if !blueprint.factors().contains_key(*key) {
            warn(
                warnings,
                LintCategory::Snippet,
                format!("placeholder \"{}\" has no factor", key),
            );
        }
    }
    for name in blueprint.factors().keys() {
        if !placeholders.contains(&name.as_str()) {
            warn(
                warnings,
                LintCategory::Snippet,
                format!("factor \"{}\" is never used by the snippet", name),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{default_blueprint, BlueprintConfig, Factor};

    fn categories(warnings: &[LintWarning]) -> Vec<LintCategory> {
        warnings.iter().map(|w| w.category).collect()
    }

    #[test]
    fn test_default_blueprint_is_clean() {
        let warnings = check(&default_blueprint());
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn test_all_categories() {
        let bp = Blueprint::new(BlueprintConfig {
            variables: vec!["declared".to_string()],
            factors: [
                ("x".to_string(), Factor::new("", "missing")),
                ("y".to_string(), Factor::new("$reverse", "declared")),
                ("z".to_string(), Factor::new("plugin", "declared")),
            ]
            .into(),
            snippet: "{x} {y} {z} {w}".to_string(),
            macro_selector: Selector::parse("$gimp"),
            ..Default::default()
        });

        let warnings = check(&bp);
        let cats = categories(&warnings);
        assert!(cats.contains(&LintCategory::Variable));
        assert!(cats.contains(&LintCategory::Transform));
        assert!(cats.contains(&LintCategory::Macro));
        assert!(warnings
            .iter()
            .any(|w| w.message == "placeholder \"w\" has no factor"));
        assert_eq!(
            cats.iter().filter(|c| **c == LintCategory::Transform).count(),
            2
        );
    }

    #[test]
    fn test_unused_factor_and_bad_snippet() {
        let bp = Blueprint::new(BlueprintConfig {
            variables: vec!["a".to_string()],
            factors: [("x".to_string(), Factor::new("", "a"))].into(),
            snippet: "no placeholders".to_string(),
            ..Default::default()
        });
        let warnings = check(&bp);
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].to_string(),
            "snippet: factor \"x\" is never used by the snippet"
        );

        let bp = Blueprint::new(BlueprintConfig {
            snippet: "{".to_string(),
            ..Default::default()
        });
        assert_eq!(categories(&check(&bp)), vec![LintCategory::Snippet]);
    }
}
