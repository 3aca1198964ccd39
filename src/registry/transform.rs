//! Built-in string transforms used to derive factors from variables

use heck::{ToKebabCase, ToLowerCamelCase, ToPascalCase, ToSnakeCase, ToTitleCase};
use tracing::error;

use crate::error::LookupError;

/// A pure string-to-string transform
pub type TransformFn = fn(&str) -> String;

/// Substituted for empty input before a built-in transform runs
pub const UNTITLED: &str = "untitled";

const BUILTINS: &[(&str, TransformFn)] = &[
    ("identity", identity),
    // Pass-through names used by the default figure blueprint
    ("caption", identity),
    ("fileName", identity),
    ("label", identity),
    ("slugify", slugify),
    ("titlecase", titlecase),
    ("snake", snake),
    ("camel", camel),
    ("pascal", pascal),
    ("lower", lower),
    ("upper", upper),
];

/// Find a built-in transform by name
pub fn lookup(name: &str) -> Result<TransformFn, LookupError> {
    BUILTINS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| *f)
        .ok_or_else(|| LookupError::NotFound {
            kind: "transform",
            name: name.to_string(),
        })
}

/// Check if a built-in transform exists
pub fn contains(name: &str) -> bool {
    lookup(name).is_ok()
}

/// Get all built-in transform names
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(n, _)| *n)
}

/// Apply the named transform to `input`.
///
/// Empty input becomes [`UNTITLED`] first. An unknown name is logged and
/// `input` is echoed back unchanged.
pub fn resolve(name: &str, input: &str) -> String {
    match lookup(name) {
        Ok(transform) => {
            let arg = if input.is_empty() { UNTITLED } else { input };
            transform(arg)
        }
        Err(e) => {
            error!("{}", e);
            input.to_string()
        }
    }
}

fn identity(s: &str) -> String {
    s.to_string()
}

fn slugify(s: &str) -> String {
    s.to_kebab_case()
}

fn titlecase(s: &str) -> String {
    s.to_title_case()
}

fn snake(s: &str) -> String {
    s.to_snake_case()
}

fn camel(s: &str) -> String {
    s.to_lower_camel_case()
}

fn pascal(s: &str) -> String {
    s.to_pascal_case()
}

fn lower(s: &str) -> String {
    s.to_lowercase()
}

fn upper(s: &str) -> String {
    s.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_aliases() {
        for name in ["identity", "caption", "fileName", "label"] {
            assert_eq!(resolve(name, "My Diagram"), "My Diagram");
        }
    }

    #[test]
    fn test_empty_input_becomes_untitled() {
        assert_eq!(resolve("identity", ""), "untitled");
        assert_eq!(resolve("upper", ""), "UNTITLED");
    }

    #[test]
    fn test_case_transforms() {
        assert_eq!(resolve("slugify", "My Diagram"), "my-diagram");
        assert_eq!(resolve("titlecase", "binary search tree"), "Binary Search Tree");
        assert_eq!(resolve("snake", "My Diagram"), "my_diagram");
        assert_eq!(resolve("camel", "my diagram"), "myDiagram");
        assert_eq!(resolve("pascal", "my diagram"), "MyDiagram");
        assert_eq!(resolve("lower", "ABC"), "abc");
    }

    #[test]
    fn test_unknown_transform_echoes_input() {
        assert_eq!(resolve("reverse", "abc"), "abc");
        assert_eq!(resolve("reverse", ""), "");
    }

    #[test]
    fn test_lookup_not_found() {
        let err = lookup("reverse").unwrap_err();
        assert_eq!(
            err,
            LookupError::NotFound {
                kind: "transform",
                name: "reverse".to_string()
            }
        );
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = names().collect();
        assert!(names.contains(&"slugify"));
        assert!(names.contains(&"fileName"));
        assert!(contains("label"));
        assert!(!contains("Label"));
    }
}
