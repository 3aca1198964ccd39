//! Tagged JSON documents for persisting blueprints
//!
//! ```json
//! {
//!     "variable": ["name"],
//!     "dependency": "...",
//!     "factor": { "label": ["$label", "name"] },
//!     "snippet": "...",
//!     "macro": "$inkscape",
//!     "type": "WW-BLUEPRINT"
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::{Blueprint, BlueprintConfig, Factor, Selector};
use crate::error::DocumentError;

/// Type tag identifying the blueprint document schema
pub const DOCUMENT_TYPE: &str = "WW-BLUEPRINT";

/// Borrowed view used for writing, in persisted key order
#[derive(Serialize)]
struct DocumentRef<'a> {
    variable: &'a [String],
    dependency: &'a str,
    factor: &'a BTreeMap<String, Factor>,
    snippet: &'a str,
    #[serde(rename = "macro")]
    macro_selector: &'a Selector,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl Blueprint {
    fn document_ref(&self) -> DocumentRef<'_> {
        DocumentRef {
            variable: &self.variables,
            dependency: &self.dependency,
            factor: &self.factors,
            snippet: &self.snippet,
            macro_selector: &self.macro_selector,
            kind: DOCUMENT_TYPE,
        }
    }

    /// Convert to a tagged document
    pub fn to_document(&self) -> Result<Value, DocumentError> {
        Ok(serde_json::to_value(self.document_ref())?)
    }

    /// Build a blueprint from a tagged document.
    ///
    /// The `type` tag must be exactly [`DOCUMENT_TYPE`]; other fields
    /// default to empty when absent.
    pub fn from_document(document: Value) -> Result<Self, DocumentError> {
        match document.get("type") {
            None => return Err(DocumentError::MissingType),
            Some(Value::String(tag)) if tag == DOCUMENT_TYPE => {}
            Some(other) => {
                let found = match other {
                    Value::String(s) => s.clone(),
                    v => v.to_string(),
                };
                return Err(DocumentError::WrongType {
                    found,
                    expected: DOCUMENT_TYPE,
                });
            }
        }

        let config: BlueprintConfig = serde_json::from_value(document)?;
        Ok(Blueprint::new(config))
    }

    /// Serialize to document text: four-space indent, non-ASCII kept verbatim
    pub fn to_json(&self) -> Result<String, DocumentError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.document_ref().serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Parse document text
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let document: Value = serde_json::from_str(text)?;
        Self::from_document(document)
    }

    /// Read a blueprint document from a UTF-8 file
    pub fn read(path: &Path) -> Result<Self, DocumentError> {
        let text = fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Write this blueprint as a document to a UTF-8 file
    pub fn write(&self, path: &Path) -> Result<(), DocumentError> {
        let text = self.to_json()?;
        fs::write(path, text).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::default_blueprint;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_document_round_trip() {
        let bp = default_blueprint();
        let back = Blueprint::from_document(bp.to_document().unwrap()).unwrap();
        assert_eq!(back, bp);
    }

    #[test]
    fn test_document_shape() {
        let doc = default_blueprint().to_document().unwrap();
        assert_eq!(doc["type"], "WW-BLUEPRINT");
        assert_eq!(doc["variable"], json!(["name"]));
        assert_eq!(doc["factor"]["label"], json!(["$label", "name"]));
        assert_eq!(doc["macro"], "$inkscape");
    }

    #[test]
    fn test_missing_type() {
        let doc = json!({ "variable": ["name"], "snippet": "{name}" });
        assert!(matches!(
            Blueprint::from_document(doc),
            Err(DocumentError::MissingType)
        ));
    }

    #[test]
    fn test_wrong_type() {
        let doc = json!({ "type": "WW-THEME" });
        assert!(matches!(
            Blueprint::from_document(doc),
            Err(DocumentError::WrongType { ref found, .. }) if found == "WW-THEME"
        ));

        let doc = json!({ "type": 1 });
        assert!(matches!(
            Blueprint::from_document(doc),
            Err(DocumentError::WrongType { .. })
        ));
    }

    #[test]
    fn test_fields_default_when_absent() {
        let bp = Blueprint::from_document(json!({ "type": "WW-BLUEPRINT" })).unwrap();
        assert_eq!(bp, Blueprint::new(BlueprintConfig::default()));
    }

    #[test]
    fn test_structural_failure() {
        let doc = json!({ "type": "WW-BLUEPRINT", "factor": { "x": "not-a-pair" } });
        assert!(matches!(
            Blueprint::from_document(doc),
            Err(DocumentError::Json(_))
        ));
    }

    #[test]
    fn test_json_keeps_non_ascii_and_indent() {
        let bp = Blueprint::new(BlueprintConfig {
            variables: vec!["名称".to_string()],
            dependency: "% 图片".to_string(),
            ..Default::default()
        });
        let text = bp.to_json().unwrap();
        assert!(text.contains("\"名称\""));
        assert!(text.contains("% 图片"));
        assert!(text.contains("\n    \"dependency\""));
        assert!(text.starts_with("{\n    \"variable\""));
    }

    #[test]
    fn test_unparsable_text() {
        assert!(matches!(
            Blueprint::from_json("{ not json"),
            Err(DocumentError::Json(_))
        ));
    }
}
