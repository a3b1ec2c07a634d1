//! Checks elements against the catalog contract.
//!
//! The renderer never needs this (it falls back to defaults); it exists for
//! offline inspection of recorded generations.

use crate::catalog::{schema_for_kind, ComponentKind};
use crate::types::{Element, UiTree};
use crate::{Error, ErrorContext, Result};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    /// Key of the offending element (or the root key for a dangling root).
    pub key: String,
    pub message: String,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

fn issue(key: &str, message: impl Into<String>) -> CatalogIssue {
    CatalogIssue {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate one element record against its kind's props schema.
pub fn validate_element(key: &str, element: &Element) -> Vec<CatalogIssue> {
    let kind = match ComponentKind::from_tag(&element.kind) {
        Some(kind) => kind,
        None => return vec![issue(key, format!("unknown component type '{}'", element.kind))],
    };

    let mut issues = Vec::new();
    if !element.children.is_empty() && !kind.accepts_children() {
        issues.push(issue(
            key,
            format!("{} does not accept children; {} ignored", kind, element.children.len()),
        ));
    }

    let schema = schema_for_kind(kind);
    let compiled = match JSONSchema::compile(&schema) {
        Ok(compiled) => compiled,
        Err(e) => {
            issues.push(issue(key, format!("schema for {} failed to compile: {}", kind, e)));
            return issues;
        }
    };

    let instance = Value::Object(element.props.clone());
    if let Err(errors) = compiled.validate(&instance) {
        for e in errors {
            let path = e.instance_path.to_string();
            let at = if path.is_empty() { "props".to_string() } else { format!("props{}", path) };
            issues.push(issue(key, format!("{}: {}", at, e)));
        }
    }
    issues
}

/// Validate every element and every reference in the tree.
pub fn validate_tree(tree: &UiTree) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    match tree.root() {
        None => issues.push(issue("", "tree has no root")),
        Some(root) if tree.get(root).is_none() => {
            issues.push(issue(root, "root key does not resolve to an element"))
        }
        Some(_) => {}
    }

    for key in tree.keys() {
        let Some(element) = tree.get(key) else {
            continue;
        };
        issues.extend(validate_element(key, element));
        for child in &element.children {
            if tree.get(child).is_none() {
                issues.push(issue(key, format!("child '{}' does not resolve", child)));
            }
        }
    }
    issues
}

/// `validate_tree` as a `Result`: the first offending key becomes the field
/// path, every issue goes into the details.
pub fn ensure_valid(tree: &UiTree) -> Result<()> {
    let issues = validate_tree(tree);
    let Some(first) = issues.first() else {
        return Ok(());
    };
    let details = issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(Error::validation_with_context(
        format!("{} catalog issue(s)", issues.len()),
        ErrorContext::new()
            .with_field_path(first.key.clone())
            .with_details(details)
            .with_source("catalog_validator"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_element_has_no_issues() {
        let el = Element::new("b", "Button")
            .with_prop("label", "Go")
            .with_prop("className", json!(["wide"]));
        assert!(validate_element("b", &el).is_empty());
    }

    #[test]
    fn test_wrong_prop_type_is_reported() {
        let el = Element::new("b", "Button").with_prop("disabled", "yes");
        let issues = validate_element("b", &el);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("disabled"), "{}", issues[0]);
    }

    #[test]
    fn test_unknown_kind_and_stray_children() {
        let issues = validate_element("x", &Element::new("x", "Carousel"));
        assert!(issues[0].message.contains("Carousel"));

        let el = Element::new("t", "Text").with_children(["a"]);
        let issues = validate_element("t", &el);
        assert!(issues.iter().any(|i| i.message.contains("does not accept children")));
    }

    #[test]
    fn test_dangling_references() {
        let tree = UiTree::empty()
            .with_root("card")
            .with_element("card", Element::new("card", "Card").with_children(["gone"]));
        let issues = validate_tree(&tree);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "card");

        let issues = validate_tree(&UiTree::empty().with_root("nowhere"));
        assert_eq!(issues[0].key, "nowhere");
    }

    #[test]
    fn test_ensure_valid_reports_first_key() {
        let tree = UiTree::empty()
            .with_root("card")
            .with_element("card", Element::new("card", "Card").with_children(["gone"]));
        let err = ensure_valid(&tree).unwrap_err();
        assert_eq!(err.context().and_then(|c| c.field_path.as_deref()), Some("card"));
        assert!(err.to_string().contains("gone"));

        let ok = UiTree::empty()
            .with_root("b")
            .with_element("b", Element::new("b", "Badge").with_prop("text", "new"));
        assert!(ensure_valid(&ok).is_ok());
    }
}
