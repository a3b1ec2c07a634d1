//! Patch lines of the streamed UI protocol.

use crate::types::tree::Element;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ROOT_PATH: &str = "/root";
pub const ELEMENTS_PREFIX: &str = "/elements/";

/// Patch operation. Unknown ops are kept so the applier can ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Set,
    Add,
    #[serde(other)]
    Other,
}

impl PatchOp {
    pub fn is_write(self) -> bool {
        matches!(self, PatchOp::Set | PatchOp::Add)
    }
}

/// One line of the protocol: `{ "op": "set"|"add", "path": "...", "value": ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub op: PatchOp,
    pub path: String,
    #[serde(default)]
    pub value: Value,
}

/// What a patch path addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchTarget<'a> {
    Root,
    /// First segment after `/elements/`; deeper segments are ignored.
    Element(&'a str),
    Unsupported,
}

impl Patch {
    pub fn new(op: PatchOp, path: impl Into<String>, value: Value) -> Self {
        Self {
            op,
            path: path.into(),
            value,
        }
    }

    pub fn set_root(key: impl Into<String>) -> Self {
        Self::new(PatchOp::Set, ROOT_PATH, Value::String(key.into()))
    }

    pub fn add_element(element: &Element) -> Self {
        Self::new(
            PatchOp::Add,
            format!("{}{}", ELEMENTS_PREFIX, element.key),
            serde_json::to_value(element).unwrap_or(Value::Null),
        )
    }

    pub fn target(&self) -> PatchTarget<'_> {
        if self.path == ROOT_PATH {
            return PatchTarget::Root;
        }
        match self.path.strip_prefix(ELEMENTS_PREFIX) {
            Some(rest) => {
                let key = rest.split('/').next().unwrap_or("");
                if key.is_empty() {
                    PatchTarget::Unsupported
                } else {
                    PatchTarget::Element(key)
                }
            }
            None => PatchTarget::Unsupported,
        }
    }

    /// Serialize as one protocol line (no trailing newline).
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_op_is_preserved_as_other() {
        let p: Patch =
            serde_json::from_value(json!({"op": "remove", "path": "/root", "value": "x"})).unwrap();
        assert_eq!(p.op, PatchOp::Other);
        assert!(!p.op.is_write());
    }

    #[test]
    fn test_target_uses_first_segment_only() {
        let p = Patch::new(PatchOp::Set, "/elements/card/props/title", json!("x"));
        assert_eq!(p.target(), PatchTarget::Element("card"));

        let p = Patch::new(PatchOp::Add, "/elements/", json!({}));
        assert_eq!(p.target(), PatchTarget::Unsupported);

        let p = Patch::new(PatchOp::Set, "/state/x", json!(1));
        assert_eq!(p.target(), PatchTarget::Unsupported);

        assert_eq!(Patch::set_root("card").target(), PatchTarget::Root);
    }

    #[test]
    fn test_missing_value_defaults_to_null() {
        let p: Patch = serde_json::from_str(r#"{"op":"add","path":"/elements/x"}"#).unwrap();
        assert_eq!(p.value, Value::Null);
    }
}
