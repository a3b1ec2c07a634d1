//! Typed props for each catalog kind.
//!
//! Every field is optional on the wire. Defaults and variant fallbacks are
//! resolved by the accessor methods so the renderer and the exported schema
//! agree on one contract.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `none | sm | md | lg`, defaulting to `md`.
fn spacing(v: Option<&str>) -> &'static str {
    match v {
        Some("none") => "none",
        Some("sm") => "sm",
        Some("lg") => "lg",
        _ => "md",
    }
}

/// `sm | md | lg`, defaulting to `md`.
fn size(v: Option<&str>) -> &'static str {
    match v {
        Some("sm") => "sm",
        Some("lg") => "lg",
        _ => "md",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CardProps {
    pub title: Option<String>,
    pub description: Option<String>,
    /// none | sm | md | lg
    pub padding: Option<String>,
    pub class_name: Vec<String>,
}

impl CardProps {
    pub fn padding(&self) -> &'static str {
        spacing(self.padding.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct StackProps {
    /// vertical | horizontal
    pub direction: Option<String>,
    /// none | sm | md | lg
    pub gap: Option<String>,
    /// start | center | end | stretch
    pub align: Option<String>,
    pub class_name: Vec<String>,
}

impl StackProps {
    pub fn direction(&self) -> &'static str {
        match self.direction.as_deref() {
            Some("horizontal") => "horizontal",
            _ => "vertical",
        }
    }

    pub fn gap(&self) -> &'static str {
        spacing(self.gap.as_deref())
    }

    pub fn align(&self) -> &'static str {
        match self.align.as_deref() {
            Some("start") => "start",
            Some("center") => "center",
            Some("end") => "end",
            _ => "stretch",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GridProps {
    /// 1..=6
    pub columns: Option<i64>,
    /// none | sm | md | lg
    pub gap: Option<String>,
    pub class_name: Vec<String>,
}

impl GridProps {
    pub fn columns(&self) -> i64 {
        self.columns.unwrap_or(2).clamp(1, 6)
    }

    pub fn gap(&self) -> &'static str {
        spacing(self.gap.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DividerProps {
    pub label: Option<String>,
    pub class_name: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadingProps {
    pub text: String,
    /// 1..=6
    pub level: Option<i64>,
    pub class_name: Vec<String>,
}

impl HeadingProps {
    pub fn level(&self) -> i64 {
        self.level.unwrap_or(2).clamp(1, 6)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub content: String,
    /// body | caption | muted | lead
    pub variant: Option<String>,
    pub class_name: Vec<String>,
}

impl TextProps {
    pub fn variant(&self) -> &'static str {
        match self.variant.as_deref() {
            Some("caption") => "caption",
            Some("muted") => "muted",
            Some("lead") => "lead",
            _ => "body",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonProps {
    pub label: Option<String>,
    /// primary | secondary | outline | ghost | danger
    pub variant: Option<String>,
    /// sm | md | lg
    pub size: Option<String>,
    pub disabled: bool,
    /// Opaque action name, surfaced as `data-action`.
    pub action: Option<String>,
    pub class_name: Vec<String>,
}

impl ButtonProps {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("Button")
    }

    pub fn variant(&self) -> &'static str {
        match self.variant.as_deref() {
            Some("secondary") => "secondary",
            Some("outline") => "outline",
            Some("ghost") => "ghost",
            Some("danger") => "danger",
            _ => "primary",
        }
    }

    pub fn size(&self) -> &'static str {
        size(self.size.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct LinkProps {
    pub label: String,
    pub href: Option<String>,
    pub class_name: Vec<String>,
}

impl LinkProps {
    /// Falls back to `#` when missing or when it carries a script URL.
    pub fn href(&self) -> &str {
        match self.href.as_deref() {
            Some(h) if !h.trim().to_ascii_lowercase().starts_with("javascript:") => h,
            _ => "#",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct InputProps {
    pub label: Option<String>,
    pub name: String,
    /// text | email | password | number | tel | url
    #[serde(rename = "type")]
    pub input_type: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub class_name: Vec<String>,
}

impl InputProps {
    pub fn input_type(&self) -> &'static str {
        match self.input_type.as_deref() {
            Some("email") => "email",
            Some("password") => "password",
            Some("number") => "number",
            Some("tel") => "tel",
            Some("url") => "url",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TextareaProps {
    pub label: Option<String>,
    pub name: String,
    pub placeholder: Option<String>,
    pub rows: Option<i64>,
    pub class_name: Vec<String>,
}

impl TextareaProps {
    pub fn rows(&self) -> i64 {
        match self.rows {
            Some(r) if r > 0 => r,
            _ => 4,
        }
    }
}

/// Choice for Select and Radio: either a bare string or `{ label, value }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ChoiceOption {
    Plain(String),
    Labeled { label: String, value: String },
}

impl ChoiceOption {
    pub fn label(&self) -> &str {
        match self {
            ChoiceOption::Plain(s) => s,
            ChoiceOption::Labeled { label, .. } => label,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ChoiceOption::Plain(s) => s,
            ChoiceOption::Labeled { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectProps {
    pub label: Option<String>,
    pub name: String,
    pub options: Vec<ChoiceOption>,
    pub placeholder: Option<String>,
    pub class_name: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckboxProps {
    pub label: String,
    pub name: String,
    pub checked: bool,
    pub class_name: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct RadioProps {
    pub label: Option<String>,
    pub name: String,
    pub options: Vec<ChoiceOption>,
    /// Value of the pre-selected option.
    pub value: Option<String>,
    pub class_name: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SwitchProps {
    pub label: String,
    pub name: String,
    pub checked: bool,
    pub class_name: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct BadgeProps {
    pub text: String,
    /// default | success | warning | danger | info
    pub variant: Option<String>,
    pub class_name: Vec<String>,
}

impl BadgeProps {
    pub fn variant(&self) -> &'static str {
        match self.variant.as_deref() {
            Some("success") => "success",
            Some("warning") => "warning",
            Some("danger") => "danger",
            Some("info") => "info",
            _ => "default",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertProps {
    pub title: Option<String>,
    pub message: String,
    /// info | success | warning | error
    #[serde(alias = "type")]
    pub variant: Option<String>,
    pub class_name: Vec<String>,
}

impl AlertProps {
    pub fn variant(&self) -> &'static str {
        match self.variant.as_deref() {
            Some("success") => "success",
            Some("warning") => "warning",
            Some("error") => "error",
            _ => "info",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AvatarProps {
    pub name: String,
    pub src: Option<String>,
    /// sm | md | lg
    pub size: Option<String>,
    pub class_name: Vec<String>,
}

impl AvatarProps {
    pub fn size(&self) -> &'static str {
        size(self.size.as_deref())
    }

    /// Up to two initials taken from the first words of `name`; `?` when empty.
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub class_name: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProgressProps {
    pub value: Option<f64>,
    pub max: Option<f64>,
    pub label: Option<String>,
    pub class_name: Vec<String>,
}

impl ProgressProps {
    pub fn max(&self) -> f64 {
        match self.max {
            Some(m) if m > 0.0 && m.is_finite() => m,
            _ => 100.0,
        }
    }

    pub fn value(&self) -> f64 {
        let v = self.value.filter(|v| v.is_finite()).unwrap_or(0.0);
        v.clamp(0.0, self.max())
    }

    /// Whole percent of `value / max`.
    pub fn percent(&self) -> u32 {
        ((self.value() / self.max()) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct MetricProps {
    pub label: String,
    /// String or number.
    pub value: Value,
    pub change: Option<String>,
    /// up | down | neutral
    pub trend: Option<String>,
    pub class_name: Vec<String>,
}

impl MetricProps {
    pub fn trend(&self) -> &'static str {
        match self.trend.as_deref() {
            Some("up") => "up",
            Some("down") => "down",
            _ => "neutral",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TableProps {
    pub columns: Vec<String>,
    /// Rows of cells; cells may be strings, numbers or booleans.
    pub rows: Vec<Vec<Value>>,
    pub class_name: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ListProps {
    pub items: Vec<String>,
    pub ordered: bool,
    pub class_name: Vec<String>,
}

/// Display text of a loosely typed value: strings unquoted, null empty.
pub fn value_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variant_defaults_and_fallbacks() {
        let b: ButtonProps = serde_json::from_value(json!({"variant": "neon"})).unwrap();
        assert_eq!(b.variant(), "primary");
        assert_eq!(b.size(), "md");
        assert_eq!(b.label(), "Button");

        let a: AlertProps = serde_json::from_value(json!({"type": "error", "message": "x"})).unwrap();
        assert_eq!(a.variant(), "error");

        assert_eq!(StackProps::default().direction(), "vertical");
        assert_eq!(StackProps::default().align(), "stretch");
        assert_eq!(CardProps::default().padding(), "md");
        assert_eq!(TextProps::default().variant(), "body");
        assert_eq!(BadgeProps::default().variant(), "default");
        assert_eq!(MetricProps::default().trend(), "neutral");
    }

    #[test]
    fn test_numeric_clamps() {
        let g: GridProps = serde_json::from_value(json!({"columns": 12})).unwrap();
        assert_eq!(g.columns(), 6);
        assert_eq!(GridProps::default().columns(), 2);

        let h: HeadingProps = serde_json::from_value(json!({"text": "x", "level": 0})).unwrap();
        assert_eq!(h.level(), 1);
        assert_eq!(HeadingProps::default().level(), 2);

        let t: TextareaProps = serde_json::from_value(json!({"rows": -3})).unwrap();
        assert_eq!(t.rows(), 4);

        let p: ProgressProps = serde_json::from_value(json!({"value": 150, "max": 0})).unwrap();
        assert_eq!(p.max(), 100.0);
        assert_eq!(p.value(), 100.0);
        let p: ProgressProps = serde_json::from_value(json!({"value": 1, "max": 3})).unwrap();
        assert_eq!(p.percent(), 33);
    }

    #[test]
    fn test_avatar_initials() {
        let a = AvatarProps {
            name: "ada lovelace byron".into(),
            ..Default::default()
        };
        assert_eq!(a.initials(), "AL");
        assert_eq!(AvatarProps::default().initials(), "?");
    }

    #[test]
    fn test_script_href_is_neutralized() {
        let l = LinkProps {
            href: Some(" JavaScript:alert(1)".into()),
            ..Default::default()
        };
        assert_eq!(l.href(), "#");
        assert_eq!(LinkProps::default().href(), "#");
    }

    #[test]
    fn test_choice_option_shapes() {
        let s: SelectProps = serde_json::from_value(json!({
            "options": ["a", {"label": "Bee", "value": "b"}]
        }))
        .unwrap();
        assert_eq!(s.options[0].value(), "a");
        assert_eq!(s.options[1].label(), "Bee");
        assert_eq!(s.options[1].value(), "b");
        assert_eq!(value_text(&json!(3)), "3");
        assert_eq!(value_text(&json!("x")), "x");
    }
}
