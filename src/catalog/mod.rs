//! 组件目录模块：固定的组件种类集合及其属性契约。
//!
//! # Catalog Module
//!
//! The closed set of component kinds the renderer understands. Each kind
//! declares its props (see [`props`]), whether it takes children, and exports
//! its contract as JSON Schema.
//!
//! | Category | Kinds |
//! |----------|-------|
//! | Layout | Card, Stack, Grid, Divider |
//! | Typography | Heading, Text |
//! | Action | Button, Link |
//! | Form input | Input, Textarea, Select, Checkbox, Radio, Switch |
//! | Data display | Badge, Alert, Avatar, Image, Progress, Metric, Table, List |

pub mod props;
pub mod validator;

pub use validator::{ensure_valid, validate_element, validate_tree, CatalogIssue};

use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentKind {
    Card,
    Stack,
    Grid,
    Divider,
    Heading,
    Text,
    Button,
    Link,
    Input,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Switch,
    Badge,
    Alert,
    Avatar,
    Image,
    Progress,
    Metric,
    Table,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Layout,
    Typography,
    Action,
    FormInput,
    DataDisplay,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Layout => "layout",
            Category::Typography => "typography",
            Category::Action => "action",
            Category::FormInput => "form",
            Category::DataDisplay => "data",
        }
    }
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 22] = [
        ComponentKind::Card,
        ComponentKind::Stack,
        ComponentKind::Grid,
        ComponentKind::Divider,
        ComponentKind::Heading,
        ComponentKind::Text,
        ComponentKind::Button,
        ComponentKind::Link,
        ComponentKind::Input,
        ComponentKind::Textarea,
        ComponentKind::Select,
        ComponentKind::Checkbox,
        ComponentKind::Radio,
        ComponentKind::Switch,
        ComponentKind::Badge,
        ComponentKind::Alert,
        ComponentKind::Avatar,
        ComponentKind::Image,
        ComponentKind::Progress,
        ComponentKind::Metric,
        ComponentKind::Table,
        ComponentKind::List,
    ];

    /// Exact, case-sensitive match on the element's `type` tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            ComponentKind::Card => "Card",
            ComponentKind::Stack => "Stack",
            ComponentKind::Grid => "Grid",
            ComponentKind::Divider => "Divider",
            ComponentKind::Heading => "Heading",
            ComponentKind::Text => "Text",
            ComponentKind::Button => "Button",
            ComponentKind::Link => "Link",
            ComponentKind::Input => "Input",
            ComponentKind::Textarea => "Textarea",
            ComponentKind::Select => "Select",
            ComponentKind::Checkbox => "Checkbox",
            ComponentKind::Radio => "Radio",
            ComponentKind::Switch => "Switch",
            ComponentKind::Badge => "Badge",
            ComponentKind::Alert => "Alert",
            ComponentKind::Avatar => "Avatar",
            ComponentKind::Image => "Image",
            ComponentKind::Progress => "Progress",
            ComponentKind::Metric => "Metric",
            ComponentKind::Table => "Table",
            ComponentKind::List => "List",
        }
    }

    /// Only containers resolve their `children` keys.
    pub fn accepts_children(self) -> bool {
        matches!(
            self,
            ComponentKind::Card | ComponentKind::Stack | ComponentKind::Grid
        )
    }

    pub fn category(self) -> Category {
        use ComponentKind::*;
        match self {
            Card | Stack | Grid | Divider => Category::Layout,
            Heading | Text => Category::Typography,
            Button | Link => Category::Action,
            Input | Textarea | Select | Checkbox | Radio | Switch => Category::FormInput,
            Badge | Alert | Avatar | Image | Progress | Metric | Table | List => {
                Category::DataDisplay
            }
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ComponentKind::Card => "Container with optional title and description",
            ComponentKind::Stack => "Vertical or horizontal flex container",
            ComponentKind::Grid => "Grid container with a fixed column count",
            ComponentKind::Divider => "Horizontal separator, optionally labeled",
            ComponentKind::Heading => "Section heading",
            ComponentKind::Text => "Paragraph of text",
            ComponentKind::Button => "Clickable button",
            ComponentKind::Link => "Hyperlink",
            ComponentKind::Input => "Single-line text input with label",
            ComponentKind::Textarea => "Multi-line text input with label",
            ComponentKind::Select => "Dropdown of options",
            ComponentKind::Checkbox => "Checkbox with label",
            ComponentKind::Radio => "Group of radio options",
            ComponentKind::Switch => "On/off toggle",
            ComponentKind::Badge => "Small status label",
            ComponentKind::Alert => "Callout message",
            ComponentKind::Avatar => "User picture or initials",
            ComponentKind::Image => "Image",
            ComponentKind::Progress => "Progress bar",
            ComponentKind::Metric => "Single KPI with optional change and trend",
            ComponentKind::Table => "Table with header row",
            ComponentKind::List => "Bulleted or numbered list",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// JSON Schema of one kind's props.
pub fn schema_for_kind(kind: ComponentKind) -> Value {
    use props::*;
    let schema = match kind {
        ComponentKind::Card => schemars::schema_for!(CardProps),
        ComponentKind::Stack => schemars::schema_for!(StackProps),
        ComponentKind::Grid => schemars::schema_for!(GridProps),
        ComponentKind::Divider => schemars::schema_for!(DividerProps),
        ComponentKind::Heading => schemars::schema_for!(HeadingProps),
        ComponentKind::Text => schemars::schema_for!(TextProps),
        ComponentKind::Button => schemars::schema_for!(ButtonProps),
        ComponentKind::Link => schemars::schema_for!(LinkProps),
        ComponentKind::Input => schemars::schema_for!(InputProps),
        ComponentKind::Textarea => schemars::schema_for!(TextareaProps),
        ComponentKind::Select => schemars::schema_for!(SelectProps),
        ComponentKind::Checkbox => schemars::schema_for!(CheckboxProps),
        ComponentKind::Radio => schemars::schema_for!(RadioProps),
        ComponentKind::Switch => schemars::schema_for!(SwitchProps),
        ComponentKind::Badge => schemars::schema_for!(BadgeProps),
        ComponentKind::Alert => schemars::schema_for!(AlertProps),
        ComponentKind::Avatar => schemars::schema_for!(AvatarProps),
        ComponentKind::Image => schemars::schema_for!(ImageProps),
        ComponentKind::Progress => schemars::schema_for!(ProgressProps),
        ComponentKind::Metric => schemars::schema_for!(MetricProps),
        ComponentKind::Table => schemars::schema_for!(TableProps),
        ComponentKind::List => schemars::schema_for!(ListProps),
    };
    serde_json::to_value(schema).unwrap_or(Value::Null)
}

static CATALOG_SCHEMA: Lazy<Value> = Lazy::new(|| {
    let components: Map<String, Value> = ComponentKind::ALL
        .iter()
        .map(|kind| {
            (
                kind.tag().to_string(),
                json!({
                    "description": kind.description(),
                    "category": kind.category().as_str(),
                    "acceptsChildren": kind.accepts_children(),
                    "props": schema_for_kind(*kind),
                }),
            )
        })
        .collect();
    json!({ "components": components })
});

/// The whole catalog: `{ "components": { Tag: { description, category, acceptsChildren, props } } }`.
pub fn catalog_schema() -> &'static Value {
    &CATALOG_SCHEMA
}
