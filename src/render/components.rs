//! One renderer per catalog kind.

use crate::catalog::props::*;
use crate::catalog::ComponentKind;
use crate::render::html::{attr, class_list, escape_html, flag, opt_attr};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt::Write;
use tracing::debug;

/// Typed props for `kind`.
///
/// When the bag as a whole does not fit, props are taken one at a time and
/// any prop whose value has the wrong shape falls back to its default; the
/// well-typed siblings are kept.
fn typed<T: DeserializeOwned + Default>(kind: ComponentKind, props: &Map<String, Value>) -> T {
    if let Ok(p) = serde_json::from_value(Value::Object(props.clone())) {
        return p;
    }
    let mut accepted = Map::new();
    for (name, value) in props {
        accepted.insert(name.clone(), value.clone());
        if let Err(e) = serde_json::from_value::<T>(Value::Object(accepted.clone())) {
            debug!(kind = kind.tag(), prop = %name, error = %e, "prop does not fit contract, using default");
            accepted.remove(name);
        }
    }
    serde_json::from_value(Value::Object(accepted)).unwrap_or_default()
}

/// Render a known kind. `children` is already-rendered markup and is ignored
/// by kinds that do not accept children.
pub fn render_component(kind: ComponentKind, props: &Map<String, Value>, children: &str) -> String {
    match kind {
        ComponentKind::Card => card(&typed(kind, props), children),
        ComponentKind::Stack => stack(&typed(kind, props), children),
        ComponentKind::Grid => grid(&typed(kind, props), children),
        ComponentKind::Divider => divider(&typed(kind, props)),
        ComponentKind::Heading => heading(&typed(kind, props)),
        ComponentKind::Text => text(&typed(kind, props)),
        ComponentKind::Button => button(&typed(kind, props)),
        ComponentKind::Link => link(&typed(kind, props)),
        ComponentKind::Input => input(&typed(kind, props)),
        ComponentKind::Textarea => textarea(&typed(kind, props)),
        ComponentKind::Select => select(&typed(kind, props)),
        ComponentKind::Checkbox => checkbox(&typed(kind, props)),
        ComponentKind::Radio => radio(&typed(kind, props)),
        ComponentKind::Switch => switch(&typed(kind, props)),
        ComponentKind::Badge => badge(&typed(kind, props)),
        ComponentKind::Alert => alert(&typed(kind, props)),
        ComponentKind::Avatar => avatar(&typed(kind, props)),
        ComponentKind::Image => image(&typed(kind, props)),
        ComponentKind::Progress => progress(&typed(kind, props)),
        ComponentKind::Metric => metric(&typed(kind, props)),
        ComponentKind::Table => table(&typed(kind, props)),
        ComponentKind::List => list(&typed(kind, props)),
    }
}

/// Visible stand-in for a tag the catalog does not know.
pub fn unknown(tag: &str) -> String {
    format!(
        "<div class=\"jr-unknown\"{}>Unknown component: {}</div>",
        attr("data-type", tag),
        escape_html(tag)
    )
}

fn card(p: &CardProps, children: &str) -> String {
    let pad = format!("jr-pad-{}", p.padding());
    let mut out = format!("<div class=\"{}\">", class_list(&["jr-card", &pad], &p.class_name));
    if p.title.is_some() || p.description.is_some() {
        out.push_str("<div class=\"jr-card-header\">");
        if let Some(title) = &p.title {
            let _ = write!(out, "<h3 class=\"jr-card-title\">{}</h3>", escape_html(title));
        }
        if let Some(desc) = &p.description {
            let _ = write!(out, "<p class=\"jr-card-description\">{}</p>", escape_html(desc));
        }
        out.push_str("</div>");
    }
    let _ = write!(out, "<div class=\"jr-card-body\">{}</div></div>", children);
    out
}

fn stack(p: &StackProps, children: &str) -> String {
    let dir = format!("jr-stack-{}", p.direction());
    let gap = format!("jr-gap-{}", p.gap());
    let align = format!("jr-align-{}", p.align());
    format!(
        "<div class=\"{}\">{}</div>",
        class_list(&["jr-stack", &dir, &gap, &align], &p.class_name),
        children
    )
}

fn grid(p: &GridProps, children: &str) -> String {
    let cols = format!("jr-grid-cols-{}", p.columns());
    let gap = format!("jr-gap-{}", p.gap());
    format!(
        "<div class=\"{}\">{}</div>",
        class_list(&["jr-grid", &cols, &gap], &p.class_name),
        children
    )
}

fn divider(p: &DividerProps) -> String {
    match &p.label {
        Some(label) => format!(
            "<div class=\"{}\" role=\"separator\"><span>{}</span></div>",
            class_list(&["jr-divider", "jr-divider-labeled"], &p.class_name),
            escape_html(label)
        ),
        None => format!("<hr class=\"{}\">", class_list(&["jr-divider"], &p.class_name)),
    }
}

fn heading(p: &HeadingProps) -> String {
    let level = p.level();
    format!(
        "<h{lvl} class=\"{}\">{}</h{lvl}>",
        class_list(&["jr-heading"], &p.class_name),
        escape_html(&p.text),
        lvl = level
    )
}

fn text(p: &TextProps) -> String {
    let variant = format!("jr-text-{}", p.variant());
    format!(
        "<p class=\"{}\">{}</p>",
        class_list(&["jr-text", &variant], &p.class_name),
        escape_html(&p.content)
    )
}

fn button(p: &ButtonProps) -> String {
    let variant = format!("jr-button-{}", p.variant());
    let size = format!("jr-button-{}", p.size());
    format!(
        "<button type=\"button\" class=\"{}\"{}{}>{}</button>",
        class_list(&["jr-button", &variant, &size], &p.class_name),
        opt_attr("data-action", p.action.as_deref()),
        flag("disabled", p.disabled),
        escape_html(p.label())
    )
}

fn link(p: &LinkProps) -> String {
    format!(
        "<a class=\"{}\"{}>{}</a>",
        class_list(&["jr-link"], &p.class_name),
        attr("href", p.href()),
        escape_html(&p.label)
    )
}

/// Label + control wrapper shared by the form inputs.
fn field(label: Option<&str>, name: &str, control: &str, extra: &[String]) -> String {
    let mut out = format!("<div class=\"{}\">", class_list(&["jr-field"], extra));
    if let Some(label) = label {
        let for_attr = if name.is_empty() { String::new() } else { attr("for", name) };
        let _ = write!(out, "<label class=\"jr-label\"{}>{}</label>", for_attr, escape_html(label));
    }
    out.push_str(control);
    out.push_str("</div>");
    out
}

fn name_attrs(name: &str) -> String {
    if name.is_empty() {
        String::new()
    } else {
        format!("{}{}", attr("id", name), attr("name", name))
    }
}

fn input(p: &InputProps) -> String {
    let control = format!(
        "<input class=\"jr-input\"{}{}{}{}>",
        attr("type", p.input_type()),
        name_attrs(&p.name),
        opt_attr("placeholder", p.placeholder.as_deref()),
        flag("required", p.required)
    );
    field(p.label.as_deref(), &p.name, &control, &p.class_name)
}

fn textarea(p: &TextareaProps) -> String {
    let control = format!(
        "<textarea class=\"jr-textarea\"{}{}{}></textarea>",
        name_attrs(&p.name),
        attr("rows", &p.rows().to_string()),
        opt_attr("placeholder", p.placeholder.as_deref())
    );
    field(p.label.as_deref(), &p.name, &control, &p.class_name)
}

fn select(p: &SelectProps) -> String {
    let mut control = format!("<select class=\"jr-select\"{}>", name_attrs(&p.name));
    if let Some(ph) = &p.placeholder {
        let _ = write!(control, "<option value=\"\" disabled selected>{}</option>", escape_html(ph));
    }
    for opt in &p.options {
        let _ = write!(
            control,
            "<option{}>{}</option>",
            attr("value", opt.value()),
            escape_html(opt.label())
        );
    }
    control.push_str("</select>");
    field(p.label.as_deref(), &p.name, &control, &p.class_name)
}

fn checkbox(p: &CheckboxProps) -> String {
    format!(
        "<label class=\"{}\"><input type=\"checkbox\"{}{}><span>{}</span></label>",
        class_list(&["jr-checkbox"], &p.class_name),
        opt_attr("name", Some(p.name.as_str()).filter(|n| !n.is_empty())),
        flag("checked", p.checked),
        escape_html(&p.label)
    )
}

fn radio(p: &RadioProps) -> String {
    let mut out = format!(
        "<fieldset class=\"{}\">",
        class_list(&["jr-radio-group"], &p.class_name)
    );
    if let Some(label) = &p.label {
        let _ = write!(out, "<legend>{}</legend>", escape_html(label));
    }
    for opt in &p.options {
        let checked = p.value.as_deref() == Some(opt.value());
        let _ = write!(
            out,
            "<label class=\"jr-radio\"><input type=\"radio\"{}{}{}><span>{}</span></label>",
            opt_attr("name", Some(p.name.as_str()).filter(|n| !n.is_empty())),
            attr("value", opt.value()),
            flag("checked", checked),
            escape_html(opt.label())
        );
    }
    out.push_str("</fieldset>");
    out
}

fn switch(p: &SwitchProps) -> String {
    format!(
        "<label class=\"{}\"><input type=\"checkbox\" role=\"switch\"{}{}><span>{}</span></label>",
        class_list(&["jr-switch"], &p.class_name),
        opt_attr("name", Some(p.name.as_str()).filter(|n| !n.is_empty())),
        flag("checked", p.checked),
        escape_html(&p.label)
    )
}

fn badge(p: &BadgeProps) -> String {
    let variant = format!("jr-badge-{}", p.variant());
    format!(
        "<span class=\"{}\">{}</span>",
        class_list(&["jr-badge", &variant], &p.class_name),
        escape_html(&p.text)
    )
}

fn alert(p: &AlertProps) -> String {
    let variant = format!("jr-alert-{}", p.variant());
    let mut out = format!(
        "<div class=\"{}\" role=\"alert\">",
        class_list(&["jr-alert", &variant], &p.class_name)
    );
    if let Some(title) = &p.title {
        let _ = write!(out, "<strong class=\"jr-alert-title\">{}</strong>", escape_html(title));
    }
    let _ = write!(out, "<p class=\"jr-alert-message\">{}</p></div>", escape_html(&p.message));
    out
}

fn avatar(p: &AvatarProps) -> String {
    let size = format!("jr-avatar-{}", p.size());
    let classes = class_list(&["jr-avatar", &size], &p.class_name);
    match &p.src {
        Some(src) if !src.is_empty() => format!(
            "<img class=\"{}\"{}{}>",
            classes,
            attr("src", src),
            attr("alt", &p.name)
        ),
        _ => format!(
            "<span class=\"{}\"{}>{}</span>",
            classes,
            attr("aria-label", &p.name),
            escape_html(&p.initials())
        ),
    }
}

fn image(p: &ImageProps) -> String {
    format!(
        "<img class=\"{}\"{}{}{}{}>",
        class_list(&["jr-image"], &p.class_name),
        attr("src", &p.src),
        attr("alt", &p.alt),
        opt_attr("width", p.width.map(|w| w.to_string()).as_deref()),
        opt_attr("height", p.height.map(|h| h.to_string()).as_deref())
    )
}

fn progress(p: &ProgressProps) -> String {
    let mut out = format!("<div class=\"{}\">", class_list(&["jr-progress"], &p.class_name));
    if let Some(label) = &p.label {
        let _ = write!(out, "<span class=\"jr-progress-label\">{}</span>", escape_html(label));
    }
    let _ = write!(
        out,
        "<progress{}{}>{}%</progress></div>",
        attr("value", &p.value().to_string()),
        attr("max", &p.max().to_string()),
        p.percent()
    );
    out
}

fn metric(p: &MetricProps) -> String {
    let trend = format!("jr-trend-{}", p.trend());
    let mut out = format!(
        "<div class=\"{}\"><span class=\"jr-metric-label\">{}</span><span class=\"jr-metric-value\">{}</span>",
        class_list(&["jr-metric", &trend], &p.class_name),
        escape_html(&p.label),
        escape_html(&value_text(&p.value))
    );
    if let Some(change) = &p.change {
        let _ = write!(out, "<span class=\"jr-metric-change\">{}</span>", escape_html(change));
    }
    out.push_str("</div>");
    out
}

fn table(p: &TableProps) -> String {
    let mut out = format!("<table class=\"{}\">", class_list(&["jr-table"], &p.class_name));
    if !p.columns.is_empty() {
        out.push_str("<thead><tr>");
        for col in &p.columns {
            let _ = write!(out, "<th>{}</th>", escape_html(col));
        }
        out.push_str("</tr></thead>");
    }
    out.push_str("<tbody>");
    for row in &p.rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{}</td>", escape_html(&value_text(cell)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

fn list(p: &ListProps) -> String {
    let tag = if p.ordered { "ol" } else { "ul" };
    let mut out = format!("<{} class=\"{}\">", tag, class_list(&["jr-list"], &p.class_name));
    for item in &p.items {
        let _ = write!(out, "<li>{}</li>", escape_html(item));
    }
    let _ = write!(out, "</{}>", tag);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_button_defaults() {
        let html = render_component(ComponentKind::Button, &Map::new(), "");
        assert_eq!(
            html,
            "<button type=\"button\" class=\"jr-button jr-button-primary jr-button-md\">Button</button>"
        );
    }

    #[test]
    fn test_bad_props_fall_back_to_defaults() {
        let html = render_component(ComponentKind::Heading, &props(json!({"text": 5})), "");
        assert_eq!(html, "<h2 class=\"jr-heading\"></h2>");
    }

    #[test]
    fn test_one_bad_prop_keeps_its_siblings() {
        let html = render_component(
            ComponentKind::Button,
            &props(json!({"label": "Send Message", "variant": "danger", "disabled": "false"})),
            "",
        );
        assert_eq!(
            html,
            "<button type=\"button\" class=\"jr-button jr-button-danger jr-button-md\">Send Message</button>"
        );

        let html = render_component(
            ComponentKind::Heading,
            &props(json!({"text": "Pricing", "level": "big", "className": ["hero"]})),
            "",
        );
        assert_eq!(html, "<h2 class=\"jr-heading hero\">Pricing</h2>");

        let html = render_component(
            ComponentKind::Input,
            &props(json!({"label": "Email", "name": "email", "type": "email", "required": "yes"})),
            "",
        );
        assert!(html.contains("type=\"email\""));
        assert!(html.contains(">Email</label>"));
        assert!(!html.contains("required"));
    }

    #[test]
    fn test_leaf_ignores_children_markup() {
        let html = render_component(ComponentKind::Text, &props(json!({"content": "hi"})), "<b>x</b>");
        assert_eq!(html, "<p class=\"jr-text jr-text-body\">hi</p>");
    }

    #[test]
    fn test_input_with_label_and_type() {
        let html = render_component(
            ComponentKind::Input,
            &props(json!({"label": "Email", "name": "email", "type": "email", "required": true})),
            "",
        );
        assert_eq!(
            html,
            "<div class=\"jr-field\"><label class=\"jr-label\" for=\"email\">Email</label>\
             <input class=\"jr-input\" type=\"email\" id=\"email\" name=\"email\" required></div>"
        );
    }

    #[test]
    fn test_card_header_and_class_override() {
        let html = render_component(
            ComponentKind::Card,
            &props(json!({"title": "A & B", "padding": "lg", "className": ["shadow"]})),
            "<p>c</p>",
        );
        assert!(html.starts_with("<div class=\"jr-card jr-pad-lg shadow\">"));
        assert!(html.contains("<h3 class=\"jr-card-title\">A &amp; B</h3>"));
        assert!(html.contains("<div class=\"jr-card-body\"><p>c</p></div>"));
    }

    #[test]
    fn test_unknown_placeholder_names_type() {
        let html = unknown("Carousel<x>");
        assert!(html.contains("Unknown component: Carousel&lt;x&gt;"));
    }

    #[test]
    fn test_data_display_kinds() {
        let html = render_component(
            ComponentKind::Table,
            &props(json!({"columns": ["Name", "Qty"], "rows": [["apple", 3]]})),
            "",
        );
        assert!(html.contains("<th>Qty</th>"));
        assert!(html.contains("<td>apple</td><td>3</td>"));

        let html = render_component(ComponentKind::Progress, &props(json!({"value": 42})), "");
        assert!(html.contains(">42%</progress>"));

        let html = render_component(ComponentKind::Avatar, &props(json!({"name": "Grace Hopper"})), "");
        assert!(html.contains(">GH</span>"));

        let html = render_component(ComponentKind::List, &props(json!({"items": ["a"], "ordered": true})), "");
        assert_eq!(html, "<ol class=\"jr-list\"><li>a</li></ol>");
    }
}
