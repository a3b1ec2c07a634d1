//! Small markup helpers shared by the component renderers.

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Space-joined class attribute value: fixed classes first, then the
/// element's `className` overrides. Blank overrides are dropped.
pub fn class_list(base: &[&str], extra: &[String]) -> String {
    let mut classes: Vec<&str> = base.iter().copied().filter(|c| !c.is_empty()).collect();
    classes.extend(
        extra
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty()),
    );
    escape_html(&classes.join(" "))
}

/// ` name="value"` with the value escaped.
pub fn attr(name: &str, value: &str) -> String {
    format!(" {}=\"{}\"", name, escape_html(value))
}

/// `attr` for an optional value; empty when absent.
pub fn opt_attr(name: &str, value: Option<&str>) -> String {
    value.map(|v| attr(name, v)).unwrap_or_default()
}

/// Boolean attribute (` disabled`), empty when false.
pub fn flag(name: &str, on: bool) -> String {
    if on {
        format!(" {}", name)
    } else {
        String::new()
    }
}
