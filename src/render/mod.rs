//! 渲染模块：把 UI 树映射为 HTML 片段。
//!
//! # Render Module
//!
//! Total mapping from `(type tag, props, children)` to markup. Known tags
//! dispatch over [`ComponentKind`]; unknown tags become a labeled placeholder.
//! Containers resolve child keys through the tree and skip keys that do not
//! resolve.
//!
//! ```rust
//! use json_render_playground::render::Renderer;
//! use json_render_playground::types::{Element, UiTree};
//!
//! let tree = UiTree::empty()
//!     .with_root("box")
//!     .with_element("box", Element::new("box", "Stack").with_children(["hi", "missing"]))
//!     .with_element("hi", Element::new("hi", "Text").with_prop("content", "Hello"));
//!
//! let html = Renderer::new().render_tree(&tree);
//! assert!(html.contains("Hello"));
//! ```

pub mod components;
pub mod html;

use crate::catalog::ComponentKind;
use crate::types::UiTree;
use serde_json::{Map, Value};
use tracing::debug;

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone)]
pub struct Renderer {
    max_depth: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Render from the root. No root, or a dangling root, renders as `""`.
    pub fn render_tree(&self, tree: &UiTree) -> String {
        match tree.root() {
            Some(root) => {
                let mut path = Vec::new();
                self.render_key(tree, root, &mut path)
            }
            None => String::new(),
        }
    }

    /// Render a single element given its tag, props and already-rendered children.
    pub fn render_element(&self, tag: &str, props: &Map<String, Value>, children: &str) -> String {
        match ComponentKind::from_tag(tag) {
            Some(kind) => components::render_component(kind, props, children),
            None => components::unknown(tag),
        }
    }

    /// `path` holds the keys currently being rendered, for cycle detection.
    fn render_key<'t>(&self, tree: &'t UiTree, key: &'t str, path: &mut Vec<&'t str>) -> String {
        let Some(element) = tree.get(key) else {
            return String::new();
        };
        if path.contains(&key) {
            debug!(key, "skipping cyclic child reference");
            return String::new();
        }
        if path.len() >= self.max_depth {
            debug!(key, depth = path.len(), "max render depth reached");
            return String::new();
        }

        let accepts_children = ComponentKind::from_tag(&element.kind)
            .map(ComponentKind::accepts_children)
            .unwrap_or(false);

        let children = if accepts_children {
            path.push(key);
            let html: String = element
                .children
                .iter()
                .map(|child| self.render_key(tree, child, path))
                .collect();
            path.pop();
            html
        } else {
            String::new()
        };

        self.render_element(&element.kind, &element.props, &children)
    }
}

/// Render with default settings.
pub fn render_tree(tree: &UiTree) -> String {
    Renderer::new().render_tree(tree)
}
