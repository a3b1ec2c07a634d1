//! 类型系统模块：UI 树、元素记录与补丁行。
//!
//! # Types Module
//!
//! Core data model for streamed UI generation.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`UiTree`] | Root key plus persistent key → element map |
//! | [`Element`] | Node with catalog tag, props and ordered child keys |
//! | [`Patch`] | One protocol line (`set`/`add` on `/root` or `/elements/{key}`) |
//!
//! ## Example
//!
//! ```rust
//! use json_render_playground::types::{Element, Patch, UiTree};
//!
//! let card = Element::new("card", "Card").with_children(["title"]);
//! let line = Patch::add_element(&card).to_line();
//! assert!(line.contains("/elements/card"));
//!
//! let tree = UiTree::empty().with_root("card").with_element("card", card);
//! assert_eq!(tree.root_element().map(|e| e.kind.as_str()), Some("Card"));
//! ```

pub mod patch;
pub mod tree;

pub use patch::{Patch, PatchOp, PatchTarget};
pub use tree::{Element, UiTree};
