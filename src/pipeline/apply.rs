//! Patch application: `(tree, patch) -> tree`.

use crate::types::{Element, Patch, PatchTarget, UiTree};
use serde::Deserialize;
use tracing::debug;

/// Apply one patch and return the next snapshot. The input tree is never touched.
///
/// - `/root` with a string value replaces the root key.
/// - `/elements/{key}/...` with an element record replaces that key wholesale.
/// - Any other op, path or value shape is a no-op.
pub fn apply_patch(tree: &UiTree, patch: &Patch) -> UiTree {
    if !patch.op.is_write() {
        debug!(path = %patch.path, "ignoring patch with unsupported op");
        return tree.clone();
    }

    match patch.target() {
        PatchTarget::Root => match patch.value.as_str() {
            Some(key) => tree.with_root(key),
            None => {
                debug!(value = %patch.value, "ignoring non-string /root value");
                tree.clone()
            }
        },
        PatchTarget::Element(key) => match Element::deserialize(&patch.value) {
            Ok(element) => tree.with_element(key, element),
            Err(e) => {
                debug!(key, error = %e, "ignoring malformed element record");
                tree.clone()
            }
        },
        PatchTarget::Unsupported => {
            debug!(path = %patch.path, "ignoring patch with unsupported path");
            tree.clone()
        }
    }
}

/// Fold a sequence of patches in arrival order.
pub fn apply_all<'a, I>(tree: &UiTree, patches: I) -> UiTree
where
    I: IntoIterator<Item = &'a Patch>,
{
    patches
        .into_iter()
        .fold(tree.clone(), |acc, patch| apply_patch(&acc, patch))
}
