//! 流水线处理模块：把流式补丁行解码并应用到 UI 树。
//!
//! # Pipeline Layer
//!
//! This module turns the raw generation stream into successive UI tree
//! snapshots.
//!
//! ## Pipeline Stages
//!
//! ```text
//! Raw Bytes → Decoder → Patch → apply_patch → Arc<UiTree>
//!     │           │                  │
//!   HTTP      line split,       copy-on-write
//!             skip bad lines    snapshot
//! ```
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`PatchPipeline`] | Decoder + applier over a byte stream |
//! | [`Decoder`] | Trait for stream decoding |
//! | [`decode::LineBuffer`] | Push-based line splitter |
//! | [`apply::apply_patch`] | Pure patch application |
//!
//! ## Example
//!
//! ```rust
//! use json_render_playground::pipeline::replay_text;
//!
//! let tree = replay_text(concat!(
//!     "{\"op\":\"set\",\"path\":\"/root\",\"value\":\"t\"}\n",
//!     "// comments are skipped\n",
//!     "{\"op\":\"add\",\"path\":\"/elements/t\",\"value\":{\"key\":\"t\",\"type\":\"Text\",\"props\":{}}}\n",
//! ));
//! assert_eq!(tree.root(), Some("t"));
//! ```

pub mod apply;
pub mod decode;


pub use apply::{apply_all, apply_patch};
pub use decode::{parse_patch_line, LineBuffer, PatchLineDecoder};

use crate::types::{Patch, UiTree};
use crate::{BoxStream, PipeResult};
use futures::StreamExt;
use std::sync::Arc;

/// Decoder trait for stream decoding
#[async_trait::async_trait]
pub trait Decoder: Send + Sync {
    /// Decode a byte stream into protocol patches
    async fn decode_stream(
        &self,
        input: BoxStream<'static, bytes::Bytes>,
    ) -> PipeResult<BoxStream<'static, Patch>>;
}

/// A patch together with the snapshot it produced.
#[derive(Debug, Clone)]
pub struct TreeUpdate {
    pub patch: Patch,
    pub tree: Arc<UiTree>,
}

/// Decoder followed by the applier, starting from an empty tree.
pub struct PatchPipeline {
    decoder: Box<dyn Decoder>,
}

impl Default for PatchPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchPipeline {
    pub fn new() -> Self {
        Self {
            decoder: Box::new(PatchLineDecoder),
        }
    }

    pub fn with_decoder(decoder: Box<dyn Decoder>) -> Self {
        Self { decoder }
    }

    /// Process a byte stream into a stream of snapshots, one per decoded patch.
    pub async fn process_stream(
        &self,
        input: BoxStream<'static, bytes::Bytes>,
    ) -> PipeResult<BoxStream<'static, TreeUpdate>> {
        let patches = self.decoder.decode_stream(input).await?;
        let updates = patches.scan(Arc::new(UiTree::empty()), |tree, item| {
            let out = item.map(|patch| {
                let next = Arc::new(apply_patch(&**tree, &patch));
                *tree = next.clone();
                TreeUpdate { patch, tree: next }
            });
            futures::future::ready(Some(out))
        });
        Ok(Box::pin(updates))
    }

    /// Drain a byte stream and return the final tree.
    ///
    /// Stops at the first transport error and returns it.
    pub async fn collect_tree(&self, input: BoxStream<'static, bytes::Bytes>) -> PipeResult<UiTree> {
        let mut updates = self.process_stream(input).await?;
        let mut last = Arc::new(UiTree::empty());
        while let Some(update) = updates.next().await {
            last = update?.tree;
        }
        Ok(Arc::try_unwrap(last).unwrap_or_else(|shared| (*shared).clone()))
    }
}

/// Apply a complete recorded stream held in memory.
pub fn replay_text(text: &str) -> UiTree {
    replay_bytes(text.as_bytes())
}

pub fn replay_bytes(bytes: &[u8]) -> UiTree {
    let mut buf = LineBuffer::new();
    let mut patches = buf.push(bytes);
    patches.extend(buf.finish());
    apply_all(&UiTree::empty(), &patches)
}
