//! # json-render-playground
//!
//! 流式 JSON 补丁渲染演示：将模型逐行输出的补丁实时构建为界面树并渲染为 HTML。
//!
//! Streaming UI playground: a generation endpoint emits newline-delimited JSON
//! patches, each patch is applied to an immutable element tree, and the tree
//! is rendered through a closed catalog of components.
//!
//! ## Overview
//!
//! - **Streaming-First**: bytes are split into lines as they arrive; a line is
//!   applied the moment it is complete, even when a chunk ends mid-character.
//! - **Pure Updates**: [`pipeline::apply_patch`] never mutates its input, so
//!   every intermediate tree can be kept, diffed, or rendered.
//! - **Closed Catalog**: only the kinds in [`catalog::ComponentKind`] render;
//!   anything else gets a visible placeholder.
//! - **Cancellable**: starting a new run or stopping abandons the previous
//!   producer and its patches are never applied.
//!
//! ## Quick Start
//!
//! ```rust
//! use json_render_playground::{pipeline::replay_text, Renderer};
//!
//! let text = concat!(
//!     r#"{"op":"set","path":"/root","value":"hello"}"#, "\n",
//!     r#"{"op":"add","path":"/elements/hello","value":{"key":"hello","type":"Heading","props":{"text":"Hi"}}}"#, "\n",
//! );
//! let tree = replay_text(text);
//! let html = Renderer::new().render_tree(&tree);
//! assert!(html.contains("Hi"));
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Patches, elements and the UI tree |
//! | [`pipeline`] | Line decoding and patch application |
//! | [`catalog`] | Component kinds, typed props and validation |
//! | [`render`] | HTML rendering of a tree |
//! | [`transport`] | HTTP client for the generation endpoint |
//! | [`session`] | Scripted demo and live generation orchestration |
//! | [`config`] | File and environment configuration |

pub mod catalog;
pub mod config;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use catalog::{ComponentKind, CatalogIssue};
pub use config::PlaygroundConfig;
pub use pipeline::{apply_patch, PatchPipeline};
pub use render::Renderer;
pub use session::{CancelHandle, Playground, PlaygroundHandle, PlaygroundSnapshot};
pub use transport::GenerationClient;
pub use types::{Element, Patch, PatchOp, UiTree};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A specialized Result for pipeline operations
pub type PipeResult<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `PipeResult<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = PipeResult<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
