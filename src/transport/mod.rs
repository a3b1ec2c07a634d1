//! HTTP transport for the generation endpoint.

pub mod http;

pub use http::{truncate_prompt, GenerationClient, TransportError};
