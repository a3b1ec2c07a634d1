//! Integration tests against a mock generation endpoint

pub mod live;
pub mod mock_server;
