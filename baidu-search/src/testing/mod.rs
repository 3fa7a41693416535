//! Testing utilities for search clients.
//!
//! This module provides:
//! - A scripted transport that records every request
//! - A sleeper that records instead of blocking
//! - A builder for synthetic result pages

mod fixtures;
mod mocks;

pub use fixtures::SerpFixture;
pub use mocks::{RecordedRequest, RecordingSleeper, StubTransport};
