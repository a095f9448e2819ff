//! HTTP transport for remedit: the Fetcher and Submitter.
//!
//! Implements the [`WikiClient`](remedit_types::WikiClient) trait over the
//! wiki's JSON page API. Everything else in the tool talks to this crate
//! through the trait, never through `reqwest` directly.

mod http;

pub use http::{HttpClientConfig, HttpWikiClient};
