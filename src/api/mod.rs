//! HTTP access to the test-statistics endpoint.

pub mod client;

pub use client::{FetchError, StatsClient};
