//! Async client for the AdMatch HTTP API.

mod client;

pub use client::{AdMatchClient, ClientError, IndexStats, LoadSummary, Record, SkipReason, SkippedRecord};
