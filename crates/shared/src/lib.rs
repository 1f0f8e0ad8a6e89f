//! Wire contract shared between the dashboard client and its callers.
//!
//! Field names on the wire are fixed by the sales backend and are preserved
//! here through `serde(rename)`; Rust-side names follow Rust conventions.

pub mod domain;
pub mod error;
pub mod protocol;
