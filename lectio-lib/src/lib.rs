//! Scripture reference resolution library
//!
//! Resolves human-written citations ("John 3:16", "Matthew 5:3-7:29") to
//! verse text from several independent Bible-text providers, with TTL-based
//! caching and ordered multi-source fallback so a missing, rate-limited, or
//! down provider never blocks the reader.

pub mod cache;
pub mod error;
pub mod model;
pub mod reference;
pub mod registry;
pub mod response;
pub mod source;

mod client;
mod fetch;

pub use client::*;
pub use response::CacheStatus;
pub use response::Response;
