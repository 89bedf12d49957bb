#![doc = include_str!("../README.md")]
pub mod card;
pub mod error;
pub mod store;

pub use crate::card::{Card, Options, Payload};
pub use crate::error::{Error, Result};
pub use crate::store::memory::MemoryMap;
pub use crate::store::AsyncMap;
pub use serde_json::Value;

/// The version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns [`VERSION`].
pub fn version() -> &'static str {
    VERSION
}
