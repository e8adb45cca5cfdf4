//! Botstrap - Self-updating bot launcher
//!
//! Fetches a remote code artifact, verifies its integrity, caches it
//! locally, runs it through a configured interpreter, and cleans up
//! local state on every exit path.

pub mod cache;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod executor;
pub mod heap;
pub mod integrity;
pub mod lifecycle;
pub mod update;

pub use error::{BotstrapError, BotstrapResult};
