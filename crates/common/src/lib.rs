//! Shared error plumbing used across all shelve crates.

pub mod error;

pub use error::FromMessage;
