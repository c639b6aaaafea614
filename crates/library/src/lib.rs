//! Local library collections: listing, destination selection, placement.
//!
//! The library is driven through a [`LibraryBridge`]. On macOS that is
//! [`OsascriptBridge`]; elsewhere [`NoopBridge`] stands in and reports itself
//! unavailable, which is what the destination fallback keys off.

pub mod bridge;
pub mod error;
pub mod osascript;
pub mod prompt;
pub mod selector;

pub use {
    bridge::{LibraryBridge, MediaRef, NoopBridge, default_bridge},
    error::{Error, Result},
    osascript::OsascriptBridge,
    prompt::{Prompt, StdinPrompt},
    selector::{CollectionName, DefaultChange, DestinationSelector, ValidatedCollection},
};
