//! Hand-off domain module.
//!
//! This module implements the cross-tool file hand-off mechanism: the
//! session-scoped store holding the one file currently in flight between
//! tools, and the chain menu that offers "continue in tool X" navigation
//! targets.
//!
//! ## Architecture
//!
//! - `store.rs` - `HandoffStore`, the single shared (file, source tool) slot
//! - `chain.rs` - `ChainMenu`, continuation resolution against the catalogue

mod chain;
mod store;

pub use chain::{ChainMenu, Continuation};
pub use store::{HandoffState, HandoffStore, StoredFile, mime_for_name};
