//! Tools domain module.
//!
//! Each tool is one independent view implementing the shared
//! "render into the tool shell" contract.
//!
//! ## Architecture
//!
//! - `definitions/` - individual tool implementations (one file per tool)
//! - `view.rs` - the `ToolView` contract and argument helpers
//! - `loader.rs` - lazy per-slug view construction
//! - `error.rs` - tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with params, core logic and a
//!    `ToolView` impl
//! 2. Export it in `definitions/mod.rs`
//! 3. Register its factory in `loader.rs` (`with_builtin_views`)
//! 4. Add its descriptor to the catalogue (`domains/catalog/registry.rs`)

pub mod definitions;
mod error;
mod loader;
mod view;

pub use error::ToolError;
pub use loader::{LoadState, ViewFactory, ViewLoader};
pub use view::{MountOutcome, ToolOutput, ToolView, parse_args, text_input};
