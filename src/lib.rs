//! Toolchest Library
//!
//! This crate implements a directory of small file-utility tools with a
//! cross-tool file hand-off mechanism: finish an operation in one tool,
//! carry the result straight into the next one without re-uploading.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - **core**: Configuration, error handling, the session (routing + page
//!   model) and the stdio shell
//! - **domains**: Business logic organized by bounded contexts
//!   - **catalog**: the static directory of tools and categories
//!   - **handoff**: the in-flight file store and the chain menu
//!   - **tools**: the tool view contract, lazy loading, and the tool
//!     implementations
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use toolchest::core::{Config, Session};
//! use toolchest::domains::catalog::ToolCatalog;
//!
//! let catalog = Arc::new(ToolCatalog::builtin().clone());
//! let mut session = Session::new(Arc::new(Config::default()), catalog);
//! session.open("/tools/word-count");
//! session.poll();
//! let output = session.run(serde_json::json!({ "text": "one two" })).unwrap();
//! assert!(output.summary.contains("2 words"));
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, Page, Result, Route, Session};
pub use domains::handoff::{HandoffStore, StoredFile};
