//! Core infrastructure.
//!
//! This module contains the pieces every domain relies on:
//! - `config` - configuration loading
//! - `error` - unified error types
//! - `session` - the running client session: routing and the page model
//! - `shell` - the interactive stdio front end

pub mod config;
pub mod error;
pub mod session;
pub mod shell;

pub use config::Config;
pub use error::{Error, Result};
pub use session::{Page, Route, Session, SessionError, ToolShell};
pub use shell::Shell;
