//! Error types and handling.
//!
//! This module defines a unified error type that can represent errors from
//! all domains, providing consistent error handling across the crate.

use thiserror::Error;

/// A specialized Result type for toolchest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from catalogue construction.
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::domains::catalog::CatalogError),

    /// Error originating from the session.
    #[error("Session error: {0}")]
    Session(#[from] crate::core::session::SessionError),

    /// I/O errors from the shell.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::{CategoryDescriptor, SeoMeta, ToolCatalog, ToolDescriptor};
    use crate::domains::tools::ToolError;

    fn duplicate_catalog() -> Result<ToolCatalog> {
        let categories = vec![CategoryDescriptor::new("text", "Text", "")];
        let tool = ToolDescriptor::new("echo", "Echo", "text", SeoMeta::new("e", "e"));
        let catalog = ToolCatalog::new(categories, vec![tool.clone(), tool])?;
        Ok(catalog)
    }

    #[test]
    fn test_catalog_error_folds_into_unified_error() {
        let err = duplicate_catalog().unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
        assert!(err.to_string().starts_with("Catalog error"));
    }

    #[test]
    fn test_tool_error_folds_into_unified_error() {
        let err: Error = ToolError::missing_input("no file").into();
        assert!(matches!(err, Error::Tool(_)));
        assert!(err.to_string().contains("no file"));
    }
}
