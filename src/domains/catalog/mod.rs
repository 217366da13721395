//! Catalogue domain module.
//!
//! The catalogue is the static directory of every tool and category the
//! site presents: slugs, display names, lifecycle status, tags and page
//! metadata. It is built once, validated, and only ever read afterwards.
//!
//! ## Architecture
//!
//! - `descriptor.rs` - the immutable record types
//! - `registry.rs` - the validated `ToolCatalog` table and its lookups

mod descriptor;
mod registry;

pub use descriptor::{CategoryDescriptor, SeoMeta, ToolDescriptor, ToolStatus};
pub use registry::{CatalogError, ToolCatalog};
