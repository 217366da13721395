//! Static descriptor records for tools and categories.
//!
//! Descriptors are built once when the catalogue is constructed and never
//! mutated afterwards. All runtime lookups hand out shared references.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    /// The tool is available and has a working view.
    Live,

    /// The tool is announced in the directory but has no view yet.
    ComingSoon,
}

impl ToolStatus {
    /// Human-readable label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::ComingSoon => "coming soon",
        }
    }
}

/// Page metadata attached to each tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoMeta {
    /// Page title.
    pub title: String,

    /// Meta description shown in listings and page heads.
    pub description: String,
}

impl SeoMeta {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Immutable record describing one tool in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Globally unique slug; doubles as the routing key (`/tools/<slug>`).
    pub slug: String,

    /// Display name.
    pub name: String,

    /// Slug of the category this tool belongs to. Must exist in the catalogue.
    pub category: String,

    /// Lifecycle status.
    pub status: ToolStatus,

    /// Descriptive tags for listings and search.
    pub tags: Vec<String>,

    /// Slugs of suggested next tools, in the order they should be offered.
    /// Entries that do not resolve against the catalogue are tolerated and
    /// dropped at read time by the chain menu.
    pub related: Vec<String>,

    /// Page metadata.
    pub seo: SeoMeta,
}

impl ToolDescriptor {
    /// Create a live descriptor with empty tags/related lists.
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        seo: SeoMeta,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            category: category.into(),
            status: ToolStatus::Live,
            tags: Vec::new(),
            related: Vec::new(),
            seo,
        }
    }

    /// Set the lifecycle status.
    pub fn status(mut self, status: ToolStatus) -> Self {
        self.status = status;
        self
    }

    /// Set descriptive tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the suggested-next-tool slugs.
    pub fn related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related = related.into_iter().map(Into::into).collect();
        self
    }

    /// Route path for this tool's page.
    pub fn route(&self) -> String {
        format!("/tools/{}", self.slug)
    }

    /// Whether this tool has a working view.
    pub fn is_live(&self) -> bool {
        self.status == ToolStatus::Live
    }
}

/// Immutable record describing one category of tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    /// Globally unique slug; routing key (`/categories/<slug>`).
    pub slug: String,

    /// Display name.
    pub name: String,

    /// Short description for the category page.
    pub description: String,
}

impl CategoryDescriptor {
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Route path for this category's page.
    pub fn route(&self) -> String {
        format!("/categories/{}", self.slug)
    }
}
