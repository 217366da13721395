//! Tool catalogue - the validated, immutable directory table.
//!
//! This module provides central registration of all tools and categories.
//! When adding a new tool:
//! 1. Add its descriptor in `builtin_tools()`
//! 2. If it is `Live`, register its view factory in `domains/tools/loader.rs`
//!
//! Lookups are pure and total: "not found" is `None`, never an error. The
//! only fallible surface is construction, which enforces the catalogue
//! invariants (unique slugs, known categories).

use std::collections::HashSet;
use std::sync::OnceLock;

use thiserror::Error;

use super::descriptor::{CategoryDescriptor, SeoMeta, ToolDescriptor, ToolStatus};

/// Errors raised while building a catalogue.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two tools share the same slug.
    #[error("Duplicate tool slug: {0}")]
    DuplicateTool(String),

    /// Two categories share the same slug.
    #[error("Duplicate category slug: {0}")]
    DuplicateCategory(String),

    /// A tool references a category that is not in the catalogue.
    #[error("Tool '{tool}' references unknown category '{category}'")]
    UnknownCategory { tool: String, category: String },
}

/// The immutable directory of tools and categories.
///
/// Declaration order is preserved by every listing operation.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    categories: Vec<CategoryDescriptor>,
    tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    /// Build a catalogue, enforcing the directory invariants.
    pub fn new(
        categories: Vec<CategoryDescriptor>,
        tools: Vec<ToolDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut category_slugs = HashSet::new();
        for category in &categories {
            if !category_slugs.insert(category.slug.as_str()) {
                return Err(CatalogError::DuplicateCategory(category.slug.clone()));
            }
        }

        let mut tool_slugs = HashSet::new();
        for tool in &tools {
            if !tool_slugs.insert(tool.slug.as_str()) {
                return Err(CatalogError::DuplicateTool(tool.slug.clone()));
            }
            if !category_slugs.contains(tool.category.as_str()) {
                return Err(CatalogError::UnknownCategory {
                    tool: tool.slug.clone(),
                    category: tool.category.clone(),
                });
            }
        }

        Ok(Self { categories, tools })
    }

    /// The catalogue shipped with this crate.
    ///
    /// An integrity violation in the builtin table is a programmer error,
    /// so this panics with the offending entry rather than limping on.
    pub fn builtin() -> &'static ToolCatalog {
        static BUILTIN: OnceLock<ToolCatalog> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            ToolCatalog::new(builtin_categories(), builtin_tools())
                .unwrap_or_else(|e| panic!("builtin catalogue is invalid: {e}"))
        })
    }

    /// Look up a tool by slug.
    pub fn tool(&self, slug: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.slug == slug)
    }

    /// Look up a category by slug.
    pub fn category(&self, slug: &str) -> Option<&CategoryDescriptor> {
        self.categories.iter().find(|c| c.slug == slug)
    }

    /// All tools in a category, declaration order preserved.
    pub fn tools_in_category(&self, slug: &str) -> Vec<&ToolDescriptor> {
        self.tools.iter().filter(|t| t.category == slug).collect()
    }

    /// Every tool, in declaration order.
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Every category, in declaration order.
    pub fn categories(&self) -> &[CategoryDescriptor] {
        &self.categories
    }

    /// Every routable path in the directory (categories first, then tools).
    pub fn routes(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(CategoryDescriptor::route)
            .chain(self.tools.iter().map(ToolDescriptor::route))
            .collect()
    }
}

fn builtin_categories() -> Vec<CategoryDescriptor> {
    vec![
        CategoryDescriptor::new("text", "Text Tools", "Transform and inspect plain text"),
        CategoryDescriptor::new("image", "Image Tools", "Resize, crop and convert images"),
        CategoryDescriptor::new(
            "generators",
            "Generators",
            "Generate identifiers, slugs and filler content",
        ),
        CategoryDescriptor::new("document", "Document Tools", "Work with PDF and office files"),
    ]
}

fn builtin_tools() -> Vec<ToolDescriptor> {
    vec![
        ToolDescriptor::new(
            "case-convert",
            "Case Converter",
            "text",
            SeoMeta::new(
                "Case Converter - change text casing online",
                "Convert text between upper, lower, title, snake, kebab and camel case.",
            ),
        )
        .tags(["text", "case", "convert"])
        .related(["word-count", "slug-generate"]),
        ToolDescriptor::new(
            "word-count",
            "Word Counter",
            "text",
            SeoMeta::new(
                "Word Counter - count words, characters and lines",
                "Count words, characters and lines and estimate reading time.",
            ),
        )
        .tags(["text", "count", "statistics"])
        .related(["case-convert", "markdown-to-html"]),
        ToolDescriptor::new(
            "markdown-to-html",
            "Markdown to HTML",
            "text",
            SeoMeta::new(
                "Markdown to HTML converter",
                "Render Markdown into clean, escaped HTML.",
            ),
        )
        .tags(["text", "markdown", "html"])
        .related(["word-count"]),
        ToolDescriptor::new(
            "resize-image",
            "Resize Image",
            "image",
            SeoMeta::new(
                "Resize Image - scale images to any dimensions",
                "Resize an image to an exact width and height.",
            ),
        )
        .tags(["image", "resize"])
        .related(["crop-image", "convert-image"]),
        ToolDescriptor::new(
            "crop-image",
            "Crop Image",
            "image",
            SeoMeta::new(
                "Crop Image - cut images to a region",
                "Crop an image to a rectangular region.",
            ),
        )
        .tags(["image", "crop"])
        .related(["resize-image", "convert-image"]),
        ToolDescriptor::new(
            "convert-image",
            "Convert Image",
            "image",
            SeoMeta::new(
                "Convert Image - change image formats",
                "Convert images between PNG, JPEG and WebP.",
            ),
        )
        .status(ToolStatus::ComingSoon)
        .tags(["image", "convert"]),
        ToolDescriptor::new(
            "slug-generate",
            "Slug Generator",
            "generators",
            SeoMeta::new(
                "Slug Generator - URL-friendly slugs from any text",
                "Turn any text into a lowercase, hyphen-separated slug.",
            ),
        )
        .tags(["generator", "slug", "url"])
        .related(["case-convert"]),
        ToolDescriptor::new(
            "uuid-generate",
            "UUID Generator",
            "generators",
            SeoMeta::new(
                "UUID Generator - random version 4 UUIDs",
                "Generate one or many random UUIDs.",
            ),
        )
        .tags(["generator", "uuid"])
        .related(["slug-generate"]),
        ToolDescriptor::new(
            "merge-pdf",
            "Merge PDF",
            "document",
            SeoMeta::new("Merge PDF files", "Combine several PDFs into one document."),
        )
        .status(ToolStatus::ComingSoon)
        .tags(["pdf", "merge"]),
        ToolDescriptor::new(
            "pdf-to-text",
            "PDF to Text",
            "document",
            SeoMeta::new("PDF to Text extractor", "Extract plain text from PDF files."),
        )
        .status(ToolStatus::ComingSoon)
        .tags(["pdf", "text"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue_is_valid() {
        let catalog = ToolCatalog::builtin();
        assert!(!catalog.tools().is_empty());
        assert!(!catalog.categories().is_empty());
    }

    #[test]
    fn test_tool_lookup() {
        let catalog = ToolCatalog::builtin();
        let tool = catalog.tool("case-convert").unwrap();
        assert_eq!(tool.name, "Case Converter");
        assert!(catalog.tool("no-such-tool").is_none());
    }

    #[test]
    fn test_category_lookup() {
        let catalog = ToolCatalog::builtin();
        assert_eq!(catalog.category("image").unwrap().name, "Image Tools");
        assert!(catalog.category("audio").is_none());
    }

    #[test]
    fn test_tools_in_category_preserves_declaration_order() {
        let catalog = ToolCatalog::builtin();
        let image_tools: Vec<_> = catalog
            .tools_in_category("image")
            .iter()
            .map(|t| t.slug.as_str())
            .collect();
        assert_eq!(image_tools, vec!["resize-image", "crop-image", "convert-image"]);
        for tool in catalog.tools_in_category("image") {
            assert_eq!(tool.category, "image");
        }
    }

    #[test]
    fn test_tools_in_unknown_category_is_empty() {
        let catalog = ToolCatalog::builtin();
        assert!(catalog.tools_in_category("audio").is_empty());
    }

    #[test]
    fn test_duplicate_tool_slug_rejected() {
        let categories = vec![CategoryDescriptor::new("text", "Text", "")];
        let tools = vec![
            ToolDescriptor::new("dup", "A", "text", SeoMeta::new("a", "a")),
            ToolDescriptor::new("dup", "B", "text", SeoMeta::new("b", "b")),
        ];
        let err = ToolCatalog::new(categories, tools).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTool(slug) if slug == "dup"));
    }

    #[test]
    fn test_duplicate_category_slug_rejected() {
        let categories = vec![
            CategoryDescriptor::new("text", "Text", ""),
            CategoryDescriptor::new("text", "Text again", ""),
        ];
        let err = ToolCatalog::new(categories, vec![]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCategory(slug) if slug == "text"));
    }

    #[test]
    fn test_unknown_category_rejected() {
        let categories = vec![CategoryDescriptor::new("text", "Text", "")];
        let tools = vec![ToolDescriptor::new("t", "T", "audio", SeoMeta::new("t", "t"))];
        let err = ToolCatalog::new(categories, tools).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory { category, .. } if category == "audio"));
    }

    #[test]
    fn test_dangling_related_slug_is_tolerated() {
        // Related lists may reference tools that were removed; the chain
        // menu drops them at read time.
        let categories = vec![CategoryDescriptor::new("text", "Text", "")];
        let tools = vec![
            ToolDescriptor::new("t", "T", "text", SeoMeta::new("t", "t")).related(["gone"]),
        ];
        assert!(ToolCatalog::new(categories, tools).is_ok());
    }

    #[test]
    fn test_routes_cover_all_pages() {
        let catalog = ToolCatalog::builtin();
        let routes = catalog.routes();
        assert_eq!(
            routes.len(),
            catalog.categories().len() + catalog.tools().len()
        );
        assert!(routes.contains(&"/categories/text".to_string()));
        assert!(routes.contains(&"/tools/uuid-generate".to_string()));
    }
}
