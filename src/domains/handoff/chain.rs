//! Tool chain menu - "continue with your file in..." suggestions.
//!
//! Given the tool the user is currently on, its declared list of related
//! tool slugs, and the file it just produced, the menu resolves each slug
//! against the catalogue and yields one continuation control per resolvable
//! live tool. Broken references degrade gracefully: they are dropped and
//! logged at debug level, never surfaced as an error.
//!
//! Selecting a continuation is the session's job (`Session::follow`): the
//! hand-off pair is written into the store first, navigation happens after.

use std::sync::Arc;

use tracing::debug;

use crate::domains::catalog::ToolCatalog;
use crate::domains::handoff::StoredFile;

/// One selectable "continue in tool X" control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continuation {
    /// Slug of the target tool.
    pub slug: String,

    /// Display label (the target tool's name).
    pub label: String,

    /// Route the selection navigates to.
    pub route: String,
}

/// Resolves continuation suggestions against the catalogue.
pub struct ChainMenu {
    catalog: Arc<ToolCatalog>,
}

impl ChainMenu {
    pub fn new(catalog: Arc<ToolCatalog>) -> Self {
        Self { catalog }
    }

    /// Build the continuation controls to offer on `current_slug`'s page.
    ///
    /// Returns nothing when there is no file to carry. Related slugs that do
    /// not resolve to a live tool are dropped; input order is preserved for
    /// the survivors. Dropping deliberately covers announced (`ComingSoon`)
    /// targets as well as unknown slugs: a continuation must land on a view
    /// that can actually receive the file.
    pub fn offer(
        &self,
        current_slug: &str,
        related: &[String],
        file: Option<&StoredFile>,
    ) -> Vec<Continuation> {
        if file.is_none() {
            return Vec::new();
        }

        related
            .iter()
            .filter_map(|slug| match self.catalog.tool(slug) {
                Some(tool) if tool.is_live() => Some(Continuation {
                    slug: tool.slug.clone(),
                    label: tool.name.clone(),
                    route: tool.route(),
                }),
                Some(_) => {
                    debug!(from = current_slug, to = %slug, "dropping continuation: tool not live");
                    None
                }
                None => {
                    debug!(from = current_slug, to = %slug, "dropping continuation: unknown tool");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::{CategoryDescriptor, SeoMeta, ToolCatalog, ToolDescriptor, ToolStatus};

    fn menu() -> ChainMenu {
        let categories = vec![CategoryDescriptor::new("text", "Text", "")];
        let tools = vec![
            ToolDescriptor::new("alpha", "Alpha", "text", SeoMeta::new("a", "a")),
            ToolDescriptor::new("beta", "Beta", "text", SeoMeta::new("b", "b")),
            ToolDescriptor::new("gamma", "Gamma", "text", SeoMeta::new("g", "g"))
                .status(ToolStatus::ComingSoon),
        ];
        ChainMenu::new(Arc::new(ToolCatalog::new(categories, tools).unwrap()))
    }

    fn related(slugs: &[&str]) -> Vec<String> {
        slugs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_file_renders_nothing() {
        let menu = menu();
        let offers = menu.offer("alpha", &related(&["beta", "gamma"]), None);
        assert!(offers.is_empty());
    }

    #[test]
    fn test_unresolved_slugs_are_dropped() {
        let menu = menu();
        let file = StoredFile::text("a.txt", "x");
        let offers = menu.offer("alpha", &related(&["beta", "missing"]), Some(&file));
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].slug, "beta");
        assert_eq!(offers[0].route, "/tools/beta");
    }

    #[test]
    fn test_coming_soon_targets_are_dropped() {
        let menu = menu();
        let file = StoredFile::text("a.txt", "x");
        let offers = menu.offer("alpha", &related(&["gamma", "beta"]), Some(&file));
        let slugs: Vec<_> = offers.iter().map(|o| o.slug.as_str()).collect();
        assert_eq!(slugs, vec!["beta"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let menu = menu();
        let file = StoredFile::text("a.txt", "x");
        let offers = menu.offer("gamma", &related(&["beta", "alpha"]), Some(&file));
        let slugs: Vec<_> = offers.iter().map(|o| o.slug.as_str()).collect();
        assert_eq!(slugs, vec!["beta", "alpha"]);
    }

    #[test]
    fn test_empty_related_renders_nothing() {
        let menu = menu();
        let file = StoredFile::text("a.txt", "x");
        assert!(menu.offer("alpha", &[], Some(&file)).is_empty());
    }

    #[test]
    fn test_labels_come_from_catalogue() {
        let menu = menu();
        let file = StoredFile::text("a.txt", "x");
        let offers = menu.offer("alpha", &related(&["beta"]), Some(&file));
        assert_eq!(offers[0].label, "Beta");
    }
}
