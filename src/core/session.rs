//! The running client session: routing surface and page model.
//!
//! A `Session` is the Rust rendition of one open tab of the directory. It
//! owns the injected hand-off store, the catalogue, the lazy view loader
//! and the current route, and it coordinates them: navigating resolves the
//! route into a page, mounting a tool view delivers any pending hand-off,
//! running a tool produces the output the chain menu offers onward.
//!
//! Everything here is synchronous and single-threaded; every mutation runs
//! inside one user-initiated operation, so a reader always observes the
//! most recently completed write. The one deliberate gap is view loading:
//! the first visit to a tool route yields a `ToolLoading` placeholder page
//! and `poll()` settles it, which guarantees the load completes before the
//! tool can read the store.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::core::config::Config;
use crate::domains::catalog::{ToolCatalog, ToolStatus};
use crate::domains::handoff::{ChainMenu, Continuation, HandoffStore, StoredFile};
use crate::domains::tools::{LoadState, ToolError, ToolOutput, ViewLoader};

/// A parsed client location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The directory front page.
    Home,

    /// One tool's page, keyed by slug.
    Tool(String),

    /// One category's listing page, keyed by slug.
    Category(String),

    /// Anything that did not parse.
    NotFound(String),
}

impl Route {
    /// Parse a path into a route. Unresolvable paths become `NotFound`,
    /// never an error.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Self::Home;
        }
        if let Some(slug) = trimmed.strip_prefix("/tools/") {
            if !slug.is_empty() && !slug.contains('/') {
                return Self::Tool(slug.to_string());
            }
        }
        if let Some(slug) = trimmed.strip_prefix("/categories/") {
            if !slug.is_empty() && !slug.contains('/') {
                return Self::Category(slug.to_string());
            }
        }
        Self::NotFound(path.to_string())
    }

    /// Route for a tool slug.
    pub fn tool(slug: impl Into<String>) -> Self {
        Self::Tool(slug.into())
    }

    /// Render the route back to its path.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Tool(slug) => format!("/tools/{slug}"),
            Self::Category(slug) => format!("/categories/{slug}"),
            Self::NotFound(path) => path.clone(),
        }
    }
}

/// One tool listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCard {
    pub slug: String,
    pub name: String,
    pub status: ToolStatus,
}

/// One category listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCard {
    pub slug: String,
    pub name: String,
    pub tool_count: usize,
}

/// A mounted tool page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolShell {
    pub slug: String,
    /// Page title from the tool's catalogue metadata.
    pub title: String,
    pub description: String,
    /// Name of the current input file, if any.
    pub input_file: Option<String>,
    /// Whether an incoming hand-off pre-populated the input, skipping the
    /// file-picker step.
    pub picker_skipped: bool,
}

/// The render model: what the current frame shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home {
        site: String,
        categories: Vec<CategoryCard>,
    },
    Category {
        slug: String,
        name: String,
        description: String,
        tools: Vec<ToolCard>,
    },
    /// Placeholder while a tool view is being loaded.
    ToolLoading { slug: String },
    Tool(ToolShell),
    ComingSoon { slug: String, name: String },
    NotFound { path: String },
}

/// Errors from session operations.
///
/// These are contract faults (asking a tool-page operation of a non-tool
/// page), not user-input problems; missing routes and files stay inside the
/// page model as normal absent states.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A tool operation was requested while no tool view is mounted.
    #[error("No tool is mounted on the current page")]
    NoActiveTool,

    /// A continuation was selected that is not currently offered.
    #[error("Continuation target not offered: {0}")]
    UnknownContinuation(String),

    /// A continuation was selected before the tool produced any output.
    #[error("Nothing to hand off: run the tool first")]
    NothingToHandOff,

    /// The mounted tool failed.
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// One open tab of the tool directory.
pub struct Session {
    config: Arc<Config>,
    catalog: Arc<ToolCatalog>,
    store: HandoffStore,
    menu: ChainMenu,
    loader: ViewLoader,
    route: Route,
    pending_load: Option<String>,
    last_output: Option<ToolOutput>,
    last_prefilled: bool,
}

impl Session {
    /// Create a session over the given catalogue with the builtin views.
    pub fn new(config: Arc<Config>, catalog: Arc<ToolCatalog>) -> Self {
        Self::with_parts(config, catalog, HandoffStore::new(), ViewLoader::with_builtin_views())
    }

    /// Create a session with an injected store and loader. Tests use this to
    /// wire independent stores and custom view sets.
    pub fn with_parts(
        config: Arc<Config>,
        catalog: Arc<ToolCatalog>,
        store: HandoffStore,
        loader: ViewLoader,
    ) -> Self {
        let menu = ChainMenu::new(catalog.clone());
        Self {
            config,
            catalog,
            store,
            menu,
            loader,
            route: Route::Home,
            pending_load: None,
            last_output: None,
            last_prefilled: false,
        }
    }

    /// The session's hand-off store.
    pub fn store(&self) -> &HandoffStore {
        &self.store
    }

    /// The current route.
    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The catalogue this session serves.
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// The last tool output, if the current tool has produced one.
    pub fn last_output(&self) -> Option<&ToolOutput> {
        self.last_output.as_ref()
    }

    /// Navigate to a path. Convenience wrapper over [`Session::navigate`].
    pub fn open(&mut self, path: &str) -> Page {
        self.navigate(Route::parse(path))
    }

    /// Navigate to a route and render the immediate frame. The first visit
    /// to a live tool yields `Page::ToolLoading`; `poll()` settles it.
    pub fn navigate(&mut self, route: Route) -> Page {
        info!(path = %route.path(), "navigating");
        self.pending_load = None;
        self.last_output = None;
        self.last_prefilled = false;
        self.route = route.clone();
        match route {
            Route::Home => self.home_page(),
            Route::Category(slug) => self.category_page(&slug),
            Route::NotFound(path) => Page::NotFound { path },
            Route::Tool(slug) => self.enter_tool(&slug),
        }
    }

    /// Settle any pending view load and render the current frame.
    pub fn poll(&mut self) -> Page {
        if let Some(slug) = self.pending_load.take() {
            self.loader.resolve(&slug);
            return self.mount_current(&slug);
        }
        self.render_current()
    }

    /// Run the currently mounted tool.
    pub fn run(&mut self, args: serde_json::Value) -> Result<ToolOutput, SessionError> {
        let Route::Tool(slug) = self.route.clone() else {
            return Err(SessionError::NoActiveTool);
        };
        let view = self
            .loader
            .get_ready(&slug)
            .ok_or(SessionError::NoActiveTool)?;
        let output = view.run(args)?;
        info!(tool = %slug, output = %output.file.name, "tool ran");
        self.last_output = Some(output.clone());
        Ok(output)
    }

    /// Provide an input file to the mounted tool (the manual picker path).
    pub fn provide_input(&mut self, file: StoredFile) -> Result<(), SessionError> {
        let Route::Tool(slug) = self.route.clone() else {
            return Err(SessionError::NoActiveTool);
        };
        let view = self
            .loader
            .get_ready(&slug)
            .ok_or(SessionError::NoActiveTool)?;
        view.set_input(file);
        Ok(())
    }

    /// JSON schema of the arguments the mounted tool accepts.
    pub fn input_schema(&mut self) -> Result<schemars::Schema, SessionError> {
        let Route::Tool(slug) = self.route.clone() else {
            return Err(SessionError::NoActiveTool);
        };
        let view = self
            .loader
            .get_ready(&slug)
            .ok_or(SessionError::NoActiveTool)?;
        Ok(view.input_schema())
    }

    /// Continuation suggestions for the current tool's last output.
    pub fn continuations(&self) -> Vec<Continuation> {
        let Route::Tool(slug) = &self.route else {
            return Vec::new();
        };
        let Some(descriptor) = self.catalog.tool(slug) else {
            return Vec::new();
        };
        self.menu.offer(
            slug,
            &descriptor.related,
            self.last_output.as_ref().map(|o| &o.file),
        )
    }

    /// Select a continuation: write the hand-off pair into the store, then
    /// navigate to the target tool. Store writes happen-before navigation.
    pub fn follow(&mut self, target_slug: &str) -> Result<Page, SessionError> {
        let Route::Tool(current) = self.route.clone() else {
            return Err(SessionError::NoActiveTool);
        };
        let Some(output) = self.last_output.clone() else {
            return Err(SessionError::NothingToHandOff);
        };
        let offered = self.continuations();
        let Some(target) = offered.iter().find(|c| c.slug == target_slug) else {
            return Err(SessionError::UnknownContinuation(target_slug.to_string()));
        };
        let route = Route::parse(&target.route);

        self.store.begin_handoff(output.file, current);
        Ok(self.navigate(route))
    }

    fn home_page(&self) -> Page {
        Page::Home {
            site: self.config.site.name.clone(),
            categories: self
                .catalog
                .categories()
                .iter()
                .map(|c| CategoryCard {
                    slug: c.slug.clone(),
                    name: c.name.clone(),
                    tool_count: self.catalog.tools_in_category(&c.slug).len(),
                })
                .collect(),
        }
    }

    fn category_page(&self, slug: &str) -> Page {
        let Some(category) = self.catalog.category(slug) else {
            return Page::NotFound {
                path: format!("/categories/{slug}"),
            };
        };
        Page::Category {
            slug: category.slug.clone(),
            name: category.name.clone(),
            description: category.description.clone(),
            tools: self
                .catalog
                .tools_in_category(slug)
                .iter()
                .map(|t| ToolCard {
                    slug: t.slug.clone(),
                    name: t.name.clone(),
                    status: t.status,
                })
                .collect(),
        }
    }

    fn enter_tool(&mut self, slug: &str) -> Page {
        let Some(descriptor) = self.catalog.tool(slug) else {
            return Page::NotFound {
                path: format!("/tools/{slug}"),
            };
        };
        if !descriptor.is_live() {
            return Page::ComingSoon {
                slug: descriptor.slug.clone(),
                name: descriptor.name.clone(),
            };
        }
        match self.loader.state(slug) {
            LoadState::Ready => self.mount_current(slug),
            LoadState::Unavailable => {
                // Live in the catalogue but no view registered; degrade the
                // same way an announced tool does.
                debug!(slug, "live tool has no registered view");
                Page::ComingSoon {
                    slug: descriptor.slug.clone(),
                    name: descriptor.name.clone(),
                }
            }
            _ => {
                self.loader.request(slug);
                self.pending_load = Some(slug.to_string());
                Page::ToolLoading {
                    slug: slug.to_string(),
                }
            }
        }
    }

    /// Mount the view for `slug`: deliver any pending hand-off and clear
    /// the store if the view consumes it.
    fn mount_current(&mut self, slug: &str) -> Page {
        let incoming = self.store.file();
        let keep_context = self.config.session.keep_context_after_consume;

        let Some(view) = self.loader.get_ready(slug) else {
            // Only reachable if a caller bypasses navigate/poll ordering.
            return Page::NotFound {
                path: format!("/tools/{slug}"),
            };
        };

        let outcome = view.mount(incoming);
        self.last_prefilled = outcome.prefilled;
        if outcome.prefilled {
            info!(tool = %slug, "hand-off consumed, file picker skipped");
            if view.clears_context() && !keep_context {
                self.store.clear_context();
            }
        }
        self.shell_page(slug)
    }

    /// Render the current frame without re-mounting.
    fn render_current(&mut self) -> Page {
        match self.route.clone() {
            Route::Home => self.home_page(),
            Route::Category(slug) => self.category_page(&slug),
            Route::NotFound(path) => Page::NotFound { path },
            Route::Tool(slug) => {
                if self.pending_load.is_some() {
                    Page::ToolLoading { slug }
                } else if self.loader.state(&slug) == LoadState::Ready {
                    self.shell_page(&slug)
                } else {
                    self.enter_tool(&slug)
                }
            }
        }
    }

    fn shell_page(&mut self, slug: &str) -> Page {
        let (title, description) = self
            .catalog
            .tool(slug)
            .map(|d| (d.seo.title.clone(), d.seo.description.clone()))
            .unwrap_or_default();
        let input_file = self
            .loader
            .get_ready(slug)
            .and_then(|view| view.input().map(|f| f.name.clone()));
        Page::Tool(ToolShell {
            slug: slug.to_string(),
            title,
            description,
            input_file,
            picker_skipped: self.last_prefilled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::ToolCatalog;

    fn session() -> Session {
        let catalog = Arc::new(ToolCatalog::builtin().clone());
        Session::new(Arc::new(Config::default()), catalog)
    }

    fn photo() -> StoredFile {
        StoredFile::new("photo.png", vec![0x89, 0x50, 0x4e, 0x47, 1, 2, 3])
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/tools/crop-image"), Route::tool("crop-image"));
        assert_eq!(Route::parse("/tools/crop-image/"), Route::tool("crop-image"));
        assert_eq!(
            Route::parse("/categories/image"),
            Route::Category("image".into())
        );
        assert_eq!(
            Route::parse("/tools/"),
            Route::NotFound("/tools/".into())
        );
        assert_eq!(
            Route::parse("/about"),
            Route::NotFound("/about".into())
        );
        assert_eq!(Route::tool("x").path(), "/tools/x");
    }

    #[test]
    fn test_home_lists_categories() {
        let mut session = session();
        let Page::Home { categories, .. } = session.open("/") else {
            panic!("expected home page");
        };
        assert_eq!(categories.len(), 4);
        let image = categories.iter().find(|c| c.slug == "image").unwrap();
        assert_eq!(image.tool_count, 3);
    }

    #[test]
    fn test_category_page_and_not_found() {
        let mut session = session();
        let Page::Category { tools, .. } = session.open("/categories/text") else {
            panic!("expected category page");
        };
        assert_eq!(tools.len(), 3);

        assert!(matches!(
            session.open("/categories/audio"),
            Page::NotFound { .. }
        ));
        assert!(matches!(session.open("/tools/nope"), Page::NotFound { .. }));
    }

    #[test]
    fn test_coming_soon_tool_has_no_view() {
        let mut session = session();
        let page = session.open("/tools/merge-pdf");
        assert!(matches!(page, Page::ComingSoon { ref slug, .. } if slug == "merge-pdf"));
    }

    #[test]
    fn test_first_visit_shows_loading_then_mounts() {
        let mut session = session();
        let page = session.open("/tools/word-count");
        assert_eq!(page, Page::ToolLoading { slug: "word-count".into() });

        let Page::Tool(shell) = session.poll() else {
            panic!("expected mounted tool page");
        };
        assert_eq!(shell.slug, "word-count");
        assert!(shell.input_file.is_none());
        assert!(!shell.picker_skipped);

        // Second visit mounts immediately.
        let page = session.open("/tools/word-count");
        assert!(matches!(page, Page::Tool(_)));
    }

    #[test]
    fn test_run_requires_mounted_tool() {
        let mut session = session();
        session.open("/");
        assert!(matches!(
            session.run(serde_json::Value::Null),
            Err(SessionError::NoActiveTool)
        ));

        // Tool route visited but load not yet polled: still no active tool.
        session.open("/tools/word-count");
        assert!(matches!(
            session.run(serde_json::Value::Null),
            Err(SessionError::NoActiveTool)
        ));
    }

    #[test]
    fn test_input_schema_needs_mounted_tool() {
        let mut session = session();
        assert!(matches!(
            session.input_schema(),
            Err(SessionError::NoActiveTool)
        ));

        session.open("/tools/word-count");
        session.poll();
        let schema = session.input_schema().unwrap();
        let json = serde_json::to_value(&schema).unwrap();
        assert!(json["properties"].get("text").is_some());
    }

    #[test]
    fn test_continuations_need_output() {
        let mut session = session();
        session.open("/tools/case-convert");
        session.poll();
        assert!(session.continuations().is_empty());

        session
            .run(serde_json::json!({ "mode": "upper", "text": "hi" }))
            .unwrap();
        let offered: Vec<_> = session
            .continuations()
            .iter()
            .map(|c| c.slug.clone())
            .collect();
        assert_eq!(offered, vec!["word-count", "slug-generate"]);
    }

    #[test]
    fn test_follow_unknown_target_rejected() {
        let mut session = session();
        session.open("/tools/case-convert");
        session.poll();
        assert!(matches!(
            session.follow("word-count"),
            Err(SessionError::NothingToHandOff)
        ));

        session
            .run(serde_json::json!({ "mode": "upper", "text": "hi" }))
            .unwrap();
        assert!(matches!(
            session.follow("resize-image"),
            Err(SessionError::UnknownContinuation(_))
        ));
    }

    #[test]
    fn test_end_to_end_resize_then_crop() {
        let mut session = session();

        // User opens the resize tool and picks photo.png manually.
        session.open("/tools/resize-image");
        session.poll();
        session.provide_input(photo()).unwrap();

        let output = session
            .run(serde_json::json!({ "width": 800, "height": 600 }))
            .unwrap();
        assert_eq!(output.file.name, "photo-800x600.png");

        // The chain menu offers the crop tool; following it hands the file
        // off and navigates.
        let offered: Vec<_> = session
            .continuations()
            .iter()
            .map(|c| c.slug.clone())
            .collect();
        assert_eq!(offered, vec!["crop-image"]);

        let page = session.follow("crop-image").unwrap();
        assert_eq!(session.route(), &Route::tool("crop-image"));

        // Store held the pair until the crop view consumed it on mount.
        assert_eq!(page, Page::ToolLoading { slug: "crop-image".into() });
        assert_eq!(session.store().source_tool().as_deref(), Some("resize-image"));
        assert_eq!(
            session.store().file().map(|f| f.name),
            Some("photo-800x600.png".to_string())
        );

        let Page::Tool(shell) = session.poll() else {
            panic!("expected mounted crop page");
        };
        assert_eq!(shell.input_file.as_deref(), Some("photo-800x600.png"));
        assert!(shell.picker_skipped);

        // The crop view consumed the hand-off and cleared the context.
        assert!(session.store().file().is_none());
        assert!(session.store().source_tool().is_none());
    }

    #[test]
    fn test_keep_context_config_overrides_clear() {
        let config = Config {
            session: crate::core::config::SessionConfig {
                keep_context_after_consume: true,
            },
            ..Config::default()
        };
        let catalog = Arc::new(ToolCatalog::builtin().clone());
        let mut session = Session::new(Arc::new(config), catalog);

        session.open("/tools/case-convert");
        session.poll();
        session
            .run(serde_json::json!({ "mode": "lower", "text": "HI" }))
            .unwrap();
        session.follow("word-count").unwrap();
        session.poll();

        // Consumed but retained for debugging.
        assert!(session.store().file().is_some());
    }

    #[test]
    fn test_unrelated_visit_does_not_inherit_cleared_context() {
        let mut session = session();
        session.open("/tools/case-convert");
        session.poll();
        session
            .run(serde_json::json!({ "mode": "lower", "text": "HI" }))
            .unwrap();
        session.follow("word-count").unwrap();
        session.poll();

        // Context was consumed and cleared; an unrelated tool starts clean.
        session.open("/tools/slug-generate");
        let Page::Tool(shell) = session.poll() else {
            panic!("expected tool page");
        };
        assert!(shell.input_file.is_none());
        assert!(!shell.picker_skipped);
    }
}
