//! Lazy per-slug view loading.
//!
//! Tool views are not built up front: each live tool registers a factory
//! keyed by its slug, and the view is instantiated on the first visit to
//! its route. The slot walks `Deferred -> Loading -> Ready`; `Loading` is
//! the defined placeholder state the session renders between requesting a
//! view and resolving it. A view is built at most once per session and
//! keeps its state (mounted input, etc.) across revisits.

use std::collections::HashMap;

use tracing::debug;

use super::definitions::{
    CaseConvertView, CropImageView, MarkdownToHtmlView, ResizeImageView, SlugGenerateView,
    UuidGenerateView, WordCountView,
};
use super::view::ToolView;

/// Builds one view instance. Plain function pointer: view construction is
/// cheap and infallible; the laziness exists to defer it, not to fail it.
pub type ViewFactory = fn() -> Box<dyn ToolView>;

/// Externally observable state of a view slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No view is registered for this slug.
    Unavailable,

    /// A factory is registered but nothing has been built yet.
    Deferred,

    /// A load has been requested; the placeholder page is showing.
    Loading,

    /// The view is built and mounted views keep their state here.
    Ready,
}

enum ViewSlot {
    Deferred(ViewFactory),
    Loading(ViewFactory),
    Ready(Box<dyn ToolView>),
}

/// Registry of lazily built tool views, keyed by slug.
pub struct ViewLoader {
    slots: HashMap<String, ViewSlot>,
}

impl ViewLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Loader with every builtin live tool registered.
    pub fn with_builtin_views() -> Self {
        let mut loader = Self::new();
        loader.register(CaseConvertView::SLUG, || Box::new(CaseConvertView::new()));
        loader.register(WordCountView::SLUG, || Box::new(WordCountView::new()));
        loader.register(MarkdownToHtmlView::SLUG, || {
            Box::new(MarkdownToHtmlView::new())
        });
        loader.register(SlugGenerateView::SLUG, || Box::new(SlugGenerateView::new()));
        loader.register(UuidGenerateView::SLUG, || Box::new(UuidGenerateView::new()));
        loader.register(ResizeImageView::SLUG, || Box::new(ResizeImageView::new()));
        loader.register(CropImageView::SLUG, || Box::new(CropImageView::new()));
        loader
    }

    /// Register a view factory for a slug.
    pub fn register(&mut self, slug: impl Into<String>, factory: ViewFactory) {
        self.slots.insert(slug.into(), ViewSlot::Deferred(factory));
    }

    /// Observable state of the slot for `slug`.
    pub fn state(&self, slug: &str) -> LoadState {
        match self.slots.get(slug) {
            None => LoadState::Unavailable,
            Some(ViewSlot::Deferred(_)) => LoadState::Deferred,
            Some(ViewSlot::Loading(_)) => LoadState::Loading,
            Some(ViewSlot::Ready(_)) => LoadState::Ready,
        }
    }

    /// Request the view for `slug`, moving a deferred slot into `Loading`.
    /// Returns the state after the request.
    pub fn request(&mut self, slug: &str) -> LoadState {
        if let Some(slot) = self.slots.get_mut(slug) {
            if let ViewSlot::Deferred(factory) = *slot {
                debug!(slug, "view load requested");
                *slot = ViewSlot::Loading(factory);
            }
        }
        self.state(slug)
    }

    /// Settle the slot for `slug`: build the view if it is not built yet and
    /// return it. Returns `None` when no view is registered.
    pub fn resolve(&mut self, slug: &str) -> Option<&mut Box<dyn ToolView>> {
        let slot = self.slots.get_mut(slug)?;
        if let ViewSlot::Deferred(factory) | ViewSlot::Loading(factory) = *slot {
            debug!(slug, "building view");
            *slot = ViewSlot::Ready(factory());
        }
        match slot {
            ViewSlot::Ready(view) => Some(view),
            _ => unreachable!("slot settled above"),
        }
    }

    /// The already built view for `slug`, if any.
    pub fn get_ready(&mut self, slug: &str) -> Option<&mut Box<dyn ToolView>> {
        match self.slots.get_mut(slug) {
            Some(ViewSlot::Ready(view)) => Some(view),
            _ => None,
        }
    }

    /// Slugs with a registered view.
    pub fn registered_slugs(&self) -> Vec<&str> {
        self.slots.keys().map(String::as_str).collect()
    }
}

impl Default for ViewLoader {
    fn default() -> Self {
        Self::with_builtin_views()
    }
}
