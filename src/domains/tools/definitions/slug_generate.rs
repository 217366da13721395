//! Slug generator tool definition.
//!
//! Turns any text into a lowercase, separator-joined slug suitable for URLs.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::handoff::StoredFile;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::view::{ToolOutput, ToolView, parse_args, text_input};

fn default_separator() -> String {
    "-".to_string()
}

/// Parameters for the slug generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SlugGenerateParams {
    /// Text to slugify. Falls back to the mounted input file when omitted.
    #[serde(default)]
    pub text: Option<String>,

    /// Separator between words.
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for SlugGenerateParams {
    fn default() -> Self {
        Self {
            text: None,
            separator: default_separator(),
        }
    }
}

/// Slugify `text`: lowercase alphanumeric runs joined by `separator`.
/// Diacritics and symbols are dropped, not transliterated.
pub fn slugify(text: &str, separator: &str) -> String {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Slug generator view.
pub struct SlugGenerateView {
    input: Option<StoredFile>,
}

impl SlugGenerateView {
    pub const SLUG: &'static str = "slug-generate";
    pub const TITLE: &'static str = "Slug Generator";

    pub fn new() -> Self {
        Self { input: None }
    }
}

impl Default for SlugGenerateView {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolView for SlugGenerateView {
    fn slug(&self) -> &'static str {
        Self::SLUG
    }

    fn title(&self) -> &'static str {
        Self::TITLE
    }

    fn input(&self) -> Option<&StoredFile> {
        self.input.as_ref()
    }

    fn set_input(&mut self, file: StoredFile) {
        self.input = Some(file);
    }

    fn input_schema(&self) -> schemars::Schema {
        schemars::schema_for!(SlugGenerateParams)
    }

    fn run(&mut self, args: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let params: SlugGenerateParams = parse_args(args)?;
        let text = text_input(params.text, self.input.as_ref(), Self::SLUG)?;
        let slug = slugify(&text, &params.separator);
        info!(tool = Self::SLUG, slug = %slug, "generated slug");

        Ok(ToolOutput::new(
            StoredFile::text("slug.txt", slug.clone()),
            format!("Generated slug '{slug}'"),
        ))
    }
}
