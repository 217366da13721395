//! Case converter tool definition.
//!
//! Converts text between common casings: upper, lower, title, sentence,
//! snake, kebab and camel.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::handoff::StoredFile;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::view::{ToolOutput, ToolView, parse_args, text_input};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Target casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseMode {
    Upper,
    Lower,
    Title,
    Sentence,
    Snake,
    Kebab,
    Camel,
}

impl CaseMode {
    fn label(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Title => "title",
            Self::Sentence => "sentence",
            Self::Snake => "snake",
            Self::Kebab => "kebab",
            Self::Camel => "camel",
        }
    }
}

/// Parameters for the case converter.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CaseConvertParams {
    /// Target casing.
    pub mode: CaseMode,

    /// Text to convert. Falls back to the mounted input file when omitted.
    #[serde(default)]
    pub text: Option<String>,
}

// ============================================================================
// Core Logic
// ============================================================================

/// Convert `text` to the requested casing.
pub fn convert_case(text: &str, mode: CaseMode) -> String {
    match mode {
        CaseMode::Upper => text.to_uppercase(),
        CaseMode::Lower => text.to_lowercase(),
        CaseMode::Title => text
            .split_whitespace()
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" "),
        CaseMode::Sentence => capitalize(&text.to_lowercase()),
        CaseMode::Snake => words_of(text).join("_"),
        CaseMode::Kebab => words_of(text).join("-"),
        CaseMode::Camel => {
            let words = words_of(text);
            let mut out = String::new();
            for (i, word) in words.iter().enumerate() {
                if i == 0 {
                    out.push_str(word);
                } else {
                    out.push_str(&capitalize(word));
                }
            }
            out
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lowercased words, splitting on anything non-alphanumeric.
fn words_of(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Case converter view.
pub struct CaseConvertView {
    input: Option<StoredFile>,
}

impl CaseConvertView {
    pub const SLUG: &'static str = "case-convert";
    pub const TITLE: &'static str = "Case Converter";

    pub fn new() -> Self {
        Self { input: None }
    }
}

impl Default for CaseConvertView {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolView for CaseConvertView {
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
        schemars::schema_for!(CaseConvertParams)
    }

    fn run(&mut self, args: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let params: CaseConvertParams = parse_args(args)?;
        let text = text_input(params.text, self.input.as_ref(), Self::SLUG)?;
        let converted = convert_case(&text, params.mode);

        let stem = self.input.as_ref().map_or("converted", |f| f.stem());
        let name = format!("{}-{}.txt", stem, params.mode.label());
        info!(tool = Self::SLUG, mode = params.mode.label(), "converted {} characters", text.len());

        Ok(ToolOutput::new(
            StoredFile::text(name, converted),
            format!("Converted {} characters to {} case", text.len(), params.mode.label()),
        ))
    }
}
