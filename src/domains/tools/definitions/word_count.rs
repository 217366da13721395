//! Word counter tool definition.
//!
//! Counts words, characters and lines and estimates reading time, emitting
//! a plain-text report that can be handed to the next tool.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domains::handoff::StoredFile;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::view::{ToolOutput, ToolView, parse_args, text_input};

/// Words read per minute used for the reading-time estimate.
const READING_WPM: usize = 200;

/// Parameters for the word counter.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct WordCountParams {
    /// Text to analyse. Falls back to the mounted input file when omitted.
    #[serde(default)]
    pub text: Option<String>,
}

/// Counting results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCountReport {
    pub words: usize,
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub lines: usize,
    /// Estimated reading time in whole minutes, at least 1 for non-empty text.
    pub reading_minutes: usize,
}

/// Count words, characters and lines in `text`.
pub fn count_text(text: &str) -> WordCountReport {
    let words = text.split_whitespace().count();
    let characters = text.chars().count();
    let characters_no_spaces = text.chars().filter(|c| !c.is_whitespace()).count();
    let lines = if text.is_empty() { 0 } else { text.lines().count() };
    let reading_minutes = if words == 0 {
        0
    } else {
        usize::max(1, words.div_ceil(READING_WPM))
    };

    WordCountReport {
        words,
        characters,
        characters_no_spaces,
        lines,
        reading_minutes,
    }
}

impl WordCountReport {
    fn render(&self) -> String {
        format!(
            "words: {}\ncharacters: {}\ncharacters (no spaces): {}\nlines: {}\nreading time: {} min\n",
            self.words, self.characters, self.characters_no_spaces, self.lines, self.reading_minutes
        )
    }
}

/// Word counter view.
pub struct WordCountView {
    input: Option<StoredFile>,
}

impl WordCountView {
    pub const SLUG: &'static str = "word-count";
    pub const TITLE: &'static str = "Word Counter";

    pub fn new() -> Self {
        Self { input: None }
    }
}

impl Default for WordCountView {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolView for WordCountView {
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
        schemars::schema_for!(WordCountParams)
    }

    fn run(&mut self, args: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let params: WordCountParams = parse_args(args)?;
        let text = text_input(params.text, self.input.as_ref(), Self::SLUG)?;
        let report = count_text(&text);
        info!(tool = Self::SLUG, words = report.words, "counted text");

        let stem = self.input.as_ref().map_or("text", |f| f.stem());
        let summary = format!(
            "{} words, {} characters, {} lines",
            report.words, report.characters, report.lines
        );
        Ok(ToolOutput::new(
            StoredFile::text(format!("{stem}-count.txt"), report.render()),
            summary,
        ))
    }
}
