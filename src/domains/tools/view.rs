//! The tool view contract - "render into the tool shell".
//!
//! Every tool page is one independent view implementing [`ToolView`]. The
//! session owns the views (via the lazy loader), mounts them when their
//! route is visited, and runs them on user input. A view never talks to
//! another view directly; files travel between tools only through the
//! hand-off store.

use serde::de::DeserializeOwned;

use crate::domains::handoff::StoredFile;

use super::error::ToolError;

/// What happened when a view was mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountOutcome {
    /// Whether an incoming hand-off file pre-populated the input, skipping
    /// the manual file-picker step.
    pub prefilled: bool,
}

/// Result of running a tool.
///
/// Every tool emits a file so its result can be handed to the next tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// The produced file.
    pub file: StoredFile,

    /// One-line human summary of what was done.
    pub summary: String,
}

impl ToolOutput {
    pub fn new(file: StoredFile, summary: impl Into<String>) -> Self {
        Self {
            file,
            summary: summary.into(),
        }
    }
}

/// One independent UI+logic unit per tool.
pub trait ToolView: Send {
    /// Slug of the tool this view renders; matches the catalogue entry.
    fn slug(&self) -> &'static str;

    /// Display title.
    fn title(&self) -> &'static str;

    /// Current input file, if one was provided or handed off.
    fn input(&self) -> Option<&StoredFile>;

    /// Provide an input file (the manual file-picker path).
    fn set_input(&mut self, file: StoredFile);

    /// Mount the view, optionally pre-populating its input from an incoming
    /// hand-off. Called every time the tool's route is visited.
    fn mount(&mut self, incoming: Option<StoredFile>) -> MountOutcome {
        match incoming {
            Some(file) => {
                self.set_input(file);
                MountOutcome { prefilled: true }
            }
            None => MountOutcome { prefilled: false },
        }
    }

    /// Whether consuming a hand-off should clear the store so the next
    /// unrelated tool visit does not also inherit it.
    fn clears_context(&self) -> bool {
        true
    }

    /// JSON schema of the arguments `run` accepts.
    fn input_schema(&self) -> schemars::Schema;

    /// Run the tool with the given arguments.
    fn run(&mut self, args: serde_json::Value) -> Result<ToolOutput, ToolError>;
}

/// Deserialize tool arguments, treating `null` as "all defaults".
pub fn parse_args<T>(args: serde_json::Value) -> Result<T, ToolError>
where
    T: DeserializeOwned,
{
    let args = if args.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Text for a text tool: the inline `text` argument wins, otherwise the
/// mounted input file is decoded as UTF-8.
pub fn text_input(
    inline: Option<String>,
    input: Option<&StoredFile>,
    slug: &str,
) -> Result<String, ToolError> {
    if let Some(text) = inline {
        return Ok(text);
    }
    match input {
        Some(file) => file
            .as_text()
            .map(str::to_owned)
            .ok_or_else(|| ToolError::not_text(format!("{} is not UTF-8 text", file.name))),
        None => Err(ToolError::missing_input(format!(
            "{slug} needs a 'text' argument or an input file"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Default)]
    struct DemoParams {
        #[serde(default)]
        count: usize,
    }

    #[test]
    fn test_parse_args_null_uses_defaults() {
        let params: DemoParams = parse_args(serde_json::Value::Null).unwrap();
        assert_eq!(params.count, 0);
    }

    #[test]
    fn test_parse_args_rejects_wrong_shape() {
        let result: Result<DemoParams, _> = parse_args(serde_json::json!({ "count": "three" }));
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn test_text_input_prefers_inline() {
        let file = StoredFile::text("a.txt", "from file");
        let text = text_input(Some("inline".into()), Some(&file), "demo").unwrap();
        assert_eq!(text, "inline");
    }

    #[test]
    fn test_text_input_falls_back_to_file() {
        let file = StoredFile::text("a.txt", "from file");
        let text = text_input(None, Some(&file), "demo").unwrap();
        assert_eq!(text, "from file");
    }

    #[test]
    fn test_text_input_rejects_binary() {
        let file = StoredFile::new("a.bin", vec![0xff, 0xfe, 0x00]);
        let result = text_input(None, Some(&file), "demo");
        assert!(matches!(result, Err(ToolError::NotText(_))));
    }

    #[test]
    fn test_text_input_missing() {
        let result = text_input(None, None, "demo");
        assert!(matches!(result, Err(ToolError::MissingInput(_))));
    }
}
