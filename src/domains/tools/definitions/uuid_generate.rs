//! UUID generator tool definition.
//!
//! Generates one or many random version 4 UUIDs, one per line.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::domains::handoff::StoredFile;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::view::{ToolOutput, ToolView, parse_args};

/// Hard cap so a typo cannot ask for millions of lines.
const MAX_COUNT: usize = 1000;

fn default_count() -> usize {
    1
}

/// Parameters for the UUID generator.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UuidGenerateParams {
    /// How many UUIDs to generate (1..=1000).
    #[serde(default = "default_count")]
    pub count: usize,

    /// Render without hyphens.
    #[serde(default)]
    pub simple: bool,
}

impl Default for UuidGenerateParams {
    fn default() -> Self {
        Self {
            count: default_count(),
            simple: false,
        }
    }
}

/// Generate `count` random UUID strings.
pub fn generate_uuids(count: usize, simple: bool) -> Vec<String> {
    (0..count)
        .map(|_| {
            let id = Uuid::new_v4();
            if simple {
                id.simple().to_string()
            } else {
                id.to_string()
            }
        })
        .collect()
}

/// UUID generator view. Needs no input file; `mount` keeps the default
/// behavior but this tool never reads what it is handed.
pub struct UuidGenerateView {
    input: Option<StoredFile>,
}

impl UuidGenerateView {
    pub const SLUG: &'static str = "uuid-generate";
    pub const TITLE: &'static str = "UUID Generator";

    pub fn new() -> Self {
        Self { input: None }
    }
}

impl Default for UuidGenerateView {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolView for UuidGenerateView {
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
        schemars::schema_for!(UuidGenerateParams)
    }

    fn run(&mut self, args: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let params: UuidGenerateParams = parse_args(args)?;
        if params.count == 0 || params.count > MAX_COUNT {
            return Err(ToolError::invalid_arguments(format!(
                "count must be between 1 and {MAX_COUNT}"
            )));
        }

        let ids = generate_uuids(params.count, params.simple);
        info!(tool = Self::SLUG, count = params.count, "generated uuids");

        Ok(ToolOutput::new(
            StoredFile::text("uuids.txt", ids.join("\n") + "\n"),
            format!("Generated {} UUID{}", ids.len(), if ids.len() == 1 { "" } else { "s" }),
        ))
    }
}
