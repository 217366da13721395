//! Crop image tool definition.
//!
//! Validates the requested crop region and emits the image under a name
//! annotated with the region. Like the resize tool, the raster operation
//! itself is out of scope; image payloads travel through untouched.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::handoff::StoredFile;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::view::{ToolOutput, ToolView, parse_args};

use super::resize_image::validate_dimensions;

/// Parameters for the crop tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CropImageParams {
    /// Left edge of the crop region, in pixels.
    #[serde(default)]
    pub x: u32,

    /// Top edge of the crop region, in pixels.
    #[serde(default)]
    pub y: u32,

    /// Region width in pixels.
    pub width: u32,

    /// Region height in pixels.
    pub height: u32,
}

/// Crop image view.
pub struct CropImageView {
    input: Option<StoredFile>,
}

impl CropImageView {
    pub const SLUG: &'static str = "crop-image";
    pub const TITLE: &'static str = "Crop Image";

    pub fn new() -> Self {
        Self { input: None }
    }
}

impl Default for CropImageView {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolView for CropImageView {
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
        schemars::schema_for!(CropImageParams)
    }

    fn run(&mut self, args: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let params: CropImageParams = parse_args(args)?;
        validate_dimensions(params.width, params.height)?;

        let input = self.input.as_ref().ok_or_else(|| {
            ToolError::missing_input("crop-image needs an image file")
        })?;

        let ext = input.extension().unwrap_or("png");
        let name = format!(
            "{}-crop-{}x{}at{}x{}.{}",
            input.stem(),
            params.width,
            params.height,
            params.x,
            params.y,
            ext
        );
        info!(
            tool = Self::SLUG,
            file = %input.name,
            x = params.x,
            y = params.y,
            width = params.width,
            height = params.height,
            "cropped image"
        );

        Ok(ToolOutput::new(
            StoredFile::new(name, input.bytes.clone()),
            format!(
                "Cropped {} to {}x{} at ({}, {})",
                input.name, params.width, params.height, params.x, params.y
            ),
        ))
    }
}
