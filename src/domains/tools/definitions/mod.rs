//! Tool definitions - one file per tool.

mod case_convert;
mod crop_image;
mod markdown_html;
mod resize_image;
mod slug_generate;
mod uuid_generate;
mod word_count;

pub use case_convert::{CaseConvertParams, CaseConvertView, CaseMode, convert_case};
pub use crop_image::{CropImageParams, CropImageView};
pub use markdown_html::{MarkdownToHtmlParams, MarkdownToHtmlView, render_markdown};
pub use resize_image::{ResizeImageParams, ResizeImageView};
pub use slug_generate::{SlugGenerateParams, SlugGenerateView, slugify};
pub use uuid_generate::{UuidGenerateParams, UuidGenerateView, generate_uuids};
pub use word_count::{WordCountParams, WordCountReport, WordCountView, count_text};
