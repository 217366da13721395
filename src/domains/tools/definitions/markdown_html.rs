//! Markdown to HTML tool definition.
//!
//! A small line-oriented renderer covering the common subset: headings,
//! fenced code blocks, unordered lists, horizontal rules, inline code,
//! bold, italic and links. All text is HTML-escaped.

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::domains::handoff::StoredFile;
use crate::domains::tools::error::ToolError;
use crate::domains::tools::view::{ToolOutput, ToolView, parse_args, text_input};

/// Parameters for the Markdown renderer.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MarkdownToHtmlParams {
    /// Markdown to render. Falls back to the mounted input file when omitted.
    #[serde(default)]
    pub text: Option<String>,
}

/// Escape the characters HTML treats specially.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap alternating segments split on `delim` in `<tag>`.
fn wrap_pairs(text: &str, delim: &str, tag: &str) -> String {
    let segments: Vec<&str> = text.split(delim).collect();
    if segments.len() < 3 {
        return text.to_string();
    }
    let mut out = String::new();
    // An unmatched trailing delimiter keeps its segment literal.
    let paired = segments.len() - (segments.len() + 1) % 2;
    for (i, segment) in segments.iter().enumerate() {
        if i >= paired {
            out.push_str(delim);
            out.push_str(segment);
        } else if i % 2 == 1 {
            out.push_str(&format!("<{tag}>{segment}</{tag}>"));
        } else {
            out.push_str(segment);
        }
    }
    out
}

/// Replace `[text](url)` with anchors. Input is already escaped.
fn render_links(text: &str) -> String {
    let mut out = String::new();
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let Some(mid) = rest[open..].find("](") else { break };
        let Some(close) = rest[open + mid..].find(')') else { break };
        let label = &rest[open + 1..open + mid];
        let url = &rest[open + mid + 2..open + mid + close];
        out.push_str(&rest[..open]);
        out.push_str(&format!("<a href=\"{url}\">{label}</a>"));
        rest = &rest[open + mid + close + 1..];
    }
    out.push_str(rest);
    out
}

/// Render inline markup: code spans, links, bold, italic.
fn render_inline(text: &str) -> String {
    let escaped = escape_html(text);
    let mut out = String::new();
    for (i, segment) in escaped.split('`').enumerate() {
        if i % 2 == 1 {
            out.push_str(&format!("<code>{segment}</code>"));
        } else {
            let segment = render_links(segment);
            let segment = wrap_pairs(&segment, "**", "strong");
            out.push_str(&wrap_pairs(&segment, "*", "em"));
        }
    }
    out
}

/// Render a Markdown document to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let mut html: Vec<String> = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut in_list = false;
    let mut in_fence = false;

    let flush_paragraph = |html: &mut Vec<String>, paragraph: &mut Vec<String>| {
        if !paragraph.is_empty() {
            html.push(format!("<p>{}</p>", render_inline(&paragraph.join(" "))));
            paragraph.clear();
        }
    };
    let close_list = |html: &mut Vec<String>, in_list: &mut bool| {
        if *in_list {
            html.push("</ul>".to_string());
            *in_list = false;
        }
    };

    for line in markdown.lines() {
        let trimmed = line.trim_end();

        if trimmed.trim_start().starts_with("```") {
            flush_paragraph(&mut html, &mut paragraph);
            close_list(&mut html, &mut in_list);
            if in_fence {
                html.push("</code></pre>".to_string());
            } else {
                html.push("<pre><code>".to_string());
            }
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            html.push(escape_html(trimmed));
            continue;
        }

        if trimmed.is_empty() {
            flush_paragraph(&mut html, &mut paragraph);
            close_list(&mut html, &mut in_list);
            continue;
        }

        let heading_level = trimmed.chars().take_while(|&c| c == '#').count();
        if (1..=6).contains(&heading_level) && trimmed[heading_level..].starts_with(' ') {
            flush_paragraph(&mut html, &mut paragraph);
            close_list(&mut html, &mut in_list);
            let body = render_inline(trimmed[heading_level..].trim());
            html.push(format!("<h{heading_level}>{body}</h{heading_level}>"));
            continue;
        }

        if trimmed == "---" || trimmed == "***" {
            flush_paragraph(&mut html, &mut paragraph);
            close_list(&mut html, &mut in_list);
            html.push("<hr>".to_string());
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ").or_else(|| trimmed.strip_prefix("* ")) {
            flush_paragraph(&mut html, &mut paragraph);
            if !in_list {
                html.push("<ul>".to_string());
                in_list = true;
            }
            html.push(format!("<li>{}</li>", render_inline(item.trim())));
            continue;
        }

        paragraph.push(trimmed.to_string());
    }

    flush_paragraph(&mut html, &mut paragraph);
    close_list(&mut html, &mut in_list);
    if in_fence {
        html.push("</code></pre>".to_string());
    }

    html.join("\n")
}

/// Markdown renderer view.
pub struct MarkdownToHtmlView {
    input: Option<StoredFile>,
}

impl MarkdownToHtmlView {
    pub const SLUG: &'static str = "markdown-to-html";
    pub const TITLE: &'static str = "Markdown to HTML";

    pub fn new() -> Self {
        Self { input: None }
    }
}

impl Default for MarkdownToHtmlView {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolView for MarkdownToHtmlView {
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
        schemars::schema_for!(MarkdownToHtmlParams)
    }

    fn run(&mut self, args: serde_json::Value) -> Result<ToolOutput, ToolError> {
        let params: MarkdownToHtmlParams = parse_args(args)?;
        let markdown = text_input(params.text, self.input.as_ref(), Self::SLUG)?;
        let html = render_markdown(&markdown);
        info!(tool = Self::SLUG, bytes = html.len(), "rendered markdown");

        let stem = self.input.as_ref().map_or("document", |f| f.stem());
        Ok(ToolOutput::new(
            StoredFile::text(format!("{stem}.html"), html),
            format!("Rendered {} characters of Markdown to HTML", markdown.len()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let html = render_markdown("# Title\n\nSome text.");
        assert_eq!(html, "<h1>Title</h1>\n<p>Some text.</p>");
    }

    #[test]
    fn test_list() {
        let html = render_markdown("- one\n- two\n");
        assert_eq!(html, "<ul>\n<li>one</li>\n<li>two</li>\n</ul>");
    }

    #[test]
    fn test_inline_markup() {
        let html = render_markdown("use `code` and **bold** and *em*");
        assert_eq!(
            html,
            "<p>use <code>code</code> and <strong>bold</strong> and <em>em</em></p>"
        );
    }

    #[test]
    fn test_link() {
        let html = render_markdown("see [docs](https://example.com)");
        assert_eq!(html, "<p>see <a href=\"https://example.com\">docs</a></p>");
    }

    #[test]
    fn test_escaping() {
        let html = render_markdown("a < b & c");
        assert_eq!(html, "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_code_fence_is_literal() {
        let html = render_markdown("```\n**not bold** <tag>\n```");
        assert_eq!(
            html,
            "<pre><code>\n**not bold** &lt;tag&gt;\n</code></pre>"
        );
    }

    #[test]
    fn test_unclosed_fence_is_closed() {
        let html = render_markdown("```\ncode");
        assert!(html.ends_with("</code></pre>"));
    }

    #[test]
    fn test_horizontal_rule() {
        assert_eq!(render_markdown("---"), "<hr>");
    }

    #[test]
    fn test_unmatched_emphasis_stays_literal() {
        let html = render_markdown("2 * 3 = 6");
        assert_eq!(html, "<p>2 * 3 = 6</p>");
    }

    #[test]
    fn test_run_names_output_after_input() {
        let mut view = MarkdownToHtmlView::new();
        view.mount(Some(StoredFile::text("readme.md", "# Hi")));
        let output = view.run(serde_json::Value::Null).unwrap();
        assert_eq!(output.file.name, "readme.html");
        assert_eq!(output.file.mime, "text/html");
        assert_eq!(output.file.as_text(), Some("<h1>Hi</h1>"));
    }
}
