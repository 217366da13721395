//! Interactive stdio shell.
//!
//! Drives one `Session` over stdin/stdout: navigate routes, feed files to
//! the mounted tool, run it, and follow chain-menu continuations. This is
//! the only async surface in the crate; the session underneath stays
//! synchronous.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use crate::core::error::Result;
use crate::core::session::{Page, Session};
use crate::domains::handoff::StoredFile;

/// The stdio shell wrapping a session.
pub struct Shell {
    session: Session,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Run the read-eval-print loop until EOF or `quit`.
    pub async fn run(mut self) -> Result<()> {
        info!("Ready - reading commands from stdin");

        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut lines = stdin.lines();

        stdout.write_all(Self::banner().as_bytes()).await?;
        stdout.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "quit" || line == "exit" {
                break;
            }
            let reply = self.dispatch(line);
            stdout.write_all(reply.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        info!("Shell finished");
        Ok(())
    }

    fn banner() -> String {
        "toolchest shell - type 'help' for commands\n".to_string()
    }

    /// Execute one command line and render the reply.
    pub fn dispatch(&mut self, line: &str) -> String {
        match self.try_dispatch(line) {
            Ok(reply) => reply,
            Err(e) => format!("error: {e}"),
        }
    }

    /// Fallible command dispatch. Session, JSON and I/O failures bubble up
    /// as the unified [`crate::core::Error`] and are rendered by
    /// [`Shell::dispatch`].
    fn try_dispatch(&mut self, line: &str) -> Result<String> {
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        Ok(match command {
            "help" => Self::help(),
            "open" => {
                let mut page = self.session.open(rest);
                // A real client renders the loading frame and finishes it in
                // the same breath; the shell does the same.
                if matches!(page, Page::ToolLoading { .. }) {
                    page = self.session.poll();
                }
                render_page(&page)
            }
            "run" => {
                let args = if rest.is_empty() {
                    serde_json::Value::Null
                } else {
                    serde_json::from_str(rest)?
                };
                let output = self.session.run(args)?;
                format!(
                    "{} -> {} ({} bytes)",
                    output.summary,
                    output.file.name,
                    output.file.len()
                )
            }
            "schema" => {
                let schema = self.session.input_schema()?;
                serde_json::to_string_pretty(&schema)?
            }
            "input" => {
                let bytes = std::fs::read(rest)?;
                let name = std::path::Path::new(rest)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| rest.to_string());
                self.session
                    .provide_input(StoredFile::new(name.clone(), bytes))?;
                format!("loaded {name}")
            }
            "chain" => {
                let offered = self.session.continuations();
                if offered.is_empty() {
                    "no continuations (run the tool first)".to_string()
                } else {
                    offered
                        .iter()
                        .map(|c| format!("{} - {} ({})", c.slug, c.label, c.route))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            "follow" => {
                let mut page = self.session.follow(rest)?;
                if matches!(page, Page::ToolLoading { .. }) {
                    page = self.session.poll();
                }
                render_page(&page)
            }
            "context" => {
                let state = self.session.store().snapshot();
                match (state.file, state.source_tool) {
                    (Some(file), Some(source)) => {
                        format!("in flight: {} ({} bytes) from {}", file.name, file.len(), source)
                    }
                    _ => "no hand-off in flight".to_string(),
                }
            }
            "clear" => {
                self.session.store().clear_context();
                "context cleared".to_string()
            }
            "routes" => self.session.catalog().routes().join("\n"),
            _ => format!("unknown command '{command}' - type 'help'"),
        })
    }

    fn help() -> String {
        [
            "open <path>     navigate (/, /tools/<slug>, /categories/<slug>)",
            "input <file>    load a file from disk into the mounted tool",
            "run [json]      run the mounted tool with JSON arguments",
            "schema          show the mounted tool's argument JSON schema",
            "chain           list continuation suggestions for the last output",
            "follow <slug>   hand the last output to a suggested tool",
            "context         show the hand-off store",
            "clear           clear the hand-off store",
            "routes          list every route in the directory",
            "quit            exit",
        ]
        .join("\n")
    }
}

/// Render a page for the terminal.
pub fn render_page(page: &Page) -> String {
    match page {
        Page::Home { site, categories } => {
            let mut out = format!("{site}\n");
            for category in categories {
                out.push_str(&format!(
                    "  {} - {} ({} tools)\n",
                    category.slug, category.name, category.tool_count
                ));
            }
            out.trim_end().to_string()
        }
        Page::Category {
            name,
            description,
            tools,
            ..
        } => {
            let mut out = format!("{name}: {description}\n");
            for tool in tools {
                out.push_str(&format!("  {} - {} [{}]\n", tool.slug, tool.name, tool.status.label()));
            }
            out.trim_end().to_string()
        }
        Page::ToolLoading { slug } => format!("loading {slug}..."),
        Page::Tool(shell) => {
            let mut out = format!("{}\n{}\n", shell.title, shell.description);
            match (&shell.input_file, shell.picker_skipped) {
                (Some(name), true) => {
                    out.push_str(&format!("input: {name} (handed off, picker skipped)\n"))
                }
                (Some(name), false) => out.push_str(&format!("input: {name}\n")),
                (None, _) => out.push_str("input: none (use 'input <file>')\n"),
            }
            out.trim_end().to_string()
        }
        Page::ComingSoon { name, .. } => format!("{name} is coming soon"),
        Page::NotFound { path } => format!("404 - no page at {path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Config;
    use crate::domains::catalog::ToolCatalog;
    use std::sync::Arc;

    fn shell() -> Shell {
        let catalog = Arc::new(ToolCatalog::builtin().clone());
        Shell::new(Session::new(Arc::new(Config::default()), catalog))
    }

    #[test]
    fn test_open_settles_loading_frame() {
        let mut shell = shell();
        let reply = shell.dispatch("open /tools/word-count");
        assert!(reply.contains("Word Counter"));
        assert!(reply.contains("input: none"));
    }

    #[test]
    fn test_run_and_chain_flow() {
        let mut shell = shell();
        shell.dispatch("open /tools/case-convert");
        let reply = shell.dispatch(r#"run { "mode": "upper", "text": "hi" }"#);
        assert!(reply.contains("Converted 2 characters"));

        let chain = shell.dispatch("chain");
        assert!(chain.contains("word-count"));

        let followed = shell.dispatch("follow word-count");
        assert!(followed.contains("picker skipped"));
    }

    #[test]
    fn test_context_and_clear() {
        let mut shell = shell();
        assert_eq!(shell.dispatch("context"), "no hand-off in flight");
        assert_eq!(shell.dispatch("clear"), "context cleared");
    }

    #[test]
    fn test_unknown_command() {
        let reply = shell().dispatch("dance");
        assert!(reply.contains("unknown command"));
    }

    #[test]
    fn test_input_from_disk() {
        use std::io::Write;

        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        write!(tmp, "hello from disk").unwrap();

        let mut shell = shell();
        shell.dispatch("open /tools/word-count");
        let reply = shell.dispatch(&format!("input {}", tmp.path().display()));
        assert!(reply.starts_with("loaded "));

        let run = shell.dispatch("run");
        assert!(run.contains("3 words"));
    }

    #[test]
    fn test_run_invalid_json() {
        let mut shell = shell();
        shell.dispatch("open /tools/word-count");
        let reply = shell.dispatch("run not-json");
        assert!(reply.starts_with("error: JSON error"));
    }

    #[test]
    fn test_schema_command_renders_tool_params() {
        let mut shell = shell();
        shell.dispatch("open /tools/resize-image");
        let reply = shell.dispatch("schema");
        assert!(reply.contains("\"width\""));
        assert!(reply.contains("\"height\""));
    }

    #[test]
    fn test_schema_without_mounted_tool_errors() {
        let mut shell = shell();
        let reply = shell.dispatch("schema");
        assert!(reply.contains("No tool is mounted"));
    }

    #[test]
    fn test_input_missing_file_reports_io_error() {
        let mut shell = shell();
        shell.dispatch("open /tools/word-count");
        let reply = shell.dispatch("input /no/such/file.txt");
        assert!(reply.starts_with("error: I/O error"));
    }
}
