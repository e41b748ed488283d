use std::io::{stdout, Write};

use termimad::crossterm::style::Color;
use termimad::{FmtLine, FmtText, MadSkin};

use crate::compare::{Comparison, DiffOutcome};
use crate::utils::timing::format_seconds;

struct RenderedMarkdown {
    text: String,
    line_width: Vec<usize>,
}

impl From<FmtText<'_, '_>> for RenderedMarkdown {
    fn from(fmt_text: FmtText<'_, '_>) -> Self {
        let text = format!("{}", fmt_text);
        let line_width = fmt_text.lines.iter().map(FmtLine::visible_length).collect();
        Self {
            text,
            line_width,
        }
    }
}

/// Renders Markdown reports to the terminal.
pub struct MarkdownPrinter {
    pub skin: MadSkin,
    pub wrap_width: Option<usize>,
}

impl Default for MarkdownPrinter {
    fn default() -> Self {
        let mut skin = MadSkin::default();
        skin.bold.set_fg(Color::Yellow);
        skin.inline_code.set_fg(Color::Cyan);
        Self {
            skin,
            wrap_width: None,
        }
    }
}

impl MarkdownPrinter {
    pub fn with_width(wrap_width: usize) -> Self {
        Self {
            wrap_width: Some(wrap_width),
            ..Default::default()
        }
    }

    fn render_markdown(&self, markdown: &str) -> RenderedMarkdown {
        FmtText::from(&self.skin, markdown, self.wrap_width).into()
    }

    /// Rendered text and its number of terminal rows.
    pub fn render(&self, markdown: &str) -> (String, usize) {
        let rendered = self.render_markdown(markdown);
        let rows = rendered.line_width.len();
        (rendered.text, rows)
    }

    pub fn print(&self, markdown: &str) -> std::io::Result<()> {
        let rendered = self.render_markdown(markdown);
        let mut out = stdout().lock();
        write!(out, "{}", rendered.text)?;
        out.flush()
    }

    pub fn print_comparison(&self, comparison: &Comparison) -> std::io::Result<()> {
        self.print(&comparison_markdown(comparison))
    }
}

/// A comparison round as Markdown: one section per model, then the differences if any.
pub fn comparison_markdown(comparison: &Comparison) -> String {
    let mut markdown = format!("# Comparison\n\n**Prompt:** `{}`\n", comparison.prompt.replace('\n', " "));
    if comparison.token_warning {
        markdown.push_str("\n⚠️ *The prompt is long for small models*\n");
    }
    for run in &comparison.runs {
        let note = if run.filtered { " ⚠️ filtered" } else { "" };
        markdown.push_str(&format!("\n## {} ({}){}\n\n", run.model, format_seconds(run.elapsed), note));
        markdown.push_str("```\n");
        markdown.push_str(&run.display_text());
        markdown.push_str("\n```\n");
    }
    match &comparison.difference {
        Some(DiffOutcome::Changed { words, unified, .. }) => {
            markdown.push_str(&format!("\n## Differences\n\n{}\n\n```\n{}```\n", words, unified));
        }
        Some(other) => markdown.push_str(&format!("\n## Differences\n\n{}\n", other)),
        None => {}
    }
    markdown
}

#[cfg(test)]
mod test_printing {
    use std::time::Duration;

    use crate::compare::{highlight_differences, Comparison, ModelRun};
    use crate::safety::{Filtered, FILTERED_OUTPUT_MARKER};
    use super::{comparison_markdown, MarkdownPrinter};

    fn comparison() -> Comparison {
        let runs = vec![
            ModelRun::new("fakegpt", Ok("one\ntwo".to_string()), Duration::from_millis(10)),
            ModelRun::new("prompt-refiner", Ok("one\nthree".to_string()), Duration::from_millis(20)),
        ];
        let difference = Some(highlight_differences(&runs));
        Comparison { prompt: "say\nsomething".to_string(), runs, difference, token_warning: false }
    }

    #[test]
    fn test_comparison_markdown() {
        let markdown = comparison_markdown(&comparison());
        assert!(markdown.contains("**Prompt:** `say something`"));
        assert!(markdown.contains("## fakegpt (0.01s)\n\n```\none\ntwo\n```"));
        assert!(markdown.contains("## prompt-refiner (0.02s)"));
        assert!(markdown.contains("one [-two-] {+three+}"));
        assert!(markdown.contains("--- fakegpt\n+++ prompt-refiner\n"));
        assert!(!markdown.contains("filtered"));
        assert!(!markdown.contains("long for small models"));
    }

    #[test]
    fn test_comparison_markdown_flags() {
        let runs = vec![ModelRun::screened(
            "rude",
            Ok(Filtered { text: FILTERED_OUTPUT_MARKER.to_string(), was_filtered: true }),
            Duration::ZERO,
        )];
        let comparison = Comparison { prompt: "hi".to_string(), runs, difference: None, token_warning: true };
        let markdown = comparison_markdown(&comparison);
        assert!(markdown.contains("## rude (0.00s) ⚠️ filtered"));
        assert!(markdown.contains("⚠️ *The prompt is long for small models*"));
    }

    #[test]
    fn test_render_counts_rows() {
        let printer = MarkdownPrinter::with_width(80);
        let (text, rows) = printer.render("# Title\n\nfirst line\n\nsecond line");
        assert!(!text.is_empty());
        assert!(rows >= 3);
    }
}
