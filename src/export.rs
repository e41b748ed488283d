//! # Export
//!
//! Formats one comparison round as a plain-text or Markdown report. Formatting only; nothing is read back.

use std::time::Duration;

use chrono::{DateTime, Local};

use crate::compare::Comparison;
use crate::utils::timing::format_seconds;

const REPORT_TITLE: &str = "Prompt Playground Results";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FILENAME_FORMAT: &str = "prompt_results_%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    PlainText,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::PlainText => "txt",
            ExportFormat::Markdown => "md",
        }
    }
}

/// Everything a report shows. `models`, `responses`, `timings` and `filtered` are parallel, in run order.
#[derive(Debug, Clone)]
pub struct ExportRecord {
    pub prompt_type: String,
    pub user_input: String,
    pub final_prompt: String,
    pub models: Vec<String>,
    pub responses: Vec<String>,
    pub timings: Vec<Duration>,
    /// Whether output screening redacted each response
    pub filtered: Vec<bool>,
    pub created_at: DateTime<Local>,
}

impl ExportRecord {
    /// Snapshot a comparison now. Failed runs export their error message.
    pub fn from_comparison(prompt_type: impl Into<String>, user_input: impl Into<String>, comparison: &Comparison) -> Self {
        Self {
            prompt_type: prompt_type.into(),
            user_input: user_input.into(),
            final_prompt: comparison.prompt.clone(),
            models: comparison.runs.iter().map(|run| run.model.clone()).collect(),
            responses: comparison.runs.iter().map(|run| run.display_text()).collect(),
            timings: comparison.runs.iter().map(|run| run.elapsed).collect(),
            filtered: comparison.runs.iter().map(|run| run.filtered).collect(),
            created_at: Local::now(),
        }
    }

    pub fn created_at(mut self, created_at: DateTime<Local>) -> Self {
        self.created_at = created_at;
        self
    }

    fn rows(&self) -> impl Iterator<Item=(&str, &str, Duration, bool)> {
        self.models.iter()
            .zip(self.responses.iter())
            .zip(self.timings.iter().zip(self.filtered.iter()))
            .map(|((model, response), (elapsed, filtered))| (model.as_str(), response.as_str(), *elapsed, *filtered))
    }

    pub fn to_plain_text(&self) -> String {
        let mut out = format!("{}\nGenerated: {}\n\n", REPORT_TITLE, self.created_at.format(TIMESTAMP_FORMAT));
        out.push_str(&format!("Prompt Type: {}\nUser Input: {}\n", self.prompt_type, self.user_input));
        out.push_str(&format!("Final Prompt:\n{}\n", self.final_prompt));
        for (model, response, elapsed, filtered) in self.rows() {
            let note = if filtered { " [filtered]" } else { "" };
            out.push_str(&format!("\n=== {} ({}){} ===\n{}\n", model, format_seconds(elapsed), note, response));
        }
        out
    }

    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n\n*Generated: {}*\n\n", REPORT_TITLE, self.created_at.format(TIMESTAMP_FORMAT));
        out.push_str(&format!("**Prompt Type:** {}\n\n**User Input:** {}\n\n", self.prompt_type, self.user_input));
        out.push_str(&format!("## Final Prompt\n\n```text\n{}\n```\n\n## Responses\n", self.final_prompt));
        for (model, response, elapsed, filtered) in self.rows() {
            let note = if filtered { ", output filtered" } else { "" };
            out.push_str(&format!("\n### {}\n\n*Time: {}{}*\n\n```text\n{}\n```\n", model, format_seconds(elapsed), note, response));
        }
        out
    }

    pub fn render(&self, format: ExportFormat) -> String {
        match format {
            ExportFormat::PlainText => self.to_plain_text(),
            ExportFormat::Markdown => self.to_markdown(),
        }
    }

    /// `prompt_results_YYYYMMDD_HHMMSS.txt` or `.md`, from the creation time.
    pub fn filename(&self, format: ExportFormat) -> String {
        format!("{}.{}", self.created_at.format(FILENAME_FORMAT), format.extension())
    }
}
