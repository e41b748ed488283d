//! # Prompt
//! A prompt is simply a string
//! ## PromptTemplate
//! A prompt template is a string with placeholders, plus a description and a hint for the input it expects.
//!
//! ## Placeholder
//! A placeholder is the text inside a `{}`, `[]` or `<>` pair. Only the input placeholder gets filled, and only
//! through one of its four spellings: `{input}`, `{INPUT}`, `[INPUT]` and `<input>`.
//!
//! Other placeholders are still extracted, which is what [PromptTemplate::validate] relies on.
//!
//! ### Counting tokens
//! [PromptTemplate::estimated_tokens] gives the heuristic token count of the formatted prompt. Anything above
//! [TOKEN_WARNING_THRESHOLD](crate::utils::token::TOKEN_WARNING_THRESHOLD) deserves a warning to the user.

use std::collections::HashSet;
use std::sync::Arc;

use log::warn;

use crate::prompt::errors::TemplateError;
use crate::utils::prompt_processing::{extract_placeholders, format_prompt, get_template_preview, validate_template};
use crate::utils::token::estimate_token_count;

/// A prompt template with placeholders and display metadata.
#[derive(Debug, Clone)]
#[readonly::make]
pub struct PromptTemplate {
    /// The template text, immutable
    template: Arc<String>,

    /// The placeholders in the template, readonly
    #[readonly]
    pub placeholders: HashSet<String>,

    /// What this kind of prompt is for, readonly
    #[readonly]
    pub description: String,

    /// Hint shown where the user types the input, readonly
    #[readonly]
    pub input_placeholder: String,
}

impl PromptTemplate {
    /// Create a prompt template from a string without metadata.
    pub fn new(template: impl Into<String>) -> Self {
        Self::with_metadata(template, String::new(), String::new())
    }

    /// Create a prompt template with a description and input hint. Warns if the template does not have any placeholder.
    pub fn with_metadata(template: impl Into<String>,
                         description: impl Into<String>,
                         input_placeholder: impl Into<String>) -> Self {
        let template = template.into();
        let placeholders = extract_placeholders(&template);
        if placeholders.is_empty() {
            warn!("Your prompt template does not have a placeholder. If this is intended, ignore this message. \
            Otherwise, check whether you have written placeholders correctly.\n\
            Got prompt template:\n\
            {}", template);
        }
        Self {
            template: Arc::new(template),
            placeholders,
            description: description.into(),
            input_placeholder: input_placeholder.into(),
        }
    }

    /// Get the prompt template as a string.
    #[inline]
    pub fn str(&self) -> &str {
        &self.template
    }

    /// Whether the template mentions one of the input placeholder spellings.
    pub fn accepts_input(&self) -> bool {
        crate::utils::prompt_processing::INPUT_PLACEHOLDERS
            .iter()
            .any(|spelling| self.template.contains(spelling))
    }

    #[inline]
    pub fn validate(&self) -> Result<(), TemplateError> {
        validate_template(&self.template)
    }

    /// Substitute `input` into the template.
    #[inline]
    pub fn format(&self, input: &str) -> String {
        format_prompt(&self.template, input)
    }

    #[inline]
    pub fn preview(&self, sample_input: Option<&str>) -> String {
        get_template_preview(&self.template, sample_input)
    }

    /// Heuristic token count of the template once `input` is substituted.
    pub fn estimated_tokens(&self, input: &str) -> usize {
        estimate_token_count(&self.format(input))
    }
}

pub mod errors {
    use std::fmt;
    use std::fmt::Formatter;

    use thiserror::Error;

    /// The three bracket styles a placeholder can be written in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum BracketStyle {
        Curly,
        Square,
        Angle,
    }

    impl BracketStyle {
        /// All styles, in the order they are checked.
        pub const ALL: [BracketStyle; 3] = [BracketStyle::Curly, BracketStyle::Square, BracketStyle::Angle];

        /// Opening and closing character of the style.
        pub fn chars(&self) -> (char, char) {
            match self {
                BracketStyle::Curly => ('{', '}'),
                BracketStyle::Square => ('[', ']'),
                BracketStyle::Angle => ('<', '>'),
            }
        }
    }

    impl fmt::Display for BracketStyle {
        fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
            let name = match self {
                BracketStyle::Curly => "curly",
                BracketStyle::Square => "square",
                BracketStyle::Angle => "angle",
            };
            f.write_str(name)
        }
    }

    /// Why a template was rejected.
    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum TemplateError {
        #[error("Template cannot be empty")]
        Empty,
        #[error("Template should contain at least one placeholder (e.g., {{input}})")]
        NoPlaceholder,
        #[error("Unmatched {0} brackets in template")]
        UnbalancedBrackets(BracketStyle),
    }
}

#[cfg(test)]
mod test_prompt {
    use std::collections::HashSet;
    use super::PromptTemplate;

    #[test]
    fn test_template_metadata() {
        let template = PromptTemplate::with_metadata("Summarize: {input}", "Summaries", "Paste text");
        assert_eq!("Summarize: {input}", template.str());
        assert_eq!(HashSet::from(["input".to_string()]), template.placeholders);
        assert_eq!("Summaries", template.description);
        assert_eq!("Paste text", template.input_placeholder);
        assert!(template.accepts_input());
        assert!(template.validate().is_ok());
    }

    #[test]
    fn test_template_format_and_tokens() {
        let template = PromptTemplate::new("Say {input}");
        assert_eq!("Say hello world", template.format("hello world"));
        // "Say hello world": 15 chars / 4 = 3, two spaces, plus one
        assert_eq!(6, template.estimated_tokens("hello world"));
        assert_eq!("Say your input here", template.preview(None));
    }

    #[test]
    fn test_template_without_input_placeholder() {
        let template = PromptTemplate::new("Describe {topic}");
        assert!(!template.accepts_input());
        assert!(template.validate().is_ok());
        assert_eq!("Describe {topic}", template.format("cats"));
    }
}
