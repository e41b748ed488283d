use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::{NoExpand, Regex};

use crate::prompt::errors::{BracketStyle, TemplateError};

/// The only spellings of the input placeholder that [format_prompt] substitutes.
pub const INPUT_PLACEHOLDERS: [&str; 4] = ["{input}", "{INPUT}", "[INPUT]", "<input>"];

/// Sample input used by [get_template_preview] when the caller has none.
pub const DEFAULT_PREVIEW_INPUT: &str = "your input here";

lazy_static! {
    static ref INPUT_PLACEHOLDER_RE: Regex = Regex::new(r"\{input\}|\{INPUT\}|\[INPUT\]|<input>").unwrap();
    static ref CURLY_RE: Regex = Regex::new(r"\{([^}]+)\}").unwrap();
    static ref SQUARE_RE: Regex = Regex::new(r"\[([^\]]+)\]").unwrap();
    static ref ANGLE_RE: Regex = Regex::new(r"<([^>]+)>").unwrap();
}

/// Replaces every input placeholder spelling in `template` with `input_text` and trims the result.
///
/// Returns `template` untouched if either argument is empty. Substitution is a single pass, so placeholder
/// spellings contained in `input_text` are kept literally.
pub fn format_prompt(template: &str, input_text: &str) -> String {
    if template.is_empty() || input_text.is_empty() {
        return template.to_string();
    }
    INPUT_PLACEHOLDER_RE
        .replace_all(template, NoExpand(input_text))
        .trim()
        .to_string()
}

/// Collects the contents of every `{...}`, `[...]` and `<...>` pair in `template`.
pub fn extract_placeholders(template: &str) -> HashSet<String> {
    [&*CURLY_RE, &*SQUARE_RE, &*ANGLE_RE]
        .into_iter()
        .flat_map(|re| re.captures_iter(template).map(|captures| captures[1].to_string()))
        .collect()
}

/// Checks that a template is non-empty, has a placeholder and has equal open/close counts per bracket style.
///
/// Brackets are counted, not paired: `}{input}{` is accepted.
pub fn validate_template(template: &str) -> Result<(), TemplateError> {
    if template.trim().is_empty() {
        return Err(TemplateError::Empty);
    }
    if extract_placeholders(template).is_empty() {
        return Err(TemplateError::NoPlaceholder);
    }
    for style in BracketStyle::ALL {
        let (open, close) = style.chars();
        let opens = template.matches(open).count();
        let closes = template.matches(close).count();
        if opens != closes {
            return Err(TemplateError::UnbalancedBrackets(style));
        }
    }
    Ok(())
}

/// Shows how `template` reads once `sample_input` is substituted.
#[inline]
pub fn get_template_preview(template: &str, sample_input: Option<&str>) -> String {
    format_prompt(template, sample_input.unwrap_or(DEFAULT_PREVIEW_INPUT))
}

const INPUT_SUGGESTIONS: [(&str, &str); 9] = [
    ("instruction", "Write a specific instruction or task"),
    ("zero-shot", "Ask a question or describe a problem"),
    ("few-shot", "Ask a question similar to the examples"),
    ("chain-of-thought", "Describe a complex problem to solve step-by-step"),
    ("role-playing", "Describe what you want the assistant to help with"),
    ("creative", "Describe what you want to create or write"),
    ("analysis", "Provide text or data to analyze"),
    ("translation", "Enter text to translate"),
    ("summarization", "Provide text to summarize"),
];

/// Suggests input hint text for a prompt type name.
///
/// Exact (case-insensitive) names win; otherwise the first suggestion whose key contains, or is contained in, the
/// name is used.
pub fn suggest_input_placeholder(prompt_type: &str) -> &'static str {
    let prompt_type = prompt_type.to_lowercase();
    if let Some((_, hint)) = INPUT_SUGGESTIONS.iter().find(|(key, _)| *key == prompt_type) {
        return *hint;
    }
    INPUT_SUGGESTIONS
        .iter()
        .find(|(key, _)| key.contains(prompt_type.as_str()) || prompt_type.contains(key))
        .map_or("Enter your input here", |(_, hint)| *hint)
}

#[cfg(test)]
mod test_prompt_processing {
    use std::collections::HashSet;
    use crate::prompt::errors::{BracketStyle, TemplateError};
    use super::*;

    #[test]
    fn test_format_replaces_every_spelling() {
        let template = "  {input} / {INPUT} / [INPUT] / <input>  ";
        assert_eq!("x / x / x / x", format_prompt(template, "x"));

        let template = "Translate: {input}";
        let formatted = format_prompt(template, "bonjour");
        assert!(formatted.contains("bonjour"));
        assert!(!formatted.contains("{input}"));
    }

    #[test]
    fn test_format_empty_arguments() {
        assert_eq!("  {input}  ", format_prompt("  {input}  ", ""));
        assert_eq!("", format_prompt("", "anything"));
    }

    #[test]
    fn test_format_keeps_other_spellings() {
        let formatted = format_prompt("{Input} {text} {input}", "v");
        assert_eq!("{Input} {text} v", formatted);
    }

    #[test]
    fn test_format_does_not_rescan_input() {
        let formatted = format_prompt("A: {input} B: [INPUT]", "<input>");
        assert_eq!("A: <input> B: <input>", formatted);
        let formatted = format_prompt("{input}", "$0 and ${1}");
        assert_eq!("$0 and ${1}", formatted);
    }

    #[test]
    fn test_extract_placeholders() {
        let expect = HashSet::from(["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(expect, extract_placeholders("{a}[b]<c>"));

        let expect = HashSet::from(["input".to_string()]);
        assert_eq!(expect, extract_placeholders("{input} and again {input}"));

        assert!(extract_placeholders("{} [] <>").is_empty());
    }

    #[test]
    fn test_validate_template() {
        assert_eq!(Err(TemplateError::Empty), validate_template(""));
        assert_eq!(Err(TemplateError::Empty), validate_template("   \n"));
        assert_eq!(Err(TemplateError::NoPlaceholder), validate_template("no placeholders here"));
        assert_eq!(
            Err(TemplateError::UnbalancedBrackets(BracketStyle::Curly)),
            validate_template("{input} } extra")
        );
        assert_eq!(
            Err(TemplateError::UnbalancedBrackets(BracketStyle::Square)),
            validate_template("{input} [")
        );
        assert_eq!(
            Err(TemplateError::UnbalancedBrackets(BracketStyle::Angle)),
            validate_template("{input} > 3")
        );
        assert_eq!(Ok(()), validate_template("Answer: {input}"));
    }

    #[test]
    fn test_validate_counts_instead_of_pairing() {
        assert_eq!(Ok(()), validate_template("}{input}{"));
    }

    #[test]
    fn test_validate_messages() {
        assert_eq!("Template cannot be empty", validate_template("").unwrap_err().to_string());
        assert!(validate_template("plain")
            .unwrap_err()
            .to_string()
            .starts_with("Template should contain at least one placeholder"));
        assert!(validate_template("{input} }")
            .unwrap_err()
            .to_string()
            .starts_with("Unmatched curly brackets"));
    }

    #[test]
    fn test_preview() {
        assert_eq!("Q: your input here", get_template_preview("Q: {input}", None));
        assert_eq!("Q: why", get_template_preview("Q: {input}", Some("why")));
    }

    #[test]
    fn test_suggest_input_placeholder() {
        assert_eq!("Enter text to translate", suggest_input_placeholder("Translation"));
        assert_eq!("Ask a question similar to the examples", suggest_input_placeholder("few-shot prompting"));
        assert_eq!("Provide text or data to analyze", suggest_input_placeholder("analysis"));
        assert_eq!("Enter your input here", suggest_input_placeholder("something else"));
    }
}
