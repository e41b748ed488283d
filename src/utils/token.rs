//! Token counting traits and utilities

#[cfg(feature = "tiktoken")]
pub mod tiktoken;

/// Formatted prompts estimated above this many tokens should be flagged to the user.
pub const TOKEN_WARNING_THRESHOLD: usize = 400;

/// Token budget [truncate_for_model] callers fall back to.
pub const DEFAULT_MAX_TOKENS: usize = 512;

/// Appended to text cut by [truncate_for_model].
pub const TRUNCATION_MARKER: &str = "...";

/// Trait for counting tokens in a string.
pub trait CountToken {
    fn count_token(&self, string: &str) -> usize;
}

/// Blanket impl of CountToken for Fn(&str) -> usize.
impl<F> CountToken for F where F: Fn(&str) -> usize {
    fn count_token(&self, string: &str) -> usize {
        self(string)
    }
}

/// Rough token estimate: a quarter of the characters, plus one per space, plus one.
#[inline]
pub fn estimate_token_count(text: &str) -> usize {
    text.chars().count() / 4 + text.matches(' ').count() + 1
}

/// Counter backed by [estimate_token_count].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicCounter;

impl CountToken for HeuristicCounter {
    fn count_token(&self, string: &str) -> usize {
        estimate_token_count(string)
    }
}

/// Whether `text` is long enough to warrant a token warning.
#[inline]
pub fn exceeds_token_warning(text: &str) -> bool {
    estimate_token_count(text) > TOKEN_WARNING_THRESHOLD
}

/// Cut `text` to roughly `max_tokens` tokens using the heuristic estimate.
#[inline]
pub fn truncate_for_model(text: &str, max_tokens: usize) -> String {
    truncate_with(&HeuristicCounter, text, max_tokens)
}

/// Cut `text` to `max_tokens * 4` characters plus [TRUNCATION_MARKER] when `counter` says it is over budget.
pub fn truncate_with(counter: &impl CountToken, text: &str, max_tokens: usize) -> String {
    if counter.count_token(text) <= max_tokens {
        return text.to_string();
    }
    let target_chars = max_tokens * 4;
    match text.char_indices().nth(target_chars) {
        Some((byte_idx, _)) => format!("{}{}", &text[..byte_idx], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod test_token {
    use super::*;

    #[test]
    fn test_str_len_impl() {
        let counter = str::len;
        let size = counter.count_token("");
        assert_eq!(0, size);
    }

    #[test]
    fn test_estimate_token_count() {
        assert_eq!(4, estimate_token_count("hello world"));
        assert_eq!(1, estimate_token_count(""));
        assert_eq!(4, HeuristicCounter.count_token("hello world"));
        // characters, not bytes
        assert_eq!(2, estimate_token_count("ééééé"));
    }

    #[test]
    fn test_token_warning() {
        assert!(!exceeds_token_warning("short prompt"));
        assert!(exceeds_token_warning(&"word ".repeat(400)));
    }

    #[test]
    fn test_truncate_within_budget() {
        assert_eq!("hello world", truncate_for_model("hello world", 4));
    }

    #[test]
    fn test_truncate_over_budget() {
        let text = "a".repeat(100);
        // 100 / 4 + 0 + 1 = 26 tokens
        let truncated = truncate_for_model(&text, 10);
        assert_eq!(format!("{}...", "a".repeat(40)), truncated);
    }

    #[test]
    fn test_truncate_over_budget_but_short() {
        // many spaces push the estimate over budget while staying under max_tokens * 4 characters
        let text = "a a a a a a";
        assert_eq!(text, truncate_for_model(text, 3));
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "ü".repeat(30);
        let truncated = truncate_for_model(&text, 2);
        assert_eq!(format!("{}...", "ü".repeat(8)), truncated);
    }

    #[test]
    fn test_truncate_with_custom_counter() {
        let truncated = truncate_with(&str::len, "abcdefghij", 2);
        assert_eq!("abcdefgh...", truncated);
    }
}
