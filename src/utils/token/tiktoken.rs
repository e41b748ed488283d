use std::collections::HashMap;

use anyhow::{bail, Result};
use lazy_static::lazy_static;
pub use tiktoken_rs::{get_bpe_from_model, CoreBPE};

use crate::utils::token::{estimate_token_count, CountToken};

lazy_static! {
    /// const map from model name to max tokens.
    pub static ref MODEL_TO_MAX_TOKENS: HashMap<&'static str, usize> = HashMap::from([
        ("gpt-4", 8192),
        ("gpt-4-0613", 8192),
        ("gpt-4-32k", 32768),
        ("gpt-4-32k-0613", 32768),
        ("gpt-3.5-turbo", 4096),
        ("gpt-3.5-turbo-16k", 16384),
        ("gpt-3.5-turbo-0613", 4096),
        ("gpt-3.5-turbo-16k-0613", 16384),
    ]);
}

/// Counter using the Tiktoken tokenizer, for checking the heuristic estimate against a real BPE.
#[derive(Clone)]
#[readonly::make]
pub struct Tiktoken {
    /// The requested model name. read-only.
    #[readonly]
    pub model: String,
    /// The model family whose BPE is used. read-only.
    #[readonly]
    pub family: &'static str,
    /// The tokenizer. read-only.
    #[readonly]
    pub bpe: CoreBPE,
}

impl Tiktoken {
    /// Create a new Tiktoken counter. Fails for models missing from [MODEL_TO_MAX_TOKENS].
    pub fn new(model: impl Into<String>) -> Result<Self> {
        let model = model.into();
        if !MODEL_TO_MAX_TOKENS.contains_key(model.as_str()) {
            bail!("model {} is not supported", model);
        }
        let family = if model.starts_with("gpt-4-32k") {
            "gpt-4-32k"
        } else if model.starts_with("gpt-4") {
            "gpt-4"
        } else {
            "gpt-3.5-turbo"
        };
        let bpe = get_bpe_from_model(family)?;
        Ok(Tiktoken {
            model,
            family,
            bpe,
        })
    }

    /// Context window of the requested model.
    pub fn max_tokens(&self) -> usize {
        MODEL_TO_MAX_TOKENS.get(self.model.as_str()).copied().unwrap_or_default()
    }

    /// How far the heuristic estimate is from the BPE count of `text`, positive when it overcounts.
    pub fn estimate_error(&self, text: &str) -> isize {
        estimate_token_count(text) as isize - self.count_token(text) as isize
    }
}

impl CountToken for Tiktoken {
    fn count_token(&self, string: &str) -> usize {
        self.bpe.encode_with_special_tokens(string).len()
    }
}

#[cfg(test)]
mod test_tiktoken {
    use crate::utils::token::{truncate_with, CountToken};
    use super::Tiktoken;

    #[test]
    fn test_count_tokens() {
        let counter = Tiktoken::new("gpt-3.5-turbo-16k").unwrap();
        assert_eq!("gpt-3.5-turbo-16k", counter.model);
        assert_eq!("gpt-3.5-turbo", counter.family);
        assert_eq!(16384, counter.max_tokens());
        assert_eq!(2, counter.count_token("hello world"));
        assert_eq!(0, counter.count_token(""));
        // the estimate of "hello world" is 4
        assert_eq!(2, counter.estimate_error("hello world"));
    }

    #[test]
    fn test_context_window_follows_requested_model() {
        assert_eq!(4096, Tiktoken::new("gpt-3.5-turbo").unwrap().max_tokens());
        assert_eq!(32768, Tiktoken::new("gpt-4-32k-0613").unwrap().max_tokens());
        assert_eq!(8192, Tiktoken::new("gpt-4-0613").unwrap().max_tokens());
    }

    #[test]
    fn test_unsupported_model() {
        assert!(Tiktoken::new("distilgpt2").is_err());
    }

    #[test]
    fn test_truncate_with_bpe() {
        let counter = Tiktoken::new("gpt-4").unwrap();
        assert_eq!("hello world", truncate_with(&counter, "hello world", 2));
    }
}
