//! Whole-word profanity detection over a bundled word list.
//!
//! The list is parsed the first time it is needed and shared by every later call.

use std::collections::HashSet;

use lazy_static::lazy_static;
use log::debug;

const CENSOR_WORD_LIST: &str = include_str!("censor_words.txt");

lazy_static! {
    static ref CENSOR_WORDS: HashSet<&'static str> = load_censor_words();
}

fn load_censor_words() -> HashSet<&'static str> {
    let words: HashSet<&'static str> = CENSOR_WORD_LIST
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();
    debug!("loaded {} censor words", words.len());
    words
}

/// Whether any whole word of `text` is on the censor list, ignoring case.
pub fn contains_profanity(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .any(|word| CENSOR_WORDS.contains(word.to_lowercase().as_str()))
}

/// Number of entries in the censor list.
pub fn censor_word_count() -> usize {
    CENSOR_WORDS.len()
}
