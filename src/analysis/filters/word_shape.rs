use regex::Regex;

use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Drops any token matching `[^\w]|[\d]|_` (§4.2 step 4): a token
/// containing a non-word character, a digit, or an underscore is
/// rejected outright, not partially cleaned.
pub struct WordShapeFilter {
    reject: Regex,
}

impl WordShapeFilter {
    pub fn new() -> Self {
        WordShapeFilter {
            reject: Regex::new(r"[^\w]|[\d]|_").expect("static regex"),
        }
    }
}

impl Default for WordShapeFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenFilter for WordShapeFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|token| !self.reject.is_match(&token.text))
            .collect()
    }

    fn name(&self) -> &str {
        "word_shape"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(WordShapeFilter::new())
    }
}
