use std::collections::HashSet;

use crate::analysis::filter::TokenFilter;
use crate::analysis::token::Token;

/// Drops tokens whose *surface form* (pre-stemming) is a stopword (§4.2
/// step 5, §9 filter-ordering resolution). Generalized from the
/// teacher's hardcoded `StopWordFilter::english()` to load the
/// Portuguese list from the `stop-words` crate instead of an inline
/// literal, since this spec's corpus is Portuguese.
pub struct StopWordFilter {
    pub stop_words: HashSet<String>,
}

impl StopWordFilter {
    pub fn new(stop_words: Vec<String>) -> Self {
        StopWordFilter {
            stop_words: stop_words.into_iter().collect(),
        }
    }

    pub fn portuguese() -> Self {
        StopWordFilter::new(stop_words::get(stop_words::LANGUAGE::Portuguese))
    }
}

impl TokenFilter for StopWordFilter {
    fn filter(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .filter(|token| !self.stop_words.contains(&token.text))
            .collect()
    }

    fn name(&self) -> &str {
        "stop_words"
    }

    fn clone_box(&self) -> Box<dyn TokenFilter> {
        Box::new(StopWordFilter {
            stop_words: self.stop_words.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_known_stopword() {
        let f = StopWordFilter::new(vec!["de".to_string(), "a".to_string(), "o".to_string()]);
        let tokens = vec![
            Token::new("de".to_string()),
            Token::new("casa".to_string()),
            Token::new("o".to_string()),
        ];
        let kept = f.filter(tokens);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "casa");
    }
}
