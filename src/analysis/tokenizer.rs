use crate::analysis::token::Token;
use unicode_segmentation::UnicodeSegmentation;

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    fn name(&self) -> &str;

    fn clone_box(&self) -> Box<dyn Tokenizer>;
}

/// Word tokenizer configured for Portuguese (§4.2 step 3). The count of
/// tokens this produces, before any filtering, is `total_tokens`.
#[derive(Clone)]
pub struct StandardTokenizer {
    pub lowercase: bool,
    pub max_token_length: usize,
}

impl Default for StandardTokenizer {
    fn default() -> Self {
        StandardTokenizer {
            lowercase: true,
            max_token_length: 255,
        }
    }
}

impl Tokenizer for StandardTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();

        for word in text.unicode_words() {
            if word.len() <= self.max_token_length {
                let token_text = if self.lowercase {
                    word.to_lowercase()
                } else {
                    word.to_string()
                };
                tokens.push(Token::new(token_text));
            }
        }

        tokens
    }

    fn name(&self) -> &str {
        "standard"
    }

    fn clone_box(&self) -> Box<dyn Tokenizer> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_all_words_before_filtering() {
        let tok = StandardTokenizer::default();
        let tokens = tok.tokenize("Casa casa casa");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "casa");
    }
}
