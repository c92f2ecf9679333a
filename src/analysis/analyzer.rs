use rust_stemmers::Algorithm;

use crate::analysis::filter::TokenFilter;
use crate::analysis::filters::stemmer::StemmerFilter;
use crate::analysis::filters::stopword::StopWordFilter;
use crate::analysis::filters::word_shape::WordShapeFilter;
use crate::analysis::html;
use crate::analysis::tokenizer::{StandardTokenizer, Tokenizer};

/// The text pipeline shared by document indexing (C2) and query parsing
/// (C9): tokenize, drop malformed word shapes, drop stopwords, stem.
/// Filter order is fixed by the stopword-before-stem resolution in §9 —
/// stemming first would let a stopword's stem collide with a content
/// word's stem and suppress it wrongly.
pub struct Analyzer {
    tokenizer: Box<dyn Tokenizer>,
    filters: Vec<Box<dyn TokenFilter>>,
}

impl Analyzer {
    /// Builds the pipeline for Portuguese: word-shape filter, then the
    /// Portuguese stopword list, then the Portuguese RSLP stemmer.
    pub fn portuguese() -> Self {
        Analyzer {
            tokenizer: Box::new(StandardTokenizer::default()),
            filters: vec![
                Box::new(WordShapeFilter::new()),
                Box::new(StopWordFilter::portuguese()),
                Box::new(StemmerFilter::new(Algorithm::Portuguese)),
            ],
        }
    }

    fn run_filters(&self, mut tokens: Vec<crate::analysis::token::Token>) -> Vec<crate::analysis::token::Token> {
        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// C2: decodes and (for HTML) strips markup before tokenizing, then
    /// folds the surviving stems into a sorted, insertion-ordered
    /// term → count mapping. `total_tokens` is the raw tokenizer output
    /// count, taken before any filtering (§4.2 step 3).
    pub fn analyze_document(&self, raw_bytes: &[u8]) -> (u32, Vec<(String, u32)>) {
        let text = html::decode_and_extract_text(raw_bytes);

        let tokens = self.tokenizer.tokenize(&text);
        let total_tokens = tokens.len() as u32;

        let mut stems: Vec<String> = self
            .run_filters(tokens)
            .into_iter()
            .map(|token| token.text)
            .collect();
        stems.sort_unstable();

        let mut counts: Vec<(String, u32)> = Vec::new();
        for stem in stems {
            match counts.last_mut() {
                Some((term, count)) if *term == stem => *count += 1,
                _ => counts.push((stem, 1)),
            }
        }

        (total_tokens, counts)
    }

    /// C9: same transform as C2 steps 3-6 (no HTML stripping, no
    /// total-token emission), deduplicated while preserving first
    /// occurrence order.
    pub fn analyze_query(&self, text: &str) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(text);
        let stems = self.run_filters(tokens);

        let mut seen = std::collections::HashSet::new();
        let mut terms = Vec::new();
        for token in stems {
            if seen.insert(token.text.clone()) {
                terms.push(token.text);
            }
        }
        terms
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::portuguese()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_document_sorts_and_folds_counts() {
        let analyzer = Analyzer::portuguese();
        let (total_tokens, counts) = analyzer.analyze_document(b"Casa casa casa");
        assert_eq!(total_tokens, 3);
        assert_eq!(counts, vec![("cas".to_string(), 3)]);
    }

    #[test]
    fn analyze_query_deduplicates_preserving_order() {
        let analyzer = Analyzer::portuguese();
        let terms = analyzer.analyze_query("casa casa jardim");
        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0], "cas");
    }
}
