use std::collections::HashMap;

use crate::core::types::DocId;

const BM25_K1: f64 = 1.5;
const BM25_B: f64 = 0.75;

/// The per-document token counts from `final/count`, loaded once per
/// query engine lifetime. Backs both ranking functions' `N`, `df`, and
/// `avg_len` terms (§4.10).
pub struct Corpus {
    total_tokens: HashMap<DocId, u32>,
}

impl Corpus {
    pub fn new(total_tokens: HashMap<DocId, u32>) -> Self {
        Corpus { total_tokens }
    }

    pub fn document_count(&self) -> usize {
        self.total_tokens.len()
    }

    pub fn total_tokens(&self, doc_id: DocId) -> u32 {
        self.total_tokens.get(&doc_id).copied().unwrap_or(0)
    }

    pub fn average_length(&self) -> f64 {
        if self.total_tokens.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.total_tokens.values().map(|&t| t as u64).sum();
        sum as f64 / self.total_tokens.len() as f64
    }
}

/// `tf(t, d) = posting[t][d] / total_tokens[d]`,
/// `idf(t) = ln(N / df(t))`; document score = Σ_t tf(t,d)·idf(t) (§4.10).
pub fn tf_idf_score(doc_id: DocId, term_postings: &[HashMap<DocId, u32>], corpus: &Corpus) -> f64 {
    let n = corpus.document_count() as f64;
    let total_tokens = corpus.total_tokens(doc_id).max(1) as f64;

    let mut score = 0.0;
    for postings in term_postings {
        let Some(&count) = postings.get(&doc_id) else { continue };
        let df = postings.len() as f64;
        if df == 0.0 {
            continue;
        }
        let tf = count as f64 / total_tokens;
        let idf = (n / df).ln();
        score += tf * idf;
    }
    score
}

/// `idf_bm(t) = ln(((N - df(t) + 0.5) / (df(t) + 0.5)) + 1)`,
/// `score(d) = Σ_t idf_bm(t) · [tf(t,d)·(k1+1) / (tf(t,d) + k1·(1-b+b·len(d)/avg_len))]`
/// with `k1 = 1.5`, `b = 0.75` (§4.10).
pub fn bm25_score(doc_id: DocId, term_postings: &[HashMap<DocId, u32>], corpus: &Corpus) -> f64 {
    let n = corpus.document_count() as f64;
    let avg_len = corpus.average_length();
    let total_tokens = corpus.total_tokens(doc_id) as f64;

    let mut score = 0.0;
    for postings in term_postings {
        let Some(&count) = postings.get(&doc_id) else { continue };
        let df = postings.len() as f64;
        if df == 0.0 {
            continue;
        }
        let tf = count as f64;
        let idf_bm = (((n - df + 0.5) / (df + 0.5)) + 1.0).ln();
        let length_norm = if avg_len > 0.0 {
            1.0 - BM25_B + BM25_B * (total_tokens / avg_len)
        } else {
            1.0 - BM25_B
        };
        let numerator = tf * (BM25_K1 + 1.0);
        let denominator = tf + BM25_K1 * length_norm;
        score += idf_bm * (numerator / denominator);
    }
    score
}
