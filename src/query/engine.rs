use std::collections::HashMap;
use std::path::Path;

use crate::analysis::analyzer::Analyzer;
use crate::core::error::Result;
use crate::core::types::{DocId, RankingFunction};
use crate::index::line_format::parse_count_line;
use crate::index::term_directory::TermDirectory;
use crate::query::matcher::matching_documents;
use crate::query::scorer::{bm25_score, tf_idf_score, Corpus};
use crate::query::topk::{BoundedTopK, ScoredDoc, DEFAULT_CAPACITY};

/// Ties C7-C11 together for one query file. The term directory (C7) is
/// built once, at open, and held for the engine's lifetime; each query
/// then does one seek-and-parse per surviving term rather than a fresh
/// linear scan, since query term sets are small (§4.8's "implementations
/// may use either" — `index::partial_loader` implements the full-scan
/// alternative directly, for callers that expect a large `Q`).
pub struct QueryEngine {
    directory: TermDirectory,
    corpus: Corpus,
    analyzer: Analyzer,
}

impl QueryEngine {
    pub fn open(index_path: impl AsRef<Path>, count_path: impl AsRef<Path>) -> Result<Self> {
        let directory = TermDirectory::open(&index_path)?;
        let corpus = Corpus::new(load_total_tokens(count_path.as_ref())?);
        Ok(QueryEngine {
            directory,
            corpus,
            analyzer: Analyzer::portuguese(),
        })
    }

    /// Runs C9 (query tokenize+stem) through C11 (bounded top-k) for one
    /// query line. A query with zero surviving terms matches nothing.
    pub fn query(&self, text: &str, ranking: RankingFunction) -> Result<Vec<ScoredDoc>> {
        let terms = self.analyzer.analyze_query(text);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut term_postings: Vec<HashMap<DocId, u32>> = Vec::with_capacity(terms.len());
        for term in &terms {
            let postings = self.directory.get(term)?;
            let by_doc: HashMap<DocId, u32> = postings.into_iter().map(|p| (p.doc_id, p.count)).collect();
            term_postings.push(by_doc);
        }

        let matched = matching_documents(&term_postings);

        let mut top_k = BoundedTopK::new(DEFAULT_CAPACITY);
        for doc_id_value in matched.iter() {
            let doc_id = DocId::new(doc_id_value);
            let score = match ranking {
                RankingFunction::TfIdf => tf_idf_score(doc_id, &term_postings, &self.corpus),
                RankingFunction::Bm25 => bm25_score(doc_id, &term_postings, &self.corpus),
            };
            top_k.insert(ScoredDoc { score, doc_id });
        }

        Ok(top_k.into_sorted_vec())
    }
}

fn load_total_tokens(count_path: &Path) -> Result<HashMap<DocId, u32>> {
    let contents = std::fs::read_to_string(count_path)?;
    let mut total_tokens = HashMap::new();
    for line in contents.lines() {
        if line.is_empty() {
            continue;
        }
        let (doc_id, total) = parse_count_line(line)?;
        total_tokens.insert(doc_id, total);
    }
    Ok(total_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RankingFunction;

    #[test]
    fn answers_the_s1_single_document_query() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("index");
        let count_path = dir.path().join("count");
        std::fs::write(&index_path, "cas: [(0,3),]").unwrap();
        std::fs::write(&count_path, "0: 3\n").unwrap();

        let engine = QueryEngine::open(&index_path, &count_path).unwrap();
        let results = engine.query("casa", RankingFunction::Bm25).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc_id, DocId::new(0));
    }

    #[test]
    fn answers_the_s2_two_document_ranking() {
        let dir = tempfile::tempdir().unwrap();
        let index_path = dir.path().join("index");
        let count_path = dir.path().join("count");
        std::fs::write(&index_path, "cachorr: [(1,1),]\ngat: [(0,2),(1,1),]").unwrap();
        std::fs::write(&count_path, "0: 2\n1: 2\n").unwrap();

        let engine = QueryEngine::open(&index_path, &count_path).unwrap();

        let results = engine.query("gato", RankingFunction::TfIdf).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].doc_id, DocId::new(0));
        assert_eq!(results[1].doc_id, DocId::new(1));

        let results = engine.query("gato cachorro", RankingFunction::TfIdf).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].doc_id, DocId::new(1));
    }
}
