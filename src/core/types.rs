/// Document identifier, assigned sequentially by `source::archive` as
/// accepted records are emitted (§9: dense over accepted documents only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocId(pub u32);

impl DocId {
    pub fn new(id: u32) -> Self {
        DocId(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single (doc-id, count) posting, shared by the per-document count
/// file, the partial index and the final index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc_id: DocId,
    pub count: u32,
}

/// Selectable ranking function for the query engine (§6, C10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingFunction {
    TfIdf,
    Bm25,
}

impl std::str::FromStr for RankingFunction {
    type Err = crate::core::error::Error;

    fn from_str(s: &str) -> crate::core::error::Result<Self> {
        match s {
            "TFIDF" => Ok(RankingFunction::TfIdf),
            "BM25" => Ok(RankingFunction::Bm25),
            other => Err(crate::core::error::Error::new(
                crate::core::error::ErrorKind::Config,
                format!("unknown ranking function '{}', expected TFIDF or BM25", other),
            )),
        }
    }
}
