use std::collections::HashMap;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::DocId;
use crate::index::line_format::parse_index_line;

/// C8: one linear pass over `final/index`, keeping only the postings for
/// a query's term set `Q`. Terms absent from the file map to the empty
/// list. O(file-size) time, O(Σ|postings| over Q) memory — the
/// query-time counterpart to C7 when only a small `Q` is needed.
pub fn load_terms<P: AsRef<Path>>(index_path: P, terms: &[String]) -> Result<HashMap<String, HashMap<DocId, u32>>> {
    let wanted: std::collections::HashSet<&str> = terms.iter().map(String::as_str).collect();
    let mut index: HashMap<String, HashMap<DocId, u32>> = terms
        .iter()
        .map(|term| (term.clone(), HashMap::new()))
        .collect();

    let contents = std::fs::read_to_string(index_path)?;
    for line in contents.lines() {
        if line.is_empty() {
            continue;
        }
        let (term, postings) = parse_index_line(line)?;
        if wanted.contains(term.as_str()) {
            let postings_by_doc = index.entry(term).or_default();
            for posting in postings {
                postings_by_doc.insert(posting.doc_id, posting.count);
            }
        }
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_only_requested_terms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index");
        std::fs::write(&path, "cachorr: [(1,1),]\ngat: [(0,2),(1,1),]").unwrap();

        let loaded = load_terms(&path, &["gat".to_string(), "absent".to_string()]).unwrap();
        assert_eq!(loaded.get("gat").unwrap().len(), 2);
        assert_eq!(loaded.get("absent").unwrap().len(), 0);
        assert!(!loaded.contains_key("cachorr"));
    }
}
