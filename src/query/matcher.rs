use std::collections::HashMap;

use roaring::RoaringBitmap;

use crate::core::types::DocId;

/// C10 conjunctive match: a document matches iff every query term's
/// posting list contains it. Terms are sorted ascending by posting-list
/// length before intersecting, so the smallest set bounds the work and
/// an empty intersection short-circuits immediately (§4.10) — avoids the
/// naive "scan every doc-id × every term" baseline.
pub fn matching_documents(term_postings: &[HashMap<DocId, u32>]) -> RoaringBitmap {
    if term_postings.is_empty() {
        return RoaringBitmap::new();
    }

    let mut bitmaps: Vec<RoaringBitmap> = term_postings
        .iter()
        .map(|postings| postings.keys().map(|doc_id| doc_id.value()).collect())
        .collect();
    bitmaps.sort_by_key(|bitmap| bitmap.len());

    let mut result = bitmaps[0].clone();
    for bitmap in &bitmaps[1..] {
        if result.is_empty() {
            break;
        }
        result &= bitmap;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postings(pairs: &[(u32, u32)]) -> HashMap<DocId, u32> {
        pairs.iter().map(|&(doc, count)| (DocId::new(doc), count)).collect()
    }

    #[test]
    fn matches_only_documents_present_in_every_term() {
        let gato = postings(&[(0, 2), (1, 1)]);
        let cachorro = postings(&[(1, 1)]);

        let matched = matching_documents(&[gato.clone()]);
        assert_eq!(matched.len(), 2);

        let matched = matching_documents(&[gato, cachorro]);
        assert_eq!(matched.iter().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn zero_terms_matches_nothing() {
        let matched = matching_documents(&[]);
        assert!(matched.is_empty());
    }
}
