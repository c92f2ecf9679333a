use std::path::Path;

use crate::core::error::Result;
use crate::core::types::{DocId, Posting};
use crate::index::line_format::parse_index_line;

/// A sorted stream of `(term, doc-id, count)` triples, exposed one entry
/// at a time. Shared by C4 (cursors over `cache/pre_ind/<doc-id>` files)
/// and C5 (cursors over `cache/partial_indexes/*` files) — both run the
/// same k-way merge keyed by `(term, doc-id)` (§4.4, §4.5).
pub trait MergeCursor {
    fn current(&self) -> Option<(&str, DocId, u32)>;
    fn advance(&mut self) -> Result<()>;
}

/// One step of a k-way merge, delivered to a single callback so the
/// caller can hold one piece of mutable state (the in-progress posting
/// list) instead of splitting it across two closures.
pub enum MergeEvent<'a> {
    Posting { term: &'a str, doc_id: DocId, count: u32 },
    CloseTerm { term: &'a str },
}

/// Runs the k-way merge described in §4.4: repeatedly pop the cursor with
/// the smallest `(term, doc-id)` key, append its posting to the current
/// term's bracket, and close the bracket when the term changes (or at
/// end of input). `on_event` sees every posting in order and exactly one
/// `CloseTerm` per distinct term, after its last posting.
pub fn k_way_merge<F>(mut cursors: Vec<Box<dyn MergeCursor>>, mut on_event: F) -> Result<()>
where
    F: FnMut(MergeEvent) -> Result<()>,
{
    let mut current_term: Option<String> = None;

    loop {
        let mut smallest: Option<(usize, String, DocId, u32)> = None;
        for (i, cursor) in cursors.iter().enumerate() {
            if let Some((term, doc_id, count)) = cursor.current() {
                let take = match &smallest {
                    None => true,
                    Some((_, best_term, best_doc, _)) => (term, doc_id) < (best_term.as_str(), *best_doc),
                };
                if take {
                    smallest = Some((i, term.to_string(), doc_id, count));
                }
            }
        }

        let (idx, term, doc_id, count) = match smallest {
            Some(entry) => entry,
            None => break,
        };

        if current_term.as_deref() != Some(term.as_str()) {
            if let Some(prev) = &current_term {
                on_event(MergeEvent::CloseTerm { term: prev })?;
            }
            current_term = Some(term.clone());
        }

        on_event(MergeEvent::Posting { term: &term, doc_id, count })?;
        cursors[idx].advance()?;
        cursors.retain(|c| c.current().is_some());
    }

    if let Some(prev) = current_term {
        on_event(MergeEvent::CloseTerm { term: &prev })?;
    }

    Ok(())
}

/// A cursor over an already-written index-shaped file (`final/index` or
/// one `cache/partial_indexes/<start>_<end>` file): term-sorted lines,
/// each holding a doc-id-sorted posting list.
pub struct PostingListCursor {
    entries: Vec<(String, Vec<Posting>)>,
    line_idx: usize,
    posting_idx: usize,
}

impl PostingListCursor {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut entries = Vec::new();
        for line in contents.lines() {
            if line.is_empty() {
                continue;
            }
            entries.push(parse_index_line(line)?);
        }
        Ok(PostingListCursor {
            entries,
            line_idx: 0,
            posting_idx: 0,
        })
    }
}

impl MergeCursor for PostingListCursor {
    fn current(&self) -> Option<(&str, DocId, u32)> {
        self.entries.get(self.line_idx).and_then(|(term, postings)| {
            postings
                .get(self.posting_idx)
                .map(|posting| (term.as_str(), posting.doc_id, posting.count))
        })
    }

    fn advance(&mut self) -> Result<()> {
        if let Some((_, postings)) = self.entries.get(self.line_idx) {
            self.posting_idx += 1;
            if self.posting_idx >= postings.len() {
                self.posting_idx = 0;
                self.line_idx += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct VecCursor {
        entries: Vec<(String, DocId, u32)>,
        idx: usize,
    }

    impl MergeCursor for VecCursor {
        fn current(&self) -> Option<(&str, DocId, u32)> {
            self.entries.get(self.idx).map(|(t, d, c)| (t.as_str(), *d, *c))
        }
        fn advance(&mut self) -> Result<()> {
            self.idx += 1;
            Ok(())
        }
    }

    #[test]
    fn merges_two_cursors_in_term_then_doc_id_order() {
        let a = Box::new(VecCursor {
            entries: vec![("gat".to_string(), DocId::new(0), 2)],
            idx: 0,
        });
        let b = Box::new(VecCursor {
            entries: vec![
                ("cachorr".to_string(), DocId::new(1), 1),
                ("gat".to_string(), DocId::new(1), 1),
            ],
            idx: 0,
        });

        let mut emitted = Vec::new();
        let mut closed = Vec::new();
        k_way_merge(vec![a, b], |event| {
            match event {
                MergeEvent::Posting { term, doc_id, count } => emitted.push((term.to_string(), doc_id, count)),
                MergeEvent::CloseTerm { term } => closed.push(term.to_string()),
            }
            Ok(())
        })
        .unwrap();

        assert_eq!(
            emitted,
            vec![
                ("cachorr".to_string(), DocId::new(1), 1),
                ("gat".to_string(), DocId::new(0), 2),
                ("gat".to_string(), DocId::new(1), 1),
            ]
        );
        assert_eq!(closed, vec!["cachorr".to_string(), "gat".to_string()]);
    }
}
