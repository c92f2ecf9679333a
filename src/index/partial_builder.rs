use std::fs::File;
use std::io::Write;

use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, Posting};
use crate::index::line_format::{format_count_line, format_index_line, parse_pre_ind_file};
use crate::index::merge::{k_way_merge, MergeCursor, MergeEvent};

struct PreIndCursor {
    doc_id: DocId,
    counts: Vec<(String, u32)>,
    idx: usize,
}

impl MergeCursor for PreIndCursor {
    fn current(&self) -> Option<(&str, DocId, u32)> {
        self.counts
            .get(self.idx)
            .map(|(term, count)| (term.as_str(), self.doc_id, *count))
    }

    fn advance(&mut self) -> Result<()> {
        self.idx += 1;
        Ok(())
    }
}

/// C4: builds `cache/partial_indexes/<start>_<end>` and
/// `cache/partial_counts/<start>_<end>` from every `cache/pre_ind/<id>`
/// file with `id` in `[start, end)`. A missing input file is silently
/// skipped — the document produced no eligible tokens (§4.4). A
/// malformed pre_ind file is fatal to the bucket.
pub fn build_partial(config: &Config, start: u32, end: u32) -> Result<()> {
    let pre_ind_dir = config.pre_ind_dir();
    let mut cursors: Vec<Box<dyn MergeCursor>> = Vec::new();

    let partial_counts_path = config.partial_counts_dir().join(format!("{}_{}", start, end));
    let mut counts_file = File::create(&partial_counts_path)?;

    for doc_id_value in start..end {
        let doc_id = DocId::new(doc_id_value);
        let path = pre_ind_dir.join(doc_id_value.to_string());
        if !path.exists() {
            continue;
        }

        let contents = std::fs::read_to_string(&path)?;
        let (total_tokens, counts) = parse_pre_ind_file(&contents)
            .map_err(|e| Error::new(ErrorKind::Bucket, format!("malformed pre_ind file {:?}: {}", path, e)))?;

        writeln!(counts_file, "{}", format_count_line(doc_id, total_tokens))?;

        if !counts.is_empty() {
            cursors.push(Box::new(PreIndCursor { doc_id, counts, idx: 0 }));
        }
    }

    let partial_index_path = config.partial_indexes_dir().join(format!("{}_{}", start, end));
    let mut index_file = File::create(&partial_index_path)?;

    let mut current_postings: Vec<Posting> = Vec::new();
    let mut first_line = true;

    k_way_merge(cursors, |event| {
        match event {
            MergeEvent::Posting { doc_id, count, .. } => {
                current_postings.push(Posting { doc_id, count });
            }
            MergeEvent::CloseTerm { term } => {
                if !first_line {
                    writeln!(index_file)?;
                }
                first_line = false;
                write!(index_file, "{}", format_index_line(term, &current_postings))?;
                current_postings.clear();
            }
        }
        Ok(())
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::line_format::format_pre_ind_file;

    #[test]
    fn builds_partial_index_and_counts_for_a_small_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), 512);

        std::fs::create_dir_all(config.pre_ind_dir()).unwrap();
        std::fs::create_dir_all(config.partial_counts_dir()).unwrap();
        std::fs::create_dir_all(config.partial_indexes_dir()).unwrap();

        std::fs::write(
            config.pre_ind_dir().join("0"),
            format_pre_ind_file(2, &[("gat".to_string(), 2)]),
        )
        .unwrap();
        std::fs::write(
            config.pre_ind_dir().join("1"),
            format_pre_ind_file(2, &[("cachorr".to_string(), 1), ("gat".to_string(), 1)]),
        )
        .unwrap();

        build_partial(&config, 0, 2).unwrap();

        let index_contents =
            std::fs::read_to_string(config.partial_indexes_dir().join("0_2")).unwrap();
        assert_eq!(index_contents, "cachorr: [(1,1),]\ngat: [(0,2),(1,1),]");

        let counts_contents =
            std::fs::read_to_string(config.partial_counts_dir().join("0_2")).unwrap();
        assert_eq!(counts_contents, "0: 2\n1: 2\n");
    }

    #[test]
    fn skips_missing_doc_ids_in_the_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), 512);

        std::fs::create_dir_all(config.pre_ind_dir()).unwrap();
        std::fs::create_dir_all(config.partial_counts_dir()).unwrap();
        std::fs::create_dir_all(config.partial_indexes_dir()).unwrap();

        std::fs::write(
            config.pre_ind_dir().join("0"),
            format_pre_ind_file(1, &[("gat".to_string(), 1)]),
        )
        .unwrap();

        build_partial(&config, 0, 3).unwrap();

        let counts_contents =
            std::fs::read_to_string(config.partial_counts_dir().join("0_3")).unwrap();
        assert_eq!(counts_contents, "0: 1\n");
    }
}
