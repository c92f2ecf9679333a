use std::fs::File;
use std::io::Write;

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::types::Posting;
use crate::index::line_format::format_index_line;
use crate::index::merge::{k_way_merge, MergeCursor, MergeEvent, PostingListCursor};

/// C5: the same k-way merge as C4, run once over every
/// `cache/partial_indexes/*` file, producing `final/index`. Because
/// partial indexes are already term-sorted with disjoint doc-id ranges,
/// the merge also leaves each term's postings doc-id-sorted.
pub fn merge_final_index(config: &Config) -> Result<()> {
    let mut bucket_paths: Vec<_> = std::fs::read_dir(config.partial_indexes_dir())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    bucket_paths.sort();

    let mut cursors: Vec<Box<dyn MergeCursor>> = Vec::new();
    for path in &bucket_paths {
        let cursor = PostingListCursor::from_file(path)?;
        cursors.push(Box::new(cursor));
    }

    std::fs::create_dir_all(config.final_dir())?;
    let mut index_file = File::create(config.final_index_path())?;

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

/// `merge_counts`: concatenates every `cache/partial_counts/*` file into
/// `final/count`, in directory-iteration order (§4.5).
pub fn merge_final_counts(config: &Config) -> Result<()> {
    let mut bucket_paths: Vec<_> = std::fs::read_dir(config.partial_counts_dir())?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect();
    bucket_paths.sort();

    std::fs::create_dir_all(config.final_dir())?;
    let mut count_file = File::create(config.final_count_path())?;

    for path in bucket_paths {
        let contents = std::fs::read(path)?;
        count_file.write_all(&contents)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merges_two_partial_indexes_into_one_final_index() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().to_path_buf(), 512);

        std::fs::create_dir_all(config.partial_indexes_dir()).unwrap();
        std::fs::create_dir_all(config.partial_counts_dir()).unwrap();

        std::fs::write(config.partial_indexes_dir().join("0_1000"), "gat: [(0,2),]").unwrap();
        std::fs::write(
            config.partial_indexes_dir().join("1000_2000"),
            "cachorr: [(1000,1),]\ngat: [(1001,1),]",
        )
        .unwrap();

        std::fs::write(config.partial_counts_dir().join("0_1000"), "0: 2\n").unwrap();
        std::fs::write(config.partial_counts_dir().join("1000_2000"), "1000: 1\n1001: 1\n").unwrap();

        merge_final_index(&config).unwrap();
        merge_final_counts(&config).unwrap();

        let index_contents = std::fs::read_to_string(config.final_index_path()).unwrap();
        assert_eq!(index_contents, "cachorr: [(1000,1),]\ngat: [(0,2),(1001,1),]");

        let count_contents = std::fs::read_to_string(config.final_count_path()).unwrap();
        assert_eq!(count_contents, "0: 2\n1000: 1\n1001: 1\n");
    }
}
