use std::path::Path;

use fst::{Map, MapBuilder};

use crate::core::error::Result;
use crate::core::types::Posting;
use crate::index::line_format::parse_index_line;
use crate::mmap::mmap_file::MmapFile;

/// C7: reads `final/index` line by line once, recording each term's byte
/// offset. `fst::Map` gives O(term-length) lookup over the sorted term
/// set without hashing the whole thing into a `HashMap`. Posting lists
/// themselves are never cached — only the offsets are.
pub struct TermDirectory {
    offsets: Map<Vec<u8>>,
    file: MmapFile,
}

impl TermDirectory {
    /// O(file-size) I/O, O(unique-terms) memory (§4.7).
    pub fn open<P: AsRef<Path>>(index_path: P) -> Result<Self> {
        let file = MmapFile::open_read_only(&index_path)?;

        // fst::MapBuilder requires keys in strictly ascending order,
        // which §5's ordering guarantee on `final/index` provides.
        let mut builder = MapBuilder::memory();
        let mut offset: u64 = 0;
        for line in split_lines(file.data()) {
            if line.is_empty() {
                continue;
            }
            let term = term_of_line(line)?;
            builder.insert(term, offset)?;
            offset += line.len() as u64 + 1;
        }
        let offsets = Map::new(builder.into_inner()?)?;

        Ok(TermDirectory { offsets, file })
    }

    pub fn offset(&self, term: &str) -> Option<u64> {
        self.offsets.get(term)
    }

    /// Seeks to `term`'s offset and parses its posting list. Returns an
    /// empty list for a term absent from the index.
    pub fn get(&self, term: &str) -> Result<Vec<Posting>> {
        match self.offset(term) {
            Some(offset) => {
                let line = self.file.line_at(offset);
                let line = std::str::from_utf8(line)
                    .map_err(|e| crate::core::error::Error::new(crate::core::error::ErrorKind::Parse, e.to_string()))?;
                let (_, postings) = parse_index_line(line)?;
                Ok(postings)
            }
            None => Ok(Vec::new()),
        }
    }
}

fn split_lines(data: &[u8]) -> impl Iterator<Item = &[u8]> {
    data.split(|&b| b == b'\n')
}

fn term_of_line(line: &[u8]) -> Result<&str> {
    let line = std::str::from_utf8(line)
        .map_err(|e| crate::core::error::Error::new(crate::core::error::ErrorKind::Parse, e.to_string()))?;
    let (term, _) = line
        .split_once(": ")
        .ok_or_else(|| crate::core::error::Error::new(crate::core::error::ErrorKind::Parse, format!("malformed index line: {:?}", line)))?;
    Ok(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_offsets_and_parses_postings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index");
        std::fs::write(&path, "cachorr: [(1,1),]\ngat: [(0,2),(1,1),]").unwrap();

        let directory = TermDirectory::open(&path).unwrap();
        assert!(directory.offset("cachorr").is_some());
        assert_eq!(directory.offset("absent"), None);

        let postings = directory.get("gat").unwrap();
        assert_eq!(postings.len(), 2);
        assert_eq!(directory.get("absent").unwrap(), Vec::new());
    }
}
