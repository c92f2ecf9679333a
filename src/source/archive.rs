use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use warc::{BufferedBody, Record, WarcHeader, WarcReader};
use zip::ZipArchive;

use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::DocId;
use crate::index::line_format::format_url_line;

/// URL suffixes excluded before doc-id assignment (§3, case-insensitive).
const EXCLUDED_SUFFIXES: [&str; 13] = [
    "mp4", "png", "fdm", "pdf", "doc", "dll", "exe", "jpg", "sh", "yml", "xsl", "xml", "mpq",
];

/// One accepted record from the archive: payload bytes, assigned doc-id,
/// and the source URL (already written to the url_index by the time it
/// reaches the caller).
pub struct Document {
    pub id: DocId,
    pub url: String,
    pub bytes: Vec<u8>,
}

fn is_excluded(url: &str) -> bool {
    let lower = url.to_lowercase();
    EXCLUDED_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// C1: iterates `(payload, doc-id, url)` from a ZIP of WARC (`.kaggle`)
/// entries. A single producer owns the doc-id counter and the url_index
/// writer; both are strictly sequential with emission order.
pub struct DocumentSource {
    archive: ZipArchive<File>,
    kaggle_indices: Vec<usize>,
    next_entry: usize,
    current_records: Vec<Record<BufferedBody>>,
    next_doc_id: u32,
    url_index: BufWriter<File>,
}

impl DocumentSource {
    /// Opens `zip_path` and prepares `url_index_path` for writing (§4.1,
    /// §4.6 "side effect: writes each accepted (doc-id, url) to UrlIndex").
    /// Fails terminally only if the archive itself cannot be read.
    pub fn open<P: AsRef<Path>>(zip_path: P, url_index_path: P) -> Result<Self> {
        let file = File::open(zip_path)?;
        let archive = ZipArchive::new(file).map_err(Error::from)?;

        let kaggle_indices: Vec<usize> = (0..archive.len())
            .filter(|&i| {
                archive
                    .name_for_index(i)
                    .map(|name| name.to_lowercase().ends_with(".kaggle"))
                    .unwrap_or(false)
            })
            .collect();

        let url_index_file = File::create(url_index_path)?;

        Ok(DocumentSource {
            archive,
            kaggle_indices,
            next_entry: 0,
            current_records: Vec::new(),
            next_doc_id: 0,
            url_index: BufWriter::new(url_index_file),
        })
    }

    /// Reads and fully parses the next `.kaggle` WARC entry into memory,
    /// in reverse so `Vec::pop` yields records in archive order.
    fn load_next_entry(&mut self) -> Result<bool> {
        while self.next_entry < self.kaggle_indices.len() {
            let index = self.kaggle_indices[self.next_entry];
            self.next_entry += 1;

            let mut entry = self
                .archive
                .by_index(index)
                .map_err(Error::from)?;
            let mut buf = Vec::with_capacity(entry.size() as usize);
            std::io::copy(&mut entry, &mut buf)?;

            let reader = WarcReader::new(Cursor::new(buf));
            let mut records = Vec::new();
            for record in reader.iter_records() {
                match record {
                    Ok(record) => records.push(record),
                    Err(err) => {
                        eprintln!("warc: skipping malformed record: {}", err);
                    }
                }
            }
            records.reverse();

            if !records.is_empty() {
                self.current_records = records;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn accept(&mut self, url: String, payload: Vec<u8>) -> Result<Document> {
        let id = DocId::new(self.next_doc_id);
        self.next_doc_id += 1;

        writeln!(self.url_index, "{}", format_url_line(id, &url))?;

        Ok(Document { id, url, bytes: payload })
    }
}

impl Iterator for DocumentSource {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.current_records.pop() {
                if record.warc_type() != &warc::RecordType::Response {
                    continue;
                }
                let url = match record.header(WarcHeader::TargetURI) {
                    Some(uri) => uri.to_string(),
                    None => continue,
                };
                if is_excluded(&url) {
                    continue;
                }
                let payload = record.body().to_vec();
                return Some(self.accept(url, payload));
            }

            match self.load_next_entry() {
                Ok(true) => continue,
                Ok(false) => return None,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excludes_known_suffixes_case_insensitively() {
        assert!(is_excluded("http://example.org/a.PDF"));
        assert!(is_excluded("http://example.org/a.jpg"));
        assert!(!is_excluded("http://example.org/a.html"));
    }
}
