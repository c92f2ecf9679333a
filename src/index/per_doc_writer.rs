use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::DocId;
use crate::index::line_format::format_pre_ind_file;

/// C3: writes `cache/pre_ind/<doc-id>` from C2's `(total_tokens,
/// sorted_counts)` output. Terms arrive already sorted by the analyzer;
/// this writer does not re-sort them.
pub fn write_per_doc_counts(
    pre_ind_dir: &Path,
    doc_id: DocId,
    total_tokens: u32,
    sorted_counts: &[(String, u32)],
) -> Result<()> {
    let path = pre_ind_dir.join(doc_id.value().to_string());
    let contents = format_pre_ind_file(total_tokens, sorted_counts);
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_term_lines() {
        let dir = tempfile::tempdir().unwrap();
        let counts = vec![("cas".to_string(), 3)];
        write_per_doc_counts(dir.path(), DocId::new(0), 3, &counts).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("0")).unwrap();
        assert_eq!(contents, "3\ncas: 3\n");
    }
}
