use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::path::Path;

use crate::core::error::Result;

/// Zero-copy read-only view over a file, used by `index::term_directory`
/// to seek into `final/index` by byte offset without a syscall per term.
/// No page-level cache on top: every lookup is a single linear view into
/// one mapped region, not page-fault-backed paging.
pub struct MmapFile {
    mmap: Option<Mmap>,
    len: usize,
}

impl MmapFile {
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        let len = file.metadata()?.len() as usize;

        // mapping a zero-length file is an error on some platforms; the
        // final index is legitimately empty for a corpus with no
        // eligible terms at all.
        let mmap = if len == 0 {
            None
        } else {
            Some(unsafe { MmapOptions::new().len(len).map(&file)? })
        };

        Ok(MmapFile { mmap, len })
    }

    pub fn data(&self) -> &[u8] {
        match &self.mmap {
            Some(m) => &m[..],
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The single line starting at `offset`, up to (not including) the
    /// next `\n` or end of file.
    pub fn line_at(&self, offset: u64) -> &[u8] {
        let start = offset as usize;
        let rest = &self.data()[start..];
        match rest.iter().position(|&b| b == b'\n') {
            Some(end) => &rest[..end],
            None => rest,
        }
    }
}
