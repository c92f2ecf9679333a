use std::path::Path;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::analysis::analyzer::Analyzer;
use crate::core::config::Config;
use crate::core::error::{Error, ErrorKind, Result};
use crate::index::{final_merger, partial_builder, per_doc_writer};
use crate::memory::rlimit;
use crate::memory::tracker::MemoryTracker;
use crate::source::DocumentSource;

/// C6: stages C1-C5 under the `-m <MB>` memory ceiling (§4.6). Refuses to
/// start if any staging directory already has contents — resuming a
/// partial build is explicitly undefined behavior per §5's disk
/// lifecycle note, so this never guesses at a consistent resume point.
pub struct BuildOrchestrator {
    config: Config,
}

impl BuildOrchestrator {
    pub fn new(config: Config) -> Self {
        BuildOrchestrator { config }
    }

    pub fn run(&self, zip_path: &Path) -> Result<()> {
        self.prepare_directories()?;
        rlimit::install_address_space_limit(self.config.memory_limit_mb)?;
        let tracker = MemoryTracker::new(self.config.memory_limit_mb);

        println!("stage 1/3: tokenizing documents ({})", zip_path.display());
        let doc_count = self.run_count_stage(zip_path, &tracker)?;
        println!("stage 1/3 done: {} documents accepted", doc_count);

        println!("stage 2/3: building partial indexes");
        self.run_partial_stage(doc_count)?;
        println!("stage 2/3 done");

        println!("stage 3/3: final merge");
        self.run_final_stage()?;
        println!("stage 3/3 done");

        Ok(())
    }

    fn prepare_directories(&self) -> Result<()> {
        for dir in [
            self.config.pre_ind_dir(),
            self.config.partial_counts_dir(),
            self.config.partial_indexes_dir(),
        ] {
            if dir.exists() {
                let non_empty = std::fs::read_dir(&dir)?.next().is_some();
                if non_empty {
                    return Err(Error::new(
                        ErrorKind::Config,
                        format!("staging directory {:?} is not empty; resuming a build is not supported", dir),
                    ));
                }
            } else {
                std::fs::create_dir_all(&dir)?;
            }
        }
        std::fs::create_dir_all(self.config.final_dir())?;
        Ok(())
    }

    /// Stage 1 (§4.6): drains the source in chunks of
    /// `config.doc_chunk_size`, tearing down and respawning the worker
    /// pool after each chunk so freed allocations are actually returned
    /// to the OS. Returns the number of accepted documents (doc-ids are
    /// dense over `[0, doc_count)`).
    fn run_count_stage(&self, zip_path: &Path, tracker: &MemoryTracker) -> Result<u32> {
        let ncpu = num_cpus::get();
        let n_workers = self.config.count_stage_workers(ncpu);

        let url_index_path = self.config.final_url_index_path();
        let mut source = DocumentSource::open(zip_path, &url_index_path)?;
        let analyzer = Analyzer::portuguese();
        let pre_ind_dir = self.config.pre_ind_dir();

        let mut doc_count: u32 = 0;
        loop {
            let chunk: Vec<_> = source.by_ref().take(self.config.doc_chunk_size).collect();
            if chunk.is_empty() {
                break;
            }

            let pool = ThreadPoolBuilder::new()
                .num_threads(n_workers)
                .build()
                .map_err(|e| Error::new(ErrorKind::Internal, e.to_string()))?;

            pool.install(|| {
                chunk.par_iter().for_each(|doc_result| match doc_result {
                    Ok(doc) => {
                        let (total_tokens, counts) = analyzer.analyze_document(&doc.bytes);
                        if let Err(err) = per_doc_writer::write_per_doc_counts(&pre_ind_dir, doc.id, total_tokens, &counts) {
                            eprintln!("skipping document {}: {}", doc.id, err);
                        }
                    }
                    Err(err) => eprintln!("skipping document: {}", err),
                });
            });

            for doc_result in &chunk {
                if let Ok(doc) = doc_result {
                    doc_count = doc_count.max(doc.id.value() + 1);
                }
            }

            // long-lived workers retain freed allocations; the pool built
            // above is dropped at the end of this iteration, and this
            // nudges the allocator to hand resident pages back promptly.
            tracker.force_gc();
        }

        Ok(doc_count)
    }

    /// Stage 2 (§4.6): invokes C4 over every bucket covering
    /// `[0, doc_count)`. Fatal on any unhandled bucket error.
    fn run_partial_stage(&self, doc_count: u32) -> Result<()> {
        if doc_count == 0 {
            return Ok(());
        }

        let ncpu = num_cpus::get();
        let n_workers = self.config.partial_stage_workers(ncpu);
        let pool = ThreadPoolBuilder::new()
            .num_threads(n_workers)
            .build()
            .map_err(|e| Error::new(ErrorKind::Internal, e.to_string()))?;

        let bucket_size = self.config.bucket_size;
        let buckets: Vec<(u32, u32)> = (0..doc_count)
            .step_by(bucket_size as usize)
            .map(|start| (start, (start + bucket_size).min(doc_count)))
            .collect();

        let config = &self.config;
        let results: Vec<Result<()>> = pool.install(|| {
            buckets
                .par_iter()
                .map(|&(start, end)| partial_builder::build_partial(config, start, end))
                .collect()
        });

        for result in results {
            result?;
        }
        Ok(())
    }

    /// Stage 3 (§4.6): single-threaded C5 invocation.
    fn run_final_stage(&self) -> Result<()> {
        final_merger::merge_final_index(&self.config)?;
        final_merger::merge_final_counts(&self.config)?;
        Ok(())
    }
}
