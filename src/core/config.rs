use std::path::PathBuf;

/// Build-time configuration. `memory_limit_mb` is the operator-supplied
/// `-m <MB>` process memory ceiling.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory under which `cache/` and `final/` are created.
    pub storage_path: PathBuf,

    /// Operator-supplied resident-memory ceiling, in megabytes (§6 `-m`).
    pub memory_limit_mb: usize,

    /// Number of documents drained from the source per count-stage chunk
    /// before the worker pool is torn down and respawned (§4.6).
    pub doc_chunk_size: usize,

    /// Number of contiguous doc-ids grouped into one partial-index bucket
    /// (§4.4, default 1000).
    pub bucket_size: u32,

    /// Number of concurrent tasks answering queries at query time (§5).
    pub query_worker_threads: usize,
}

impl Config {
    pub fn new(storage_path: PathBuf, memory_limit_mb: usize) -> Self {
        Config {
            storage_path,
            memory_limit_mb,
            ..Config::default()
        }
    }

    /// `n_count = min(floor(M/150) - 1, ncpu)` for HTML documents (§4.6).
    pub fn count_stage_workers(&self, ncpu: usize) -> usize {
        let budget = (self.memory_limit_mb / 150).saturating_sub(1);
        budget.max(1).min(ncpu.max(1))
    }

    /// `n_partial = min(floor(M/100) - 1, ncpu)` (§4.6).
    pub fn partial_stage_workers(&self, ncpu: usize) -> usize {
        let budget = (self.memory_limit_mb / 100).saturating_sub(1);
        budget.max(1).min(ncpu.max(1))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage_path: PathBuf::from("./data"),
            memory_limit_mb: 512,
            doc_chunk_size: 10_000,
            bucket_size: 1_000,
            query_worker_threads: 8,
        }
    }
}

impl Config {
    pub fn cache_dir(&self) -> PathBuf {
        self.storage_path.join("cache")
    }

    pub fn pre_ind_dir(&self) -> PathBuf {
        self.cache_dir().join("pre_ind")
    }

    pub fn partial_counts_dir(&self) -> PathBuf {
        self.cache_dir().join("partial_counts")
    }

    pub fn partial_indexes_dir(&self) -> PathBuf {
        self.cache_dir().join("partial_indexes")
    }

    pub fn final_dir(&self) -> PathBuf {
        self.storage_path.join("final")
    }

    pub fn final_index_path(&self) -> PathBuf {
        self.final_dir().join("index")
    }

    pub fn final_count_path(&self) -> PathBuf {
        self.final_dir().join("count")
    }

    pub fn final_url_index_path(&self) -> PathBuf {
        self.final_dir().join("url_index")
    }
}
