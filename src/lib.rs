pub mod core;
pub mod mmap;
pub mod memory;
pub mod analysis;
pub mod source;
pub mod index;
pub mod build;
pub mod query;

/*
┌──────────────────────────────────────────────────────────────────────────┐
│                          ACHEI CRATE ARCHITECTURE                        │
└──────────────────────────────────────────────────────────────────────────┘

  build time (achei-index):

    source::archive::DocumentSource  (C1)
          │  (bytes, doc_id, url)
          ▼
    analysis::analyzer::Analyzer::analyze_document  (C2)
          │  (total_tokens, sorted term counts)
          ▼
    index::per_doc_writer  (C3) ──► cache/pre_ind/<doc_id>
          │  (bucketed in groups of 1000)
          ▼
    index::partial_builder  (C4) ──► cache/partial_indexes/*, cache/partial_counts/*
          │  (k-way merge, all buckets)
          ▼
    index::final_merger  (C5) ──► final/index, final/count

    build::orchestrator  (C6) stages the above under a memory ceiling.

  query time (achei-query):

    index::term_directory  (C7, opened once)
    index::partial_loader  (C8, per query term set)
    analysis::analyzer::Analyzer::analyze_query  (C9)
    query::matcher + query::scorer  (C10)
    query::topk  (C11)
*/
