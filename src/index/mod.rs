pub mod final_merger;
pub mod line_format;
pub mod merge;
pub mod partial_builder;
pub mod partial_loader;
pub mod per_doc_writer;
pub mod term_directory;
