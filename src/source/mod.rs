pub mod archive;

pub use archive::{Document, DocumentSource};
