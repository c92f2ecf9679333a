use std::fmt;

/// Mirrors spec.md §7's error-kind taxonomy. Whether a given `Error` is
/// fatal or merely logged-and-skipped is decided by the caller, not by
/// the kind: a `TransientDocumentError` is always absorbed by the worker
/// that produced it; the rest propagate with `?` out of the stage that
/// raised them.
#[derive(Debug)]
pub enum ErrorKind {
    Io,
    Parse,
    NotFound,
    InvalidArgument,
    Internal,
    InvalidInput,
    OutOfMemory,
    InvalidState,
    TransientDocument,
    Bucket,
    Merge,
    Config,
    Query,
}

#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error {
            kind,
            context: context.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.context)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: err.to_string(),
        }
    }
}

impl From<fst::Error> for Error {
    fn from(err: fst::Error) -> Self {
        Error {
            kind: ErrorKind::Internal,
            context: format!("fst error: {}", err),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error {
            kind: ErrorKind::Io,
            context: format!("zip error: {}", err),
        }
    }
}

impl From<warc::Error> for Error {
    fn from(err: warc::Error) -> Self {
        Error {
            kind: ErrorKind::TransientDocument,
            context: format!("warc error: {}", err),
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error {
            kind: ErrorKind::Internal,
            context: format!("regex error: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
