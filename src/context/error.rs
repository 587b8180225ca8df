use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ContextError>;

/// Hard failures of the context builder.
///
/// Only problems with the root path surface here. Anything that goes wrong
/// further down the tree is absorbed as a skip.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Error: Path not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("Error: Path is not a file or a directory: {}", .0.display())]
    InvalidPathKind(PathBuf),

    #[error("Error reading file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
