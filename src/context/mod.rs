//! Context building for AI requests
//!
//! Walks a file or directory and turns it into a deterministic block of
//! text the model sees before the user's prompt. Binary, oversized and
//! unreadable files are dropped silently; only a missing root or a root
//! that is neither a file nor a directory is an error.

pub mod document;
pub mod error;
pub mod policy;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use walkdir::WalkDir;

pub use document::{ContextDocument, Omission};
pub use error::{ContextError, Result};
pub use policy::{EntryKind, InclusionDecision, PathEntry, SkipReason};

pub const DEFAULT_MAX_DEPTH: usize = 5;
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_000_000;

/// Limits applied while building a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Directories at this depth or deeper are not descended into
    pub max_depth: usize,
    /// Files larger than this many bytes are skipped
    pub max_file_size: u64,
    /// Emit `<path> - <N> lines` instead of file contents
    pub summarize: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            summarize: false,
        }
    }
}

/// Build the context for `path`.
pub fn build_context(path: impl AsRef<Path>, config: &ContextConfig) -> Result<ContextDocument> {
    let root = path.as_ref();
    let entry = PathEntry::probe(root, 0);

    match entry.kind {
        EntryKind::Missing => Err(ContextError::NotFound(root.to_path_buf())),
        EntryKind::Other => Err(ContextError::InvalidPathKind(root.to_path_buf())),
        EntryKind::File => {
            let mut doc = ContextDocument::for_file(root);
            let decision = policy::decide_file(&entry, config);
            record(&mut doc, entry, decision);
            Ok(doc)
        }
        EntryKind::Directory => Ok(walk_directory(root, config)),
    }
}

/// Read a single file as text.
pub fn read_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    match PathEntry::probe(path, 0).kind {
        EntryKind::Missing => Err(ContextError::NotFound(path.to_path_buf())),
        EntryKind::Directory | EntryKind::Other => {
            Err(ContextError::InvalidPathKind(path.to_path_buf()))
        }
        EntryKind::File => fs::read_to_string(path).map_err(|source| ContextError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn walk_directory(root: &Path, config: &ContextConfig) -> ContextDocument {
    let mut doc = ContextDocument::for_directory(root);
    let mut walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(next) = walker.next() {
        let dent = match next {
            Ok(dent) => dent,
            Err(err) => {
                // Unlistable directory, dangling link or link loop
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                debug!(path = %path.display(), error = %err, "Skipping unreadable entry");
                doc.omit(path, SkipReason::Unreadable, true);
                continue;
            }
        };

        let entry = PathEntry::from_dir_entry(&dent);
        let decision = match entry.kind {
            EntryKind::Directory if entry.depth >= config.max_depth => {
                walker.skip_current_dir();
                InclusionDecision::Skipped(SkipReason::DepthExceeded)
            }
            EntryKind::Directory => continue,
            EntryKind::File => policy::decide_file(&entry, config),
            EntryKind::Missing => InclusionDecision::Errored(SkipReason::NotFound),
            EntryKind::Other => InclusionDecision::Skipped(SkipReason::Unreadable),
        };

        record(&mut doc, entry, decision);
    }

    doc
}

fn record(doc: &mut ContextDocument, entry: PathEntry, decision: InclusionDecision) {
    match decision {
        InclusionDecision::Included(contribution) => doc.push(entry.path, contribution),
        InclusionDecision::Skipped(reason) => {
            trace!(path = %entry.path.display(), %reason, "Skipped");
            doc.omit(entry.path, reason, false);
        }
        InclusionDecision::Errored(reason) => {
            debug!(path = %entry.path.display(), %reason, "Failed to read, skipping");
            doc.omit(entry.path, reason, true);
        }
    }
}
