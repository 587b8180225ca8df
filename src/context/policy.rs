//! Per-entry inclusion policy
//!
//! Decides, for a single filesystem entry, whether it contributes to the
//! context and in what form. Nothing in here returns an error: every
//! failure is folded into an [`InclusionDecision`].

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use walkdir::DirEntry;

use super::document::Contribution;
use super::ContextConfig;

/// Number of leading bytes inspected by the binary heuristic
pub const BINARY_PROBE_LEN: usize = 1024;

/// What a path turned out to be when we looked at it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Missing,
    Other,
}

impl EntryKind {
    fn from_file_type(file_type: fs::FileType) -> Self {
        if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        }
    }
}

/// A path under consideration for inclusion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Size in bytes, files only
    pub size: Option<u64>,
    /// Distance from the root of the request
    pub depth: usize,
}

impl PathEntry {
    /// Stat `path`, following symlinks. A dangling link reads as missing.
    pub fn probe(path: &Path, depth: usize) -> Self {
        let (kind, size) = match fs::metadata(path) {
            Ok(meta) => {
                let kind = EntryKind::from_file_type(meta.file_type());
                let size = (kind == EntryKind::File).then(|| meta.len());
                (kind, size)
            }
            Err(_) => (EntryKind::Missing, None),
        };

        Self {
            path: path.to_path_buf(),
            kind,
            size,
            depth,
        }
    }

    /// Build from a walker entry. The walker follows links, so the file
    /// type already describes the link target.
    pub fn from_dir_entry(dent: &DirEntry) -> Self {
        let kind = EntryKind::from_file_type(dent.file_type());
        let size = if kind == EntryKind::File {
            dent.metadata().ok().map(|meta| meta.len())
        } else {
            None
        };

        Self {
            path: dent.path().to_path_buf(),
            kind,
            size,
            depth: dent.depth(),
        }
    }
}

/// Why an entry was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooLarge,
    Binary,
    Unreadable,
    DepthExceeded,
    NotFound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::TooLarge => "too-large",
            SkipReason::Binary => "binary",
            SkipReason::Unreadable => "unreadable",
            SkipReason::DepthExceeded => "depth-exceeded",
            SkipReason::NotFound => "not-found",
        };
        f.write_str(label)
    }
}

/// Outcome for a single entry.
///
/// `Skipped` is a policy decision, `Errored` means the filesystem got in
/// the way. Both leave the entry out of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InclusionDecision {
    Included(Contribution),
    Skipped(SkipReason),
    Errored(SkipReason),
}

/// Apply the file policy: size cap, binary probe, then a full read.
pub fn decide_file(entry: &PathEntry, config: &ContextConfig) -> InclusionDecision {
    if entry.size.is_some_and(|size| size > config.max_file_size) {
        return InclusionDecision::Skipped(SkipReason::TooLarge);
    }

    match looks_binary(&entry.path) {
        Ok(true) => return InclusionDecision::Skipped(SkipReason::Binary),
        Ok(false) => {}
        Err(err) => return InclusionDecision::Errored(reason_for(&err)),
    }

    match fs::read_to_string(&entry.path) {
        Ok(text) if config.summarize => InclusionDecision::Included(Contribution::LineCount(
            count_lines(&text),
        )),
        Ok(text) => InclusionDecision::Included(Contribution::Text(text)),
        // Valid prefix, garbage further in
        Err(err) if err.kind() == io::ErrorKind::InvalidData => {
            InclusionDecision::Skipped(SkipReason::Binary)
        }
        Err(err) => InclusionDecision::Errored(reason_for(&err)),
    }
}

fn looks_binary(path: &Path) -> io::Result<bool> {
    let mut probe = Vec::with_capacity(BINARY_PROBE_LEN);
    File::open(path)?
        .take(BINARY_PROBE_LEN as u64)
        .read_to_end(&mut probe)?;
    Ok(is_binary_probe(&probe))
}

/// Null byte or invalid UTF-8 in the probe window means binary.
pub fn is_binary_probe(bytes: &[u8]) -> bool {
    if bytes.contains(&0) {
        return true;
    }

    std::str::from_utf8(bytes).is_err()
}

/// Number of newline-terminated lines; a trailing partial line is not counted
pub fn count_lines(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count()
}

fn reason_for(err: &io::Error) -> SkipReason {
    match err.kind() {
        io::ErrorKind::NotFound => SkipReason::NotFound,
        _ => SkipReason::Unreadable,
    }
}
