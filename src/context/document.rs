//! Serialized context handed to the prompt assembler

use std::fmt;
use std::path::{Path, PathBuf};

use super::policy::SkipReason;

/// What a single included file contributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contribution {
    /// Full file text, inlined verbatim
    Text(String),
    /// Summarize mode: only the line count
    LineCount(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBlock {
    pub path: PathBuf,
    pub contribution: Contribution,
}

impl ContextBlock {
    fn write_single(&self, out: &mut String) {
        match &self.contribution {
            Contribution::Text(text) => {
                out.push_str(&format!(
                    "--- CONTEXT FROM FILE: {} ---\n\n",
                    self.path.display()
                ));
                out.push_str(text);
            }
            Contribution::LineCount(lines) => {
                out.push_str(&summary_line(&self.path, *lines));
            }
        }
    }

    fn write_member(&self, out: &mut String) {
        match &self.contribution {
            Contribution::Text(text) => {
                let path = self.path.display();
                out.push_str(&format!("--- START OF {} ---\n\n", path));
                out.push_str(text);
                out.push_str(&format!("\n--- END OF {} ---\n\n", path));
            }
            Contribution::LineCount(lines) => {
                out.push_str(&summary_line(&self.path, *lines));
                out.push('\n');
            }
        }
    }
}

fn summary_line(path: &Path, lines: usize) -> String {
    format!("{} - {} lines", path.display(), lines)
}

/// An entry that was left out, kept for diagnostics only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Omission {
    pub path: PathBuf,
    pub reason: SkipReason,
    /// The filesystem failed us, as opposed to a policy skip
    pub errored: bool,
}

/// Ordered context for one request.
///
/// Blocks are kept in traversal order; rendering the same document twice
/// yields the same bytes. Omissions never reach the rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextDocument {
    root: PathBuf,
    single_file: bool,
    blocks: Vec<ContextBlock>,
    omitted: Vec<Omission>,
}

impl ContextDocument {
    pub(crate) fn for_file(root: &Path) -> Self {
        Self::new(root, true)
    }

    pub(crate) fn for_directory(root: &Path) -> Self {
        Self::new(root, false)
    }

    fn new(root: &Path, single_file: bool) -> Self {
        Self {
            root: root.to_path_buf(),
            single_file,
            blocks: Vec::new(),
            omitted: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, path: PathBuf, contribution: Contribution) {
        self.blocks.push(ContextBlock { path, contribution });
    }

    pub(crate) fn omit(&mut self, path: PathBuf, reason: SkipReason, errored: bool) {
        self.omitted.push(Omission {
            path,
            reason,
            errored,
        });
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blocks(&self) -> &[ContextBlock] {
        &self.blocks
    }

    pub fn omitted(&self) -> &[Omission] {
        &self.omitted
    }

    /// True when the root was a single file rather than a directory
    pub fn is_single_file(&self) -> bool {
        self.single_file
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Serialize into prompt text
    pub fn render(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            if self.single_file {
                block.write_single(&mut out);
            } else {
                block.write_member(&mut out);
            }
        }
        out
    }
}

impl fmt::Display for ContextDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
