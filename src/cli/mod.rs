//! CLI command implementations

pub mod ask;
pub mod context;
pub mod diff;
pub mod info;

use clap::Args;

use crate::context::ContextConfig;

/// Per-invocation overrides for the `[context]` config section
#[derive(Debug, Clone, Default, Args)]
pub struct ContextArgs {
    /// Do not descend into directories at this depth or deeper
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Skip files larger than this many bytes
    #[arg(long)]
    pub max_file_size: Option<u64>,

    /// Send one line per file (path and line count) instead of contents
    #[arg(short, long)]
    pub summarize: bool,
}

impl ContextArgs {
    pub fn apply(&self, base: ContextConfig) -> ContextConfig {
        ContextConfig {
            max_depth: self.max_depth.unwrap_or(base.max_depth),
            max_file_size: self.max_file_size.unwrap_or(base.max_file_size),
            summarize: self.summarize || base.summarize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_top_of_config() {
        let base = ContextConfig {
            max_depth: 3,
            max_file_size: 10,
            summarize: false,
        };
        let args = ContextArgs {
            max_depth: Some(1),
            max_file_size: None,
            summarize: true,
        };

        let merged = args.apply(base);
        assert_eq!(merged.max_depth, 1);
        assert_eq!(merged.max_file_size, 10);
        assert!(merged.summarize);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let base = ContextConfig::default();
        assert_eq!(ContextArgs::default().apply(base), base);
    }
}
