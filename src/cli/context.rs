//! Context command - print exactly what the model would see for a path

use anyhow::{Context as _, Result};
use std::io::{self, Write};

use super::ContextArgs;
use crate::config::Config;
use crate::context::build_context;
use crate::ui;

pub fn run(config: Config, path: &str, overrides: &ContextArgs) -> Result<()> {
    let context_config = overrides.apply(config.context);
    let doc = build_context(path, &context_config)?;

    tracing::info!(
        "{}: {} included, {} omitted",
        doc.root().display(),
        doc.blocks().len(),
        doc.omitted().len()
    );

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(doc.render().as_bytes())
        .context("Failed to write context")?;
    stdout.flush()?;

    if config.verbose {
        ui::print_omissions(doc.omitted());
    }

    Ok(())
}
