//! Ask command - send a prompt, optionally with a file or directory as context

use anyhow::Result;
use std::path::Path;

use super::ContextArgs;
use crate::ai;
use crate::config::Config;
use crate::diff::generate_diff;
use crate::prompt;
use crate::ui;

pub async fn run(
    config: Config,
    question: &str,
    path: Option<&str>,
    provider: Option<&str>,
    show_diff: bool,
    overrides: &ContextArgs,
) -> Result<()> {
    let context_config = overrides.apply(config.context);
    let client = ai::client_from_config(&config, provider)?;

    ui::print_header("NeuroCLI", Some(question));
    if let Some(path) = path {
        ui::print_target(path, Path::new(path).is_dir());
    }

    let spinner = ui::thinking_spinner(client.name());
    let result = prompt::get_ai_response(
        client.as_ref(),
        question,
        path.map(Path::new),
        &context_config,
    )
    .await;
    spinner.finish_and_clear();

    if show_diff && !result.original_content.is_empty() {
        let diff = generate_diff(&result.original_content, &result.response);
        ui::print_diff(&diff);
    } else {
        ui::print_response("Response", &result.response);
    }

    Ok(())
}
