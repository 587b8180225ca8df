//! Info command - show system information

use anyhow::Result;

use crate::config::{self, Config};

pub fn run(config: &Config) -> Result<()> {
    println!("NeuroCLI v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("System Information:");
    println!("  OS: {} {}", std::env::consts::OS, std::env::consts::ARCH);

    println!();
    println!("Configuration:");
    match config::config_path() {
        Ok(path) => println!("  Config file: {}", path.display()),
        Err(_) => println!("  Config file: unknown"),
    }
    println!("  Default provider: {}", config.ai.default_provider);
    println!(
        "  Context: max depth {}, max file size {} bytes, summarize {}",
        config.context.max_depth, config.context.max_file_size, config.context.summarize
    );

    println!();
    println!("AI Providers:");
    check_provider(&config.ai.providers.openai.api_key_env, "OpenAI");
    check_provider(&config.ai.providers.gemini.api_key_env, "Gemini");

    Ok(())
}

fn check_provider(env_var: &str, name: &str) {
    let status = if std::env::var(env_var).is_ok() {
        "configured"
    } else {
        "not configured"
    };
    println!("  {}: {} ({})", name, status, env_var);
}
