//! Configuration management for NeuroCLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ai::{gemini, openai};
use crate::context::ContextConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiConfig,
    pub context: ContextConfig,
    #[serde(skip)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub default_provider: String,
    pub providers: AiProviders,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ProviderTables")]
pub struct AiProviders {
    pub openai: ProviderConfig,
    pub gemini: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl ProviderConfig {
    fn new(api_key_env: &str, model: &str) -> Self {
        Self {
            api_key_env: api_key_env.to_string(),
            model: model.to_string(),
            endpoint: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

/// Provider tables as written in the file. Keys left out fall back to
/// that provider's defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderTables {
    openai: ProviderOverrides,
    gemini: ProviderOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProviderOverrides {
    api_key_env: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl ProviderOverrides {
    fn apply(self, base: ProviderConfig) -> ProviderConfig {
        ProviderConfig {
            api_key_env: self.api_key_env.unwrap_or(base.api_key_env),
            model: self.model.unwrap_or(base.model),
            endpoint: self.endpoint.or(base.endpoint),
            max_tokens: self.max_tokens.or(base.max_tokens),
            temperature: self.temperature.or(base.temperature),
        }
    }
}

impl From<ProviderTables> for AiProviders {
    fn from(tables: ProviderTables) -> Self {
        let defaults = AiProviders::default();
        Self {
            openai: tables.openai.apply(defaults.openai),
            gemini: tables.gemini.apply(defaults.gemini),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_provider: "openai".to_string(),
            providers: AiProviders::default(),
        }
    }
}

impl Default for AiProviders {
    fn default() -> Self {
        Self {
            openai: ProviderConfig::new("OPENAI_API_KEY", openai::DEFAULT_MODEL),
            gemini: ProviderConfig::new("GEMINI_API_KEY", gemini::DEFAULT_MODEL),
        }
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let config_dir = directories::ProjectDirs::from("dev", "neurocli", "neurocli")
        .context("Failed to determine config directory")?
        .config_dir()
        .to_path_buf();

    Ok(config_dir.join("config.toml"))
}

/// Load configuration from file or use defaults
pub fn load_config(custom_path: Option<&str>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        PathBuf::from(p)
    } else {
        config_path()?
    };

    load_config_from(&path)
}

fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::debug!("No config at {:?}, using defaults", path);
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {:?}", path))?;
    Ok(config)
}

/// Initialize configuration file with defaults
pub fn init_config(custom_path: Option<&str>) -> Result<()> {
    let path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => config_path()?,
    };

    if path.exists() {
        println!("Configuration file already exists at {:?}", path);
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {:?}", parent))?;
    }

    let content = toml::to_string_pretty(&Config::default())
        .context("Failed to serialize default config")?;

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write config to {:?}", path))?;

    println!("Configuration initialized at {:?}", path);
    Ok(())
}

/// Show current configuration
pub fn show_config(config: &Config) -> Result<()> {
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{}", content);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config.ai.default_provider, "openai");
        assert_eq!(config.context, ContextConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[context]\nmax_depth = 2\n\n[ai]\ndefault_provider = \"gemini\"\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.context.max_depth, 2);
        assert_eq!(config.context.max_file_size, 1_000_000);
        assert_eq!(config.ai.default_provider, "gemini");
        assert_eq!(config.ai.providers.openai.api_key_env, "OPENAI_API_KEY");
    }

    #[test]
    fn test_partial_provider_table_merges_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[ai.providers.gemini]\nmodel = \"gemini-2.0-flash\"\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        let gemini = &config.ai.providers.gemini;
        assert_eq!(gemini.model, "gemini-2.0-flash");
        assert_eq!(gemini.api_key_env, "GEMINI_API_KEY");
        assert_eq!(gemini.endpoint, None);
        assert_eq!(config.ai.providers.openai.model, openai::DEFAULT_MODEL);
    }

    #[test]
    fn test_default_config_round_trips() {
        let text = toml::to_string_pretty(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.ai.providers.gemini.model, gemini::DEFAULT_MODEL);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[context\n").unwrap();
        assert!(load_config_from(&path).is_err());
    }
}
