//! Application configuration, persisted as TOML under the user's home
//! directory. Secrets (the generation API key) are never stored here; they
//! come from the environment.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::retrieval::SearchParams;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub search: SearchParams,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Where documents, stop words, and cache artifacts live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    pub docs_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub stopwords_file: PathBuf,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            cache_dir: PathBuf::from("cache"),
            stopwords_file: PathBuf::from("stopwords.txt"),
        }
    }
}

/// Chunking parameters. `overlap` is accepted for interface compatibility
/// but the splitter emits disjoint chunks; see the chunker module.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub max_chars: usize,
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: 300,
            overlap: 50,
        }
    }
}

/// Generation service settings (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if absent
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_string = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, toml_string).context("Failed to write config file")?;

        Ok(())
    }

    /// Configuration file location: `~/.rmrag/config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;

        Ok(home.join(".rmrag").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.corpus.docs_dir, PathBuf::from("docs"));
        assert_eq!(config.chunking.max_chars, 300);
        assert_eq!(config.chunking.overlap, 50);
        assert_eq!(config.search.top_k, 10);
        assert_eq!(config.generation.model, "deepseek-chat");
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.corpus.docs_dir = PathBuf::from("/tmp/corpus");
        config.search.top_k = 5;

        let toml_string = toml::to_string(&config).unwrap();
        let deserialized: Config = toml::from_str(&toml_string).unwrap();

        assert_eq!(deserialized.corpus.docs_dir, PathBuf::from("/tmp/corpus"));
        assert_eq!(deserialized.search.top_k, 5);
    }

    #[test]
    fn test_partial_config_parses() {
        // Missing sections fall back to defaults
        let config: Config = toml::from_str("[search]\ntop_k = 3\n").unwrap();
        assert_eq!(config.search.top_k, 3);
        assert_eq!(config.chunking.max_chars, 300);
    }
}
