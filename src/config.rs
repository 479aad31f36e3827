use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub notes: NotesConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub safety: SafetyConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NotesConfig {
    #[serde(default = "default_notes_dir")]
    pub dir: PathBuf,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            dir: default_notes_dir(),
        }
    }
}

fn default_notes_dir() -> PathBuf {
    PathBuf::from("data/notes")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
        }
    }
}

fn default_max_chars() -> usize {
    crate::chunk::DEFAULT_MAX_CHARS
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

fn default_top_k() -> usize {
    4
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiConfig {
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            chat_model: default_chat_model(),
            embedding_model: default_embedding_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_chat_model() -> String {
    "gpt-4.1-mini".to_string()
}
fn default_embedding_model() -> String {
    "text-embedding-3-small".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct SafetyConfig {
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
        }
    }
}

fn default_max_input_chars() -> usize {
    crate::safety::DEFAULT_MAX_INPUT_CHARS
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from("logs/requests.log")
}

/// Load configuration from a TOML file. A missing file is not an error:
/// the tool runs with built-in defaults so a fresh checkout works without
/// any setup. The `OPENAI_API_KEY` is read from the environment by the
/// API clients, never from this file.
pub fn load_config(path: &Path) -> Result<Config> {
    let config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")?
    } else {
        Config::default()
    };

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.chunking.max_chars == 0 {
        anyhow::bail!("chunking.max_chars must be > 0");
    }
    if config.retrieval.top_k == 0 {
        anyhow::bail!("retrieval.top_k must be > 0");
    }
    if config.safety.max_input_chars == 0 {
        anyhow::bail!("safety.max_input_chars must be > 0");
    }
    if config.openai.timeout_secs == 0 {
        anyhow::bail!("openai.timeout_secs must be > 0");
    }
    if config.openai.chat_model.is_empty() {
        anyhow::bail!("openai.chat_model must not be empty");
    }
    if config.openai.embedding_model.is_empty() {
        anyhow::bail!("openai.embedding_model must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_file_missing() {
        let config = load_config(Path::new("/nonexistent/buddy.toml")).unwrap();
        assert_eq!(config.notes.dir, PathBuf::from("data/notes"));
        assert_eq!(config.chunking.max_chars, 800);
        assert_eq!(config.retrieval.top_k, 4);
        assert_eq!(config.openai.chat_model, "gpt-4.1-mini");
        assert_eq!(config.openai.embedding_model, "text-embedding-3-small");
        assert_eq!(config.safety.max_input_chars, 2000);
        assert_eq!(config.telemetry.log_path, PathBuf::from("logs/requests.log"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [notes]
            dir = "my/notes"

            [retrieval]
            top_k = 6
            "#,
        )
        .unwrap();
        assert_eq!(config.notes.dir, PathBuf::from("my/notes"));
        assert_eq!(config.retrieval.top_k, 6);
        assert_eq!(config.chunking.max_chars, 800);
        assert_eq!(config.safety.max_input_chars, 2000);
    }

    #[test]
    fn test_zero_chunk_budget_rejected() {
        let config: Config = toml::from_str("[chunking]\nmax_chars = 0\n").unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let config: Config = toml::from_str("[retrieval]\ntop_k = 0\n").unwrap();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_model_rejected() {
        let config: Config = toml::from_str("[openai]\nembedding_model = \"\"\n").unwrap();
        assert!(validate(&config).is_err());
    }
}
