//! Configuration management for Mindbridge
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.mindbridge/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{Result, ServiceError};
use crate::generation::{DEFAULT_OLLAMA_URL, DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_URL};

/// Complete configuration for Mindbridge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Knowledge source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub path: String,
}

/// Generation backend family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "ollama")]
    Ollama,
}

/// Generation backend configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub provider: Provider,
    /// Overrides the provider's default endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: "data/mental_health_knowledge.json".to_string(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: Provider::OpenAi,
            base_url: None,
            model: DEFAULT_OPENAI_MODEL.to_string(),
            max_tokens: 500,
            temperature: 0.7,
            timeout_secs: 30,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl GenerationConfig {
    /// Endpoint the backend will talk to
    pub fn effective_base_url(&self) -> &str {
        match (&self.base_url, self.provider) {
            (Some(url), _) => url,
            (None, Provider::OpenAi) => DEFAULT_OPENAI_URL,
            (None, Provider::Ollama) => DEFAULT_OLLAMA_URL,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard configuration file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".mindbridge").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServiceError::ConfigError(
                "port must be greater than 0".to_string(),
            ));
        }

        if self.generation.max_tokens == 0 {
            return Err(ServiceError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ServiceError::ConfigError(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        if self.generation.timeout_secs == 0 {
            return Err(ServiceError::ConfigError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.generation.model.trim().is_empty() {
            return Err(ServiceError::ConfigError("model must not be empty".to_string()));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = self.to_toml()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ServiceError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Knowledge file path with tilde expanded
    pub fn knowledge_path(&self) -> PathBuf {
        Self::expand_path(&self.knowledge.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.generation.provider, Provider::OpenAi);
        assert_eq!(config.generation.model, "gpt-3.5-turbo");
        assert_eq!(config.generation.max_tokens, 500);
        assert_eq!(config.knowledge.path, "data/mental_health_knowledge.json");
    }

    #[test]
    fn test_config_validation_success() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_temperature() {
        let mut config = Config::default();
        config.generation.temperature = 2.5;
        assert!(config.validate().is_err());
        config.generation.temperature = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_timeout_and_tokens() {
        let mut config = Config::default();
        config.generation.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.generation.max_tokens = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [generation]
            provider = "ollama"
            model = "llama3.2"
            "#,
        )
        .unwrap();
        assert_eq!(config.generation.provider, Provider::Ollama);
        assert_eq!(config.generation.max_tokens, 500);
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.generation.effective_base_url(), DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [generation]
            provider = "carrier-pigeon"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.server.port = 8080;
        config.generation.base_url = Some("http://localhost:8000/v1".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(Some(path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load_from_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ServiceError::ConfigError(_))));
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(Config::default().bind_address(), "0.0.0.0:5001");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path("~/.mindbridge/knowledge.json");
        assert!(!expanded.to_string_lossy().contains('~'));
    }

    #[test]
    fn test_expand_path_without_tilde() {
        let path = "/absolute/path";
        assert_eq!(Config::expand_path(path).to_string_lossy(), path);
    }
}
