use anyhow::{Context, Result};
use extract::{CacheSettings, LlmProvider, LlmSettings, RetrySettings};
use ingest::TesseractOcr;
use pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub upload: UploadConfig,
    pub llm: LlmSettings,
    pub retry: RetrySettings,
    pub cache: CacheSettings,
    pub ocr: TesseractOcr,
    pub cors: CorsConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_bytes: 16 * 1024 * 1024,
            allowed_extensions: ["pdf", "png", "jpg", "jpeg"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

impl UploadConfig {
    /// Case-insensitive
    pub fn allows(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Read the TOML file if it exists, then apply `ORGCHART_*` overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                Self::from_toml(&raw)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))?
            }
            _ => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Config file location from `ORGCHART_CONFIG`, else `orgchart.toml`.
    pub fn default_path() -> PathBuf {
        std::env::var("ORGCHART_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("orgchart.toml"))
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ORGCHART_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("ORGCHART_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("ORGCHART_PORT is not a port number: {}", port))?;
        }
        if let Some(provider) = lookup("ORGCHART_LLM_PROVIDER") {
            self.llm.provider = match provider.to_ascii_lowercase().as_str() {
                "ollama" => LlmProvider::Ollama,
                "openai" => LlmProvider::OpenAi,
                other => anyhow::bail!("Unknown LLM provider: {}", other),
            };
        }
        if let Some(base_url) = lookup("ORGCHART_LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(model) = lookup("ORGCHART_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(api_key) = lookup("ORGCHART_LLM_API_KEY").or_else(|| lookup("OPENAI_API_KEY")) {
            self.llm.api_key = Some(api_key);
        }
        if let Some(strict) = lookup("ORGCHART_STRICT") {
            self.pipeline.strict = matches!(
                strict.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        if self.upload.max_bytes == 0 {
            return Err("upload.max_bytes must be greater than 0".to_string());
        }
        if self.upload.allowed_extensions.is_empty() {
            return Err("upload.allowed_extensions must not be empty".to_string());
        }
        if self.llm.max_tokens == 0 {
            return Err("llm.max_tokens must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(format!(
                "llm.temperature must be within [0, 2], got {}",
                self.llm.temperature
            ));
        }
        if self.llm.provider == LlmProvider::OpenAi
            && self.llm.api_key.as_deref().is_none_or(str::is_empty)
        {
            return Err("llm.api_key is required for the openai provider".to_string());
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.upload.max_bytes, 16 * 1024 * 1024);
        assert!(!config.pipeline.strict);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [llm]
            model = "mistral"

            [pipeline]
            strict = true
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.llm.base_url, "http://localhost:11434");
        assert_eq!(config.ocr.language, "eng");
        assert!(config.pipeline.strict);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("orgchart.toml"))).unwrap();
        assert_eq!(config.upload.allowed_extensions.len(), 4);
        assert_eq!(config.upload.dir, PathBuf::from("uploads"));
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("ORGCHART_PORT", "9000"),
            ("ORGCHART_LLM_PROVIDER", "OpenAI"),
            ("OPENAI_API_KEY", "sk-test"),
            ("ORGCHART_STRICT", "true"),
        ]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.llm.provider, LlmProvider::OpenAi);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert!(config.pipeline.strict);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_key_wins_over_openai_key() {
        let vars = env(&[("ORGCHART_LLM_API_KEY", "primary"), ("OPENAI_API_KEY", "secondary")]);
        let mut config = AppConfig::default();
        config.apply_overrides(|key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.llm.api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn test_bad_overrides_are_errors() {
        let vars = env(&[("ORGCHART_PORT", "not-a-port")]);
        let mut config = AppConfig::default();
        assert!(config.apply_overrides(|key| vars.get(key).cloned()).is_err());

        let vars = env(&[("ORGCHART_LLM_PROVIDER", "mystery")]);
        assert!(config.apply_overrides(|key| vars.get(key).cloned()).is_err());
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.upload.allowed_extensions.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.llm.temperature = 2.5;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.llm.max_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.llm.provider = LlmProvider::OpenAi;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_extension_check_ignores_case() {
        let upload = UploadConfig::default();
        assert!(upload.allows("PDF"));
        assert!(upload.allows("jpeg"));
        assert!(!upload.allows("gif"));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orgchart.toml");
        std::fs::write(&path, "[upload]\nmax_bytes = 1024\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.upload.max_bytes, 1024);
    }
}
