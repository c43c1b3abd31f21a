use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::generation::anthropic::{API_KEY_ENV, AnthropicClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::library::LectureLibrary;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "lecturegen";

/// Language of generated content when none is configured.
pub const DEFAULT_LANGUAGE: &str = "Korean";

const VALID_KEYS: &str = "defaults.theme, defaults.windowed, defaults.language, ai.model, ai.api_key, ai.base_url, library.dir";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library: Option<LibraryConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,

    /// Language the lecture is written in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// API key. If not set, falls back to the ANTHROPIC_API_KEY environment
    /// variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl AiConfig {
    /// Resolve API key from config or environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(key) = &self.api_key {
            if !key.is_empty() {
                return Some(key.clone());
            }
        }
        std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
    }
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `lecturegen config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# lecturegen configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn theme(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("light")
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn language(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.language.as_deref())
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    pub fn model(&self) -> &str {
        self.ai
            .as_ref()
            .and_then(|a| a.model.as_deref())
            .unwrap_or(DEFAULT_MODEL)
    }

    pub fn base_url(&self) -> &str {
        self.ai
            .as_ref()
            .and_then(|a| a.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn api_key(&self) -> Option<String> {
        match &self.ai {
            Some(ai) => ai.resolve_api_key(),
            None => AiConfig::default().resolve_api_key(),
        }
    }

    /// Directory holding the saved-lecture library.
    pub fn library_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = self.library.as_ref().and_then(|l| l.dir.clone()) {
            return Ok(dir);
        }
        LectureLibrary::default_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
    }

    /// Build a generation client from the AI settings.
    pub fn client(&self) -> Result<AnthropicClient> {
        let key = self.api_key().ok_or_else(|| {
            anyhow::anyhow!(
                "No API key configured. Set {API_KEY_ENV} or run `lecturegen config set ai.api_key <KEY>`."
            )
        })?;
        Ok(AnthropicClient::new(key)
            .with_model(self.model())
            .with_base_url(self.base_url())
            .with_language(self.language()))
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.windowed" => {
                let windowed = match value {
                    "true" | "yes" | "on" => true,
                    "false" | "no" | "off" => false,
                    _ => anyhow::bail!("Invalid value: {value}. Must be 'true' or 'false'."),
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(windowed);
            }
            "defaults.language" => {
                if value.trim().is_empty() {
                    anyhow::bail!("Language must not be empty.");
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .language = Some(value.trim().to_string());
            }
            "ai.model" => {
                if value.trim().is_empty() {
                    anyhow::bail!("Model must not be empty.");
                }
                self.ai.get_or_insert_with(AiConfig::default).model = Some(value.trim().to_string());
            }
            "ai.api_key" => {
                self.ai.get_or_insert_with(AiConfig::default).api_key =
                    Some(value.trim().to_string()).filter(|v| !v.is_empty());
            }
            "ai.base_url" => {
                if !value.starts_with("http://") && !value.starts_with("https://") {
                    anyhow::bail!("Invalid base URL: {value}. Must start with http:// or https://.");
                }
                self.ai.get_or_insert_with(AiConfig::default).base_url =
                    Some(value.trim_end_matches('/').to_string());
            }
            "library.dir" => {
                if value.trim().is_empty() {
                    anyhow::bail!("Library directory must not be empty.");
                }
                self.library.get_or_insert_with(LibraryConfig::default).dir =
                    Some(PathBuf::from(value));
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}
