use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8082/api";
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Environment variable overriding `api.base_url`.
pub const BASE_URL_ENV: &str = "REELBOX_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub movies: MoviesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiConfig {
    /// Prefix for every relative request path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoviesConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

fn default_page_size() -> u32 {
    20
}

fn default_sort() -> String {
    "releaseDate".to_string()
}

fn default_direction() -> String {
    "desc".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            content_type: default_content_type(),
        }
    }
}

impl Default for MoviesConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            sort: default_sort(),
            direction: default_direction(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, fall back to defaults otherwise, then apply
    /// the environment override.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            Self::default()
        };
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.api.base_url = url;
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let url = self.api.base_url.trim();
        if url.is_empty() {
            return Err(anyhow::anyhow!("api.base_url is required and cannot be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!("api.base_url must start with http:// or https://, got {}", url));
        }
        if self.api.content_type.trim().is_empty() {
            return Err(anyhow::anyhow!("api.content_type cannot be empty"));
        }
        if self.movies.page_size == 0 {
            return Err(anyhow::anyhow!("movies.page_size must be greater than zero"));
        }
        match self.movies.direction.as_str() {
            "asc" | "desc" => {}
            other => return Err(anyhow::anyhow!("movies.direction must be 'asc' or 'desc', got {}", other)),
        }
        Ok(())
    }
}
