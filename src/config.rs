// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "AGGREGATOR_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/aggregator.toml";
pub const DEFAULT_JSON_PATH: &str = "config/aggregator.json";

pub const ENV_GREENHOUSE_TOKENS: &str = "GREENHOUSE_TOKENS";
pub const ENV_LEVER_TOKENS: &str = "LEVER_TOKENS";
pub const ENV_CACHE_TTL_SECONDS: &str = "CACHE_TTL_SECONDS";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HTTP_TIMEOUT_SECS";
pub const ENV_GREENHOUSE_BASE_URL: &str = "GREENHOUSE_BASE_URL";
pub const ENV_LEVER_BASE_URL: &str = "LEVER_BASE_URL";
pub const ENV_REMOTIVE_BASE_URL: &str = "REMOTIVE_BASE_URL";

pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatorConfig {
    /// Greenhouse boards fetched when a request has no `greenhouse_tokens` override.
    pub greenhouse_tokens: Vec<String>,
    /// Lever boards fetched by the multi-source endpoint when not overridden.
    pub lever_tokens: Vec<String>,
    /// Lever boards for the Lever-only endpoint; only set explicitly, no built-in fallback.
    pub lever_only_tokens: Vec<String>,
    pub cache_ttl_secs: u64,
    pub http_timeout_secs: u64,
    pub greenhouse_base_url: String,
    pub lever_base_url: String,
    pub remotive_base_url: String,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            greenhouse_tokens: vec!["airbnb".into(), "stripe".into()],
            lever_tokens: vec!["lever".into(), "robinhood".into()],
            lever_only_tokens: Vec::new(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            greenhouse_base_url: "https://boards-api.greenhouse.io".into(),
            lever_base_url: "https://api.lever.co".into(),
            remotive_base_url: "https://remotive.com".into(),
        }
    }
}

/// File layer: every key optional, missing keys keep the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    greenhouse_tokens: Option<Vec<String>>,
    lever_tokens: Option<Vec<String>>,
    cache_ttl_secs: Option<u64>,
    http_timeout_secs: Option<u64>,
    greenhouse_base_url: Option<String>,
    lever_base_url: Option<String>,
    remotive_base_url: Option<String>,
}

impl AggregatorConfig {
    /// Defaults, then config file (if any), then environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(path) = config_file_path()? {
            let file = load_file(&path)?;
            cfg.apply_file(file);
        }
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    /// Load from an explicit file (TOML or JSON) without touching the environment.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut cfg = Self::default();
        cfg.apply_file(load_file(path)?);
        Ok(cfg)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(v) = file.greenhouse_tokens {
            self.greenhouse_tokens = clean_list(v);
        }
        if let Some(v) = file.lever_tokens {
            let v = clean_list(v);
            self.lever_only_tokens = v.clone();
            self.lever_tokens = v;
        }
        if let Some(v) = file.cache_ttl_secs {
            self.cache_ttl_secs = v;
        }
        if let Some(v) = file.http_timeout_secs {
            self.http_timeout_secs = v.max(1);
        }
        if let Some(v) = file.greenhouse_base_url {
            self.greenhouse_base_url = v;
        }
        if let Some(v) = file.lever_base_url {
            self.lever_base_url = v;
        }
        if let Some(v) = file.remotive_base_url {
            self.remotive_base_url = v;
        }
    }

    fn apply_env<F>(&mut self, get: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An empty token list counts as unset and keeps the current boards.
        let tokens = |k: &str| get(k).filter(|v| !v.trim().is_empty());
        if let Some(raw) = tokens(ENV_GREENHOUSE_TOKENS) {
            self.greenhouse_tokens = split_tokens(&raw);
        }
        if let Some(raw) = tokens(ENV_LEVER_TOKENS) {
            let v = split_tokens(&raw);
            self.lever_only_tokens = v.clone();
            self.lever_tokens = v;
        }
        if let Some(raw) = get(ENV_CACHE_TTL_SECONDS) {
            self.cache_ttl_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_CACHE_TTL_SECONDS}={raw:?} is not a number"))?;
        }
        if let Some(raw) = get(ENV_HTTP_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{ENV_HTTP_TIMEOUT_SECS}={raw:?} is not a number"))?;
            self.http_timeout_secs = secs.max(1);
        }
        if let Some(v) = get(ENV_GREENHOUSE_BASE_URL) {
            self.greenhouse_base_url = v;
        }
        if let Some(v) = get(ENV_LEVER_BASE_URL) {
            self.lever_base_url = v;
        }
        if let Some(v) = get(ENV_REMOTIVE_BASE_URL) {
            self.remotive_base_url = v;
        }
        Ok(())
    }
}

/// 1) $AGGREGATOR_CONFIG_PATH (must exist)
/// 2) config/aggregator.toml
/// 3) config/aggregator.json
fn config_file_path() -> Result<Option<PathBuf>> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return Ok(Some(pb));
        }
        return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
    }
    for candidate in [DEFAULT_TOML_PATH, DEFAULT_JSON_PATH] {
        let pb = PathBuf::from(candidate);
        if pb.exists() {
            return Ok(Some(pb));
        }
    }
    Ok(None)
}

fn load_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading aggregator config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if ext == "json" {
        serde_json::from_str(&content)
            .with_context(|| format!("parsing {} as JSON", path.display()))
    } else {
        toml::from_str(&content).with_context(|| format!("parsing {} as TOML", path.display()))
    }
}

/// Split a comma-separated list, trimming entries and dropping empties. Order is kept.
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
