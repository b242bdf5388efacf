use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use docprep_core::assemble::ChunkerConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default = "default_overlap_chars")]
    pub overlap_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            overlap_chars: default_overlap_chars(),
        }
    }
}

fn default_max_chars() -> usize {
    1600
}
fn default_overlap_chars() -> usize {
    200
}

#[derive(Debug, Deserialize, Clone)]
pub struct IngestConfig {
    /// Bound on concurrently chunked documents.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
        }
    }
}

fn default_workers() -> usize {
    4
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    /// Explicitly listed scraped files, e.g. `data/scraped/django_docs.json`.
    #[serde(default)]
    pub files: Vec<SourceFileConfig>,
    /// Optional directory to scan for additional scraped files.
    pub scan_root: Option<PathBuf>,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            scan_root: None,
            include_globs: default_include_globs(),
            exclude_globs: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceFileConfig {
    pub path: PathBuf,
    /// Display label for progress output, e.g. "Django".
    #[serde(default)]
    pub label: String,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.json".to_string()]
}

impl Config {
    /// Engine configuration derived from the chunking section.
    pub fn chunker_config(&self) -> Result<ChunkerConfig> {
        ChunkerConfig::new(self.chunking.max_chars, self.chunking.overlap_chars)
            .map_err(Into::into)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate chunking
    if config.chunking.max_chars == 0 {
        anyhow::bail!("chunking.max_chars must be > 0");
    }
    if config.chunking.overlap_chars >= config.chunking.max_chars {
        anyhow::bail!(
            "chunking.overlap_chars ({}) must be smaller than chunking.max_chars ({})",
            config.chunking.overlap_chars,
            config.chunking.max_chars
        );
    }

    // Validate ingest
    if config.ingest.workers == 0 {
        anyhow::bail!("ingest.workers must be >= 1");
    }

    Ok(config)
}
