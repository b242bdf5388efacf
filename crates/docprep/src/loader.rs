//! Scraped-documentation loading.
//!
//! Reads the JSON files produced by the documentation scraper into
//! engine [`Document`]s, and discovers scraped files under a directory
//! root. Entries are deserialized leniently: a missing field takes its
//! default and a mistyped entry becomes an empty document, so the engine
//! rejects individual documents instead of one bad entry failing the
//! whole file.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use docprep_core::models::Document;

/// One entry of a scraped documentation JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapedDoc {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_doc_type")]
    pub doc_type: String,
    #[serde(default)]
    pub scraped_at: String,
}

fn default_doc_type() -> String {
    "general".to_string()
}

impl From<ScrapedDoc> for Document {
    fn from(doc: ScrapedDoc) -> Self {
        Document {
            content: doc.content,
            title: doc.title,
            source: doc.source,
            url: doc.url,
            doc_type: doc.doc_type,
            scraped_at: doc.scraped_at,
        }
    }
}

/// Load one scraped JSON file into documents.
pub fn load_scraped_file(path: &Path) -> Result<Vec<Document>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scraped file: {}", path.display()))?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("Scraped file is not a JSON array: {}", path.display()))?;

    let documents = entries
        .into_iter()
        .map(
            |value| match serde_json::from_value::<ScrapedDoc>(value) {
                Ok(doc) => doc.into(),
                Err(_) => empty_document(),
            },
        )
        .collect();
    Ok(documents)
}

/// Placeholder for an entry that failed to deserialize; the engine
/// rejects it as missing `content` and the coordinator records the skip.
fn empty_document() -> Document {
    Document {
        content: String::new(),
        title: String::new(),
        source: String::new(),
        url: String::new(),
        doc_type: default_doc_type(),
        scraped_at: String::new(),
    }
}

/// Discover scraped JSON files under `root`, deterministically ordered.
pub fn scan_scraped_dir(
    root: &Path,
    include_globs: &[String],
    exclude_globs: &[String],
) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        bail!("Scraped directory does not exist: {}", root.display());
    }

    let include_set = build_globset(include_globs)?;
    let exclude_set = build_globset(exclude_globs)?;

    let mut paths = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(path);
        let rel_str = relative.to_string_lossy().to_string();

        if exclude_set.is_match(&rel_str) {
            continue;
        }
        if !include_set.is_match(&rel_str) {
            continue;
        }
        paths.push(path.to_path_buf());
    }

    paths.sort();
    Ok(paths)
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
