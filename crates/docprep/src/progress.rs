//! Ingestion progress reporting.
//!
//! Reports observable progress during an ingestion run so operators see
//! which scraped files are being read, how chunking is advancing, and
//! when each source group reaches the store. Progress is emitted on
//! **stderr** so stdout remains parseable for scripts.

use std::io::Write;

/// A single progress event during ingestion.
#[derive(Clone, Debug)]
pub enum IngestProgressEvent {
    /// A scraped file is being loaded.
    Loading { file: String, label: String },
    /// A configured scraped file is missing and was skipped.
    MissingFile { file: String },
    /// n of total documents chunked.
    Chunking { n: u64, total: u64 },
    /// A source group was forwarded to the vector store.
    Storing { source: String, chunks: u64 },
}

/// Reports ingestion progress. Implementations write to stderr.
pub trait IngestProgressReporter: Send + Sync {
    /// Emit a progress event. Called from the ingestion pipeline.
    fn report(&self, event: IngestProgressEvent);
}

/// Human-friendly progress: "ingest  chunking  1,234 / 5,000 documents".
pub struct StderrProgress;

impl IngestProgressReporter for StderrProgress {
    fn report(&self, event: IngestProgressEvent) {
        let line = match &event {
            IngestProgressEvent::Loading { file, label } => {
                if label.is_empty() {
                    format!("ingest  loading  {}\n", file)
                } else {
                    format!("ingest  loading  {} ({})\n", file, label)
                }
            }
            IngestProgressEvent::MissingFile { file } => {
                format!("ingest  missing  {} (skipped)\n", file)
            }
            IngestProgressEvent::Chunking { n, total } => {
                format!(
                    "ingest  chunking  {} / {} documents\n",
                    format_number(*n),
                    format_number(*total)
                )
            }
            IngestProgressEvent::Storing { source, chunks } => {
                format!(
                    "ingest  storing  {} chunks for {}\n",
                    format_number(*chunks),
                    source
                )
            }
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl IngestProgressReporter for JsonProgress {
    fn report(&self, event: IngestProgressEvent) {
        let obj = match &event {
            IngestProgressEvent::Loading { file, label } => serde_json::json!({
                "event": "progress",
                "phase": "loading",
                "file": file,
                "label": label
            }),
            IngestProgressEvent::MissingFile { file } => serde_json::json!({
                "event": "progress",
                "phase": "missing_file",
                "file": file
            }),
            IngestProgressEvent::Chunking { n, total } => serde_json::json!({
                "event": "progress",
                "phase": "chunking",
                "n": n,
                "total": total
            }),
            IngestProgressEvent::Storing { source, chunks } => serde_json::json!({
                "event": "progress",
                "phase": "storing",
                "source": source,
                "chunks": chunks
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl IngestProgressReporter for NoProgress {
    fn report(&self, _event: IngestProgressEvent) {}
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}
