//! Collection statistics and ingestion summaries.
//!
//! Provides a quick summary of what's indexed: chunk totals and
//! per-source breakdowns, plus a rendering of the batch report. Used
//! after an ingestion run to give confidence that chunking and upserts
//! worked as expected.

use anyhow::Result;

use docprep_core::store::{CollectionStats, VectorStore};

use crate::ingest::IngestReport;

/// Render an ingestion report as a human-readable block.
pub fn ingest_summary(report: &IngestReport) -> String {
    let mut out = String::new();
    out.push_str("ingest\n");
    out.push_str(&format!(
        "  documents processed: {}\n",
        report.documents_processed
    ));
    out.push_str(&format!(
        "  documents skipped: {}\n",
        report.documents_skipped()
    ));
    out.push_str(&format!("  documents empty: {}\n", report.documents_empty));
    out.push_str(&format!("  chunks added: {}\n", report.chunks_added));
    if !report.chunks_by_source.is_empty() {
        out.push_str("  by source:\n");
        for (source, count) in &report.chunks_by_source {
            out.push_str(&format!("    {}: {} chunks\n", source, count));
        }
    }
    for failure in &report.failures {
        out.push_str(&format!(
            "  skipped `{}` ({}): {}\n",
            failure.title, failure.url, failure.reason
        ));
    }
    out.push_str(&format!(
        "  finished at: {}\n",
        report.finished_at.format("%Y-%m-%dT%H:%M:%SZ")
    ));
    out
}

/// Render collection statistics as a summary table.
pub fn collection_summary(stats: &CollectionStats) -> String {
    let mut out = String::new();
    out.push_str("Docprep — Collection Stats\n");
    out.push_str("==========================\n\n");
    out.push_str(&format!("  Total chunks: {}\n", stats.total_chunks));

    if !stats.sources.is_empty() {
        out.push_str("\n  By source:\n");
        out.push_str(&format!("  {:<24} {:>8}\n", "SOURCE", "CHUNKS"));
        out.push_str(&format!("  {}\n", "-".repeat(34)));

        let mut sources: Vec<_> = stats.sources.iter().collect();
        sources.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (source, count) in sources {
            out.push_str(&format!("  {:<24} {:>8}\n", source, count));
        }
    }
    out
}

/// Query the store and print its collection summary.
pub async fn run_stats(store: &dyn VectorStore) -> Result<()> {
    let stats = store.get_collection_stats().await?;
    println!("{}", collection_summary(&stats));
    Ok(())
}
