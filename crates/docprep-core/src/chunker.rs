//! The full chunking engine: validate → segment → assemble → annotate.
//!
//! This is the one entry point the ingestion layer calls per document.
//! It is pure and synchronous; concurrency, batching, and storage live
//! with the caller.

use crate::annotate;
use crate::assemble::{self, ChunkerConfig};
use crate::error::DocumentError;
use crate::models::{Chunk, Document};
use crate::segment;

/// Chunk one document.
///
/// A missing or empty `content` or `title` is a [`DocumentError`] the
/// batch coordinator recovers from by skipping the document. A valid
/// document whose content is whitespace-only yields `Ok` with zero
/// chunks and must simply not be forwarded to the store.
pub fn chunk_document(doc: &Document, config: &ChunkerConfig) -> Result<Vec<Chunk>, DocumentError> {
    validate(doc)?;
    let segments = segment::segment(&doc.content);
    let contents = assemble::assemble(&segments, config);
    Ok(annotate::annotate(contents, doc))
}

fn validate(doc: &Document) -> Result<(), DocumentError> {
    if doc.content.is_empty() {
        return Err(DocumentError::MissingField("content"));
    }
    if doc.title.trim().is_empty() {
        return Err(DocumentError::MissingField("title"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> Document {
        Document {
            content: content.to_string(),
            title: "T".to_string(),
            source: "python".to_string(),
            url: "u1".to_string(),
            doc_type: "general".to_string(),
            scraped_at: String::new(),
        }
    }

    fn config(max_chars: usize, overlap_chars: usize) -> ChunkerConfig {
        ChunkerConfig::new(max_chars, overlap_chars).unwrap()
    }

    #[test]
    fn test_empty_content_is_invalid() {
        let err = chunk_document(&doc(""), &config(200, 20)).unwrap_err();
        assert_eq!(err, DocumentError::MissingField("content"));
    }

    #[test]
    fn test_blank_title_is_invalid() {
        let mut d = doc("some content");
        d.title = "   ".to_string();
        let err = chunk_document(&d, &config(200, 20)).unwrap_err();
        assert_eq!(err, DocumentError::MissingField("title"));
    }

    #[test]
    fn test_whitespace_content_yields_zero_chunks() {
        let chunks = chunk_document(&doc(" \n\n \n"), &config(200, 20)).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_document_is_one_chunk() {
        let chunks = chunk_document(&doc("Hello world."), &config(200, 20)).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "Hello world.");
        assert_eq!(chunks[0].metadata.total_chunks, 1);
    }

    #[test]
    fn test_intro_scenario_multiple_chunks() {
        // "# Intro\n\nHello world. " followed by 500 repetitions of "word ".
        let content = format!("# Intro\n\nHello world. {}", "word ".repeat(500));
        let d = doc(&content);
        let chunks = chunk_document(&d, &config(200, 20)).unwrap();

        assert!(chunks.len() > 1);
        assert!(chunks[0].content.starts_with("# Intro"));
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.chunk_index, i);
            assert_eq!(chunk.metadata.total_chunks, chunks.len());
        }

        let rerun = chunk_document(&d, &config(200, 20)).unwrap();
        assert_eq!(rerun.len(), chunks.len());
        for (a, b) in chunks.iter().zip(rerun.iter()) {
            assert_eq!(a.metadata.id, b.metadata.id);
            assert_eq!(a.content, b.content);
        }
    }

    #[test]
    fn test_reconstruction_without_overlap() {
        let content = "# One\n\npara one text\n\n- a\n- b\n\n```\ncode\n```\n\nlast paragraph";
        let chunks = chunk_document(&doc(content), &config(24, 0)).unwrap();
        assert!(chunks.len() > 1);
        let rejoined: String = chunks.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(rejoined, content);
    }

    #[test]
    fn test_overlap_stripping_reconstructs_content() {
        let content: String = (0..30)
            .map(|i| format!("paragraph number {i:02} content\n\n"))
            .collect();
        let cfg = config(120, 30);
        let chunks = chunk_document(&doc(&content), &cfg).unwrap();
        assert!(chunks.len() > 2);

        // Each chunk after the first either repeats the tail of its
        // predecessor (strip it) or starts fresh where overlap was
        // omitted at that boundary.
        let mut rebuilt = chunks[0].content.clone();
        for pair in chunks.windows(2) {
            let (prev, next) = (&pair[0].content, &pair[1].content);
            let mut stripped = next.as_str();
            for window in (1..=cfg.overlap_chars().min(next.len())).rev() {
                if next.is_char_boundary(window) && prev.ends_with(&next[..window]) {
                    stripped = &next[window..];
                    break;
                }
            }
            rebuilt.push_str(stripped);
        }
        assert_eq!(rebuilt, content);
    }

    #[test]
    fn test_budget_respected_or_single_oversized_segment() {
        let big_code = format!("```\n{}\n```", "let line = 0;\n".repeat(40));
        let content = format!("# API\n\nshort intro\n\n{big_code}\n\ntail text");
        let cfg = config(100, 10);
        let chunks = chunk_document(&doc(&content), &cfg).unwrap();
        for chunk in &chunks {
            assert!(
                chunk.content.len() <= cfg.max_chars() || chunk.content.contains("let line = 0;"),
                "chunk over budget without being the code block: {:?}",
                chunk.content
            );
        }
    }

    #[test]
    fn test_every_content_byte_lands_in_some_chunk() {
        let content = "# H\n\nalpha beta gamma\n\n```\nx = 1\n```\n\n- item one\n- item two\n";
        let chunks = chunk_document(&doc(content), &config(30, 8)).unwrap();
        let all: String = chunks.iter().map(|c| c.content.as_str()).collect();
        // With overlap, bytes may appear twice, but none may disappear.
        for piece in ["alpha beta gamma", "x = 1", "- item one", "- item two", "# H"] {
            assert!(all.contains(piece), "missing {piece:?}");
        }
    }
}
