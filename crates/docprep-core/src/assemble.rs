//! Greedy chunk assembly.
//!
//! Packs consecutive [`Segment`]s into chunk content strings under a
//! byte-size budget, seeding each new chunk with the tail of the one
//! before it so local context survives the boundary.
//!
//! # Algorithm
//!
//! 1. Accumulate segments into a buffer while the buffer stays within
//!    `max_chars`; a segment that exactly fills the budget is included.
//! 2. When the next segment would overflow, close the buffer as a chunk
//!    and start a new one seeded with the last `overlap_chars` bytes of
//!    the closed chunk (snapped to a UTF-8 boundary).
//! 3. A seed that would consist solely of a trailing heading is dropped,
//!    as is a seed that leaves no room for the incoming segment.
//! 4. A single segment larger than `max_chars` becomes its own oversized
//!    chunk — never split, never truncated.

use crate::error::ConfigError;
use crate::models::{Segment, SegmentKind};

/// Size budget and overlap parameters for chunk assembly.
///
/// Validated on construction and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkerConfig {
    max_chars: usize,
    overlap_chars: usize,
}

impl ChunkerConfig {
    /// Build a config, rejecting `max_chars == 0` and
    /// `overlap_chars >= max_chars` up front.
    pub fn new(max_chars: usize, overlap_chars: usize) -> Result<Self, ConfigError> {
        if max_chars == 0 {
            return Err(ConfigError::ZeroMaxChars);
        }
        if overlap_chars >= max_chars {
            return Err(ConfigError::OverlapTooLarge {
                overlap_chars,
                max_chars,
            });
        }
        Ok(Self {
            max_chars,
            overlap_chars,
        })
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn overlap_chars(&self) -> usize {
        self.overlap_chars
    }
}

/// Pack `segments` into ordered chunk content strings.
///
/// Non-empty input yields at least one chunk; empty input yields none.
/// Every chunk either fits `max_chars` or holds exactly one oversized
/// segment.
pub fn assemble(segments: &[Segment], config: &ChunkerConfig) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    // Current chunk under construction. May start with an overlap seed.
    let mut buf = String::new();
    // Whether `buf` holds at least one full segment (a bare seed must
    // never be emitted as a chunk of its own).
    let mut has_segment = false;
    let mut tail_kind = SegmentKind::Other;
    let mut tail_len = 0usize;

    for seg in segments {
        let fits = buf.len() + seg.text.len() <= config.max_chars;
        if has_segment && !fits {
            let seed = overlap_seed(&buf, tail_kind, tail_len, config.overlap_chars);
            chunks.push(std::mem::replace(&mut buf, seed));
            has_segment = false;
        }
        if !has_segment && buf.len() + seg.text.len() > config.max_chars {
            // Seed leaves no room for the segment itself: drop it rather
            // than emit a chunk of duplicated text.
            buf.clear();
        }
        buf.push_str(&seg.text);
        has_segment = true;
        tail_kind = seg.kind;
        tail_len = seg.text.len();
    }

    if has_segment {
        chunks.push(buf);
    }
    chunks
}

/// The tail of a closed chunk, reused as context at the start of the
/// next one. Returns an empty string when overlap is disabled or the
/// window would consist solely of a trailing heading.
fn overlap_seed(
    content: &str,
    tail_kind: SegmentKind,
    tail_len: usize,
    overlap_chars: usize,
) -> String {
    if overlap_chars == 0 || content.is_empty() {
        return String::new();
    }
    let mut start = content.len().saturating_sub(overlap_chars);
    while start < content.len() && !content.is_char_boundary(start) {
        start += 1;
    }
    let window = &content[start..];
    if window.is_empty() {
        return String::new();
    }
    if tail_kind == SegmentKind::Heading && window.len() <= tail_len {
        return String::new();
    }
    window.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str, kind: SegmentKind) -> Segment {
        Segment {
            text: text.to_string(),
            kind,
            order: 0,
        }
    }

    fn paragraphs(texts: &[&str]) -> Vec<Segment> {
        texts
            .iter()
            .enumerate()
            .map(|(order, text)| Segment {
                text: text.to_string(),
                kind: SegmentKind::Paragraph,
                order,
            })
            .collect()
    }

    #[test]
    fn test_config_rejects_zero_budget() {
        assert_eq!(ChunkerConfig::new(0, 0), Err(ConfigError::ZeroMaxChars));
    }

    #[test]
    fn test_config_rejects_overlap_not_below_budget() {
        assert!(matches!(
            ChunkerConfig::new(100, 100),
            Err(ConfigError::OverlapTooLarge { .. })
        ));
        assert!(matches!(
            ChunkerConfig::new(100, 150),
            Err(ConfigError::OverlapTooLarge { .. })
        ));
        assert!(ChunkerConfig::new(100, 99).is_ok());
    }

    #[test]
    fn test_empty_input_yields_no_chunks() {
        let config = ChunkerConfig::new(100, 10).unwrap();
        assert!(assemble(&[], &config).is_empty());
    }

    #[test]
    fn test_small_segments_share_one_chunk() {
        let config = ChunkerConfig::new(100, 10).unwrap();
        let segments = paragraphs(&["one\n\n", "two\n\n", "three"]);
        let chunks = assemble(&segments, &config);
        assert_eq!(chunks, vec!["one\n\ntwo\n\nthree".to_string()]);
    }

    #[test]
    fn test_budget_closes_chunk() {
        let config = ChunkerConfig::new(10, 0).unwrap();
        let segments = paragraphs(&["aaaa\n\n", "bbbb\n\n", "ccccc"]);
        let chunks = assemble(&segments, &config);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0], "aaaa\n\n");
        assert_eq!(chunks[2], "ccccc");
    }

    #[test]
    fn test_exact_fit_is_included() {
        // 4 + 6 == budget: the second segment must land in the first chunk.
        let config = ChunkerConfig::new(10, 0).unwrap();
        let segments = paragraphs(&["aaaa", "bbbbbb", "cc"]);
        let chunks = assemble(&segments, &config);
        assert_eq!(chunks[0], "aaaabbbbbb");
        assert_eq!(chunks[1], "cc");
    }

    #[test]
    fn test_overlap_seeds_next_chunk() {
        let config = ChunkerConfig::new(12, 4).unwrap();
        let segments = paragraphs(&["abcdefgh\n\n", "next one"]);
        let chunks = assemble(&segments, &config);
        assert_eq!(chunks.len(), 2);
        // Seed is the last 4 bytes of the first chunk.
        assert_eq!(chunks[1], "gh\n\nnext one");
    }

    #[test]
    fn test_oversized_segment_emitted_whole() {
        let config = ChunkerConfig::new(10, 2).unwrap();
        let big = "x".repeat(40);
        let segments = vec![
            seg("tiny\n\n", SegmentKind::Paragraph),
            seg(&big, SegmentKind::Code),
            seg("after", SegmentKind::Paragraph),
        ];
        let chunks = assemble(&segments, &config);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1], big);
        // The oversized chunk still seeds the one after it.
        assert!(chunks[2].starts_with("xx"));
        assert!(chunks[2].ends_with("after"));
    }

    #[test]
    fn test_oversized_segment_alone_is_single_chunk() {
        let config = ChunkerConfig::new(10, 2).unwrap();
        let big = "y".repeat(25);
        let chunks = assemble(&[seg(&big, SegmentKind::Paragraph)], &config);
        assert_eq!(chunks, vec![big]);
    }

    #[test]
    fn test_heading_tail_is_not_used_as_seed() {
        let config = ChunkerConfig::new(20, 7).unwrap();
        let segments = vec![
            seg("body text..\n\n", SegmentKind::Paragraph),
            seg("# Next\n", SegmentKind::Heading),
            seg("a paragraph that overflows", SegmentKind::Paragraph),
        ];
        let chunks = assemble(&segments, &config);
        assert_eq!(chunks.len(), 2);
        // The 7-byte window falls entirely inside "# Next\n", so no seed.
        assert_eq!(chunks[1], "a paragraph that overflows");
    }

    #[test]
    fn test_seed_spanning_past_heading_is_kept() {
        let config = ChunkerConfig::new(20, 12).unwrap();
        let segments = vec![
            seg("body textldr\n\n", SegmentKind::Paragraph),
            seg("# Nx\n", SegmentKind::Heading),
            seg("overflow", SegmentKind::Paragraph),
        ];
        let chunks = assemble(&segments, &config);
        assert_eq!(chunks.len(), 2);
        // Window covers more than the heading, so it survives as a seed.
        assert!(chunks[1].starts_with("xtldr"));
        assert!(chunks[1].contains("# Nx\n"));
        assert!(chunks[1].ends_with("overflow"));
    }

    #[test]
    fn test_seed_dropped_when_it_leaves_no_room() {
        let config = ChunkerConfig::new(10, 6).unwrap();
        let segments = paragraphs(&["aaaaaaaa", "bbbbbbbb"]);
        let chunks = assemble(&segments, &config);
        assert_eq!(chunks.len(), 2);
        // 6-byte seed + 8-byte segment would bust the budget; the seed
        // goes, the segment stays whole.
        assert_eq!(chunks[1], "bbbbbbbb");
    }

    #[test]
    fn test_overlap_snaps_to_char_boundary() {
        let config = ChunkerConfig::new(12, 4).unwrap();
        // 4 × 3-byte characters, then an overflow trigger.
        let segments = vec![
            seg("日本語文", SegmentKind::Paragraph),
            seg("overflow", SegmentKind::Paragraph),
        ];
        let chunks = assemble(&segments, &config);
        // A naive 4-byte window would split 文; the seed snaps forward to
        // the boundary instead.
        assert_eq!(chunks, vec!["日本語文".to_string(), "文overflow".to_string()]);
    }

    #[test]
    fn test_budget_holds_or_chunk_is_single_oversized_segment() {
        let config = ChunkerConfig::new(15, 5).unwrap();
        let big = "z".repeat(60);
        let segments = vec![
            seg("alpha beta\n\n", SegmentKind::Paragraph),
            seg("gamma delta\n\n", SegmentKind::Paragraph),
            seg(&big, SegmentKind::Code),
            seg("tail words here", SegmentKind::Paragraph),
        ];
        for chunk in assemble(&segments, &config) {
            assert!(chunk.len() <= 15 || chunk == big);
        }
    }

    #[test]
    fn test_zero_overlap_concatenation_reconstructs_input() {
        let config = ChunkerConfig::new(10, 0).unwrap();
        let segments = paragraphs(&["aaaa\n\n", "bbbbbbbb\n\n", "cc\n\n", "dddddddddddddd"]);
        let chunks = assemble(&segments, &config);
        let rejoined: String = chunks.concat();
        let original: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rejoined, original);
    }
}
