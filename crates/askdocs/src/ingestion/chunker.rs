//! Recursive character splitting with offset tracking
//!
//! Splits on paragraph breaks first, then line breaks, then spaces, then a
//! hard character cut, so chunk boundaries respect natural text structure
//! when the text allows it. Adjacent chunks overlap so a sentence spanning
//! a split point appears whole in at least one chunk.

use std::collections::VecDeque;

use crate::types::{Chunk, Document};

/// Separator cascade, tried in order. The empty string always matches and
/// degrades to a per-character cut.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// Text chunker with configurable size and overlap
pub struct TextChunker {
    /// Target chunk size in bytes
    chunk_size: usize,
    /// Overlap between adjacent chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
        }
    }

    /// Chunk a document, carrying its source metadata onto every chunk
    pub fn chunk_document(&self, doc: &Document) -> Vec<Chunk> {
        self.split_text(&doc.text)
            .into_iter()
            .map(|(start, end)| Chunk {
                text: doc.text[start..end].to_string(),
                source_path: doc.source_path.clone(),
                page_number: doc.page_number,
                char_start: start,
                char_end: end,
            })
            .collect()
    }

    /// Split text into byte ranges, each within the target size where the
    /// separator cascade allows, adjacent ranges sharing the configured
    /// overlap. Ranges are exact substrings of the input, so the same input
    /// always yields the same ranges.
    pub fn split_text(&self, text: &str) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        self.split_range(text, 0, text.len(), &SEPARATORS, &mut ranges);
        ranges.retain(|&(s, e)| !text[s..e].trim().is_empty());
        ranges
    }

    fn split_range(
        &self,
        text: &str,
        start: usize,
        end: usize,
        separators: &[&str],
        out: &mut Vec<(usize, usize)>,
    ) {
        let slice = &text[start..end];
        if slice.is_empty() {
            return;
        }
        if slice.len() <= self.chunk_size {
            out.push((start, end));
            return;
        }

        // First separator that occurs in this slice; "" always does.
        let sep_idx = separators
            .iter()
            .position(|sep| slice.contains(sep))
            .unwrap_or(separators.len() - 1);
        let sep = separators[sep_idx];
        let rest = &separators[sep_idx + 1..];

        // Each piece keeps its trailing separator, so pieces are contiguous
        // and concatenation reconstructs the slice.
        let mut run: VecDeque<(usize, usize)> = VecDeque::new();
        let mut run_len = 0usize;

        for (ps, pe) in split_pieces(slice, sep) {
            let (abs_start, abs_end) = (start + ps, start + pe);
            let piece_len = pe - ps;

            if piece_len > self.chunk_size {
                // Oversized piece: flush the current run, then descend with
                // the finer separators (or emit as-is when none remain).
                flush_run(&mut run, &mut run_len, out);
                if rest.is_empty() {
                    out.push((abs_start, abs_end));
                } else {
                    self.split_range(text, abs_start, abs_end, rest, out);
                }
                continue;
            }

            if run_len + piece_len > self.chunk_size && !run.is_empty() {
                out.push((run.front().unwrap().0, run.back().unwrap().1));
                self.shrink_to_overlap(&mut run, &mut run_len, piece_len);
            }

            run.push_back((abs_start, abs_end));
            run_len += piece_len;
        }

        flush_run(&mut run, &mut run_len, out);
    }

    /// After emitting a chunk, drop leading pieces until the retained
    /// suffix is the smallest one still covering the overlap, popping
    /// further only when the incoming piece would not fit otherwise.
    fn shrink_to_overlap(
        &self,
        run: &mut VecDeque<(usize, usize)>,
        run_len: &mut usize,
        incoming_len: usize,
    ) {
        while let Some(&(fs, fe)) = run.front() {
            let front_len = fe - fs;
            let keeps_overlap = *run_len - front_len >= self.overlap;
            let needs_room = *run_len + incoming_len > self.chunk_size;
            if keeps_overlap || needs_room {
                *run_len -= front_len;
                run.pop_front();
            } else {
                break;
            }
        }
    }
}

/// Emit whatever remains in the run as a final chunk
fn flush_run(
    run: &mut VecDeque<(usize, usize)>,
    run_len: &mut usize,
    out: &mut Vec<(usize, usize)>,
) {
    if let (Some(&(s, _)), Some(&(_, e))) = (run.front(), run.back()) {
        out.push((s, e));
    }
    run.clear();
    *run_len = 0;
}

/// Split a slice into (start, end) pieces on `sep`, each piece retaining
/// its trailing separator. An empty separator splits per character.
fn split_pieces(slice: &str, sep: &str) -> Vec<(usize, usize)> {
    if sep.is_empty() {
        return slice
            .char_indices()
            .map(|(i, c)| (i, i + c.len_utf8()))
            .collect();
    }

    let mut pieces = Vec::new();
    let mut prev = 0;
    for (idx, _) in slice.match_indices(sep) {
        pieces.push((prev, idx + sep.len()));
        prev = idx + sep.len();
    }
    if prev < slice.len() {
        pieces.push((prev, slice.len()));
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (0..n)
            .map(|i| format!("word{:04}", i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunker = TextChunker::new(800, 120);
        let ranges = chunker.split_text("a short note");
        assert_eq!(ranges, vec![(0, 12)]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let chunker = TextChunker::new(800, 120);
        assert!(chunker.split_text("").is_empty());
        assert!(chunker.split_text("   \n\n  ").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let chunker = TextChunker::new(100, 20);
        let text = words(200);
        let first = chunker.split_text(&text);
        let second = chunker.split_text(&text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_chunks_respect_size_bound() {
        let chunker = TextChunker::new(100, 20);
        let text = words(200);
        for (start, end) in chunker.split_text(&text) {
            assert!(end - start <= 100, "chunk {}..{} exceeds size", start, end);
        }
    }

    #[test]
    fn test_chunks_are_exact_substrings() {
        let chunker = TextChunker::new(100, 20);
        let text = words(200);
        let doc = Document::text(text.clone(), "notes.txt");
        for chunk in chunker.chunk_document(&doc) {
            assert_eq!(chunk.text, &text[chunk.char_start..chunk.char_end]);
        }
    }

    #[test]
    fn test_adjacent_chunks_overlap() {
        let chunker = TextChunker::new(100, 20);
        let text = words(200);
        let ranges = chunker.split_text(&text);
        assert!(ranges.len() > 1, "text should require splitting");
        for pair in ranges.windows(2) {
            let (_, prev_end) = pair[0];
            let (next_start, _) = pair[1];
            assert!(
                prev_end >= next_start + 20,
                "chunks {:?} and {:?} share less than the overlap",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_prefers_paragraph_boundaries() {
        let para = "x".repeat(90);
        let text = format!("{}\n\n{}\n\n{}", para, para, para);
        let chunker = TextChunker::new(100, 0);
        let ranges = chunker.split_text(&text);
        assert_eq!(ranges.len(), 3);
        // Every chunk starts at a paragraph start
        for &(start, _) in &ranges {
            assert!(start == 0 || text[..start].ends_with("\n\n"));
        }
    }

    #[test]
    fn test_falls_back_to_word_boundaries() {
        // One long paragraph with no line breaks forces the space separator
        let text = words(40); // ~360 bytes, no \n
        let chunker = TextChunker::new(100, 20);
        let ranges = chunker.split_text(&text);
        assert!(ranges.len() > 1);
        for &(start, _) in &ranges {
            // Chunks begin at the start of a word, never mid-word
            assert!(start == 0 || text.as_bytes()[start - 1] == b' ');
        }
    }

    #[test]
    fn test_hard_cut_on_unbroken_text() {
        let text = "z".repeat(350);
        let chunker = TextChunker::new(100, 10);
        let ranges = chunker.split_text(&text);
        assert!(ranges.len() >= 4);
        for (start, end) in ranges {
            assert!(end - start <= 100);
        }
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let text = "é".repeat(300); // 2 bytes per char, no separators
        let chunker = TextChunker::new(101, 10);
        let doc = Document::text(text, "unicode.txt");
        // Would panic on a non-boundary slice if offsets were wrong
        let chunks = chunker.chunk_document(&doc);
        assert!(!chunks.is_empty());
    }

    #[test]
    fn test_page_metadata_carried_onto_chunks() {
        let chunker = TextChunker::new(50, 10);
        let doc = Document::pdf_page(words(30), "report.pdf", 3);
        for chunk in chunker.chunk_document(&doc) {
            assert_eq!(chunk.source_path, "report.pdf");
            assert_eq!(chunk.page_number, Some(3));
        }
    }
}
