//! Recursive character splitter.
//!
//! Text is split on the coarsest separator present (`"\n\n"`, `"\n"`, `" "`, then
//! per character), pieces are merged greedily up to `chunk_size` characters, and
//! each chunk starts with up to `chunk_overlap` characters carried over from the
//! previous one. Lengths are counted in chars, not bytes.

use std::collections::VecDeque;

use super::loader::Document;

const SEPARATORS: [&str; 4] = ["\n\n", "\n", " ", ""];

/// A bounded slice of a corpus document; the unit of retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub text: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy)]
pub struct TextSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl TextSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            chunk_overlap: chunk_overlap.min(chunk_size - 1),
        }
    }

    /// Splits every document, tagging chunks with the document's source.
    pub fn split_documents(&self, docs: &[Document]) -> Vec<Chunk> {
        docs.iter()
            .flat_map(|doc| {
                self.split_text(&doc.text)
                    .into_iter()
                    .map(|text| Chunk {
                        text,
                        source: doc.source.clone(),
                    })
            })
            .collect()
    }

    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &SEPARATORS)
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // First separator present in the text; "" always matches.
        let position = separators
            .iter()
            .position(|s| s.is_empty() || text.contains(s))
            .unwrap_or(separators.len() - 1);
        let separator = separators[position];
        let finer = &separators[position + 1..];

        let pieces: Vec<String> = if separator.is_empty() {
            text.chars().map(String::from).collect()
        } else {
            text.split(separator)
                .filter(|p| !p.is_empty())
                .map(String::from)
                .collect()
        };

        let mut out = Vec::new();
        let mut small: Vec<String> = Vec::new();
        for piece in pieces {
            if char_len(&piece) < self.chunk_size {
                small.push(piece);
                continue;
            }
            if !small.is_empty() {
                out.extend(self.merge(&small, separator));
                small.clear();
            }
            if finer.is_empty() {
                out.push(piece);
            } else {
                out.extend(self.split_recursive(&piece, finer));
            }
        }
        if !small.is_empty() {
            out.extend(self.merge(&small, separator));
        }
        out
    }

    /// Greedily packs pieces into chunks, keeping a tail of at most
    /// `chunk_overlap` chars as the head of the next chunk.
    fn merge(&self, pieces: &[String], separator: &str) -> Vec<String> {
        let sep_len = char_len(separator);
        let mut chunks = Vec::new();
        let mut window: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = char_len(piece);
            let joined_len = |window: &VecDeque<&str>, total: usize| {
                total + len + if window.is_empty() { 0 } else { sep_len }
            };

            if joined_len(&window, total) > self.chunk_size && !window.is_empty() {
                push_joined(&mut chunks, &window, separator);
                while total > self.chunk_overlap
                    || (joined_len(&window, total) > self.chunk_size && total > 0)
                {
                    let Some(front) = window.pop_front() else {
                        break;
                    };
                    total -= char_len(front) + if window.is_empty() { 0 } else { sep_len };
                }
            }

            if !window.is_empty() {
                total += sep_len;
            }
            window.push_back(piece);
            total += len;
        }
        push_joined(&mut chunks, &window, separator);
        chunks
    }
}

fn push_joined(chunks: &mut Vec<String>, window: &VecDeque<&str>, separator: &str) {
    let joined = window.iter().copied().collect::<Vec<_>>().join(separator);
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        chunks.push(trimmed.to_string());
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
