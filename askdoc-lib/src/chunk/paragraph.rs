use tracing::debug;

use crate::chunk::{Chunker, Segment};

/// Separator placed between paragraphs inside one segment
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Characters of overlap budget per carried word
const CHARS_PER_WORD: usize = 5;

/// Paragraph chunker - packs whole paragraphs into segments
///
/// Paragraphs are accumulated until the next one would push the buffer past
/// `target_size` characters. The closed buffer's trailing
/// `overlap / 5` words seed the next segment so context carries across the
/// boundary. Paragraphs are never split, so a single paragraph longer than
/// `target_size` becomes an oversized segment.
#[derive(Debug, Clone)]
pub struct ParagraphChunker {
    pub target_size: usize,
    pub overlap: usize,
}

impl ParagraphChunker {
    #[must_use]
    pub fn new(target_size: usize, overlap: usize) -> Self {
        Self { target_size, overlap }
    }

    fn carried_words(&self) -> usize {
        self.overlap / CHARS_PER_WORD
    }
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::new(800, 150)
    }
}

impl Chunker for ParagraphChunker {
    fn name(&self) -> &str {
        "paragraph"
    }

    fn chunk(&self, content: &str) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut buffer = String::new();
        let mut buffer_chars = 0;

        for p in Paragraphs::from(content) {
            let p_chars = p.chars().count();

            // close the segment if this paragraph would overflow it
            if buffer_chars > 0
                && buffer_chars + PARAGRAPH_SEPARATOR.len() + p_chars > self.target_size
            {
                let seed = trailing_words(&buffer, self.carried_words());
                push_segment(&mut segments, &buffer);
                buffer_chars = seed.chars().count();
                buffer = seed;
            }

            if buffer_chars > 0 {
                buffer.push_str(PARAGRAPH_SEPARATOR);
                buffer_chars += PARAGRAPH_SEPARATOR.len();
            }
            buffer.push_str(p);
            buffer_chars += p_chars;
        }

        // flush buffer segment
        if !buffer.trim().is_empty() {
            push_segment(&mut segments, &buffer);
        }

        debug!(segments = segments.len(), target = self.target_size, "chunked document");
        segments
    }
}

fn push_segment(segments: &mut Vec<Segment>, buffer: &str) {
    segments.push(Segment {
        index: segments.len(),
        text: buffer.trim().to_string(),
    });
}

/// Last `n` whitespace-delimited words of `text`, joined by single spaces
fn trailing_words(text: &str, n: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    words[words.len().saturating_sub(n)..].join(" ")
}

/// Iterator over the paragraphs of a text. Paragraphs are separated by one
/// or more blank (empty or whitespace-only) lines and yielded trimmed.
struct Paragraphs<'a> {
    s: &'a str,
}

impl<'a> Paragraphs<'a> {
    fn from(s: &'a str) -> Self {
        Self { s }
    }
}

impl<'a> Iterator for Paragraphs<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        // Find the start of the paragraph.
        let mut pos = loop {
            if self.s.is_empty() {
                return None;
            }
            let (line, rest) = split_first_line(self.s);
            if line.chars().all(char::is_whitespace) {
                // Discard blank line.
                self.s = rest;
            } else {
                break line.len();
            }
        };

        // Find the end of the paragraph.
        loop {
            let (line, rest) = split_first_line(&self.s[pos..]);
            if line.chars().all(char::is_whitespace) {
                let result = &self.s[..pos];
                self.s = rest;
                return Some(result.trim());
            }
            pos += line.len();
        }
    }
}

fn split_first_line(s: &str) -> (&str, &str) {
    let len = match s.find('\n') {
        Some(i) => i + 1,
        None => s.len(),
    };
    s.split_at(len)
}
