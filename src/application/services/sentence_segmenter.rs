use std::sync::LazyLock;

use regex::Regex;

// Terminal punctuation followed by a run of whitespace. The whitespace run
// belongs to the sentence it closes.
static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.?!]\s+").unwrap());

/// A completed sentence as it appeared in the generated text, including the
/// whitespace that closed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    raw: String,
}

impl Sentence {
    fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Trimmed text, suitable for synthesis.
    pub fn text(&self) -> &str {
        self.raw.trim()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_blank(&self) -> bool {
        self.text().is_empty()
    }
}

/// Incremental sentence boundary detector for one turn.
///
/// Greedy and punctuation-only: `"Dr. Smith"` splits after `"Dr."`. The
/// buffer always holds exactly the generated text not yet part of an emitted
/// sentence.
#[derive(Debug, Default)]
pub struct SentenceSegmenter {
    buffer: String,
}

impl SentenceSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `fragment` and returns every sentence it completed, in order.
    pub fn feed(&mut self, fragment: &str) -> Vec<Sentence> {
        if fragment.is_empty() {
            return Vec::new();
        }
        self.buffer.push_str(fragment);

        let mut sentences = Vec::new();
        let mut start = 0;
        for boundary in SENTENCE_BOUNDARY.find_iter(&self.buffer) {
            let sentence = Sentence::new(&self.buffer[start..boundary.end()]);
            start = boundary.end();
            if !sentence.is_blank() {
                sentences.push(sentence);
            }
        }

        if start > 0 {
            self.buffer.drain(..start);
        }

        sentences
    }

    /// Text received but not yet part of a completed sentence.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    /// Ends the stream: the residual buffer becomes the last sentence unless blank.
    pub fn flush(&mut self) -> Option<Sentence> {
        let rest = Sentence::new(std::mem::take(&mut self.buffer));
        (!rest.is_blank()).then_some(rest)
    }
}
