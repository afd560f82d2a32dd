//! Whitespace tokenizer for completed lines.

use tracing::trace;

/// Default maximum number of tokens kept from one line.
pub const MAX_TOKENS: usize = 512;

/// Default maximum number of bytes of a line that are tokenized.
pub const MAX_LINE_LEN: usize = 512;

/// Splits lines into tokens on runs of space, tab, CR and LF.
///
/// Both limits truncate: bytes past `max_line_len` are ignored (cut back to
/// a character boundary), and tokens past `max_tokens` are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    max_tokens: usize,
    max_line_len: usize,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(MAX_TOKENS, MAX_LINE_LEN)
    }
}

impl Tokenizer {
    /// Creates a tokenizer with the given limits.
    pub const fn new(max_tokens: usize, max_line_len: usize) -> Self {
        Self {
            max_tokens,
            max_line_len,
        }
    }

    /// Maximum number of tokens returned.
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Maximum number of bytes considered.
    pub fn max_line_len(&self) -> usize {
        self.max_line_len
    }

    /// Tokenizes `line`. Blank input yields no tokens.
    pub fn tokenize<'l>(&self, line: &'l str) -> Vec<&'l str> {
        let text = truncate(line, self.max_line_len);
        if text.len() < line.len() {
            trace!(
                len = line.len(),
                max = self.max_line_len,
                "line truncated before tokenizing"
            );
        }

        let mut tokens = Vec::with_capacity(self.max_tokens.min(text.len() / 2 + 1));
        for token in text.split(is_separator).filter(|t| !t.is_empty()) {
            if tokens.len() == self.max_tokens {
                trace!(max = self.max_tokens, "token limit reached, rest dropped");
                break;
            }
            tokens.push(token);
        }
        tokens
    }
}

/// Tokenizes `line` with the default limits.
pub fn tokenize(line: &str) -> Vec<&str> {
    Tokenizer::default().tokenize(line)
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn truncate(line: &str, max: usize) -> &str {
    if line.len() <= max {
        return line;
    }
    let mut end = max;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    &line[..end]
}
