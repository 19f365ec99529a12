use crate::constants::{OUTPUT_MAX_CHARS, OUTPUT_RETAIN_CHARS};

/// Text buffer that renders avrdude's output the way a terminal would.
///
/// A carriage return drops everything after the last newline so progress
/// bars rewrite their line in place. Once the buffer grows past `max_chars`
/// it keeps only the trailing `retain_chars` characters.
///
/// Not synchronised, feed it from a single consumer.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    text: String,
    chars: usize,
    max_chars: usize,
    retain_chars: usize,
    completed_lines: u64,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::with_limits(OUTPUT_MAX_CHARS, OUTPUT_RETAIN_CHARS)
    }
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(max_chars: usize, retain_chars: usize) -> Self {
        OutputBuffer {
            text: String::new(),
            chars: 0,
            max_chars,
            retain_chars: retain_chars.min(max_chars),
            completed_lines: 0,
        }
    }

    pub fn append(&mut self, fragment: &str) {
        let mut iter = fragment.chars().peekable();

        while let Some(c) = iter.next() {
            match c {
                // CRLF is a plain line ending
                '\r' if iter.peek() == Some(&'\n') => {}
                '\r' => self.rewind_line(),
                '\n' => {
                    self.push(c);
                    self.completed_lines += 1;
                }
                _ => self.push(c),
            }
        }

        if self.chars > self.max_chars {
            self.truncate_front();
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len_chars(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of newlines ever appended, including truncated ones
    pub fn completed_lines(&self) -> u64 {
        self.completed_lines
    }

    /// The line still being written, i.e. everything after the last newline
    pub fn pending_line(&self) -> &str {
        &self.text[self.line_start()..]
    }

    /// Up to `count` of the most recent finished lines still retained, oldest first
    pub fn last_completed_lines(&self, count: usize) -> Vec<&str> {
        let completed = &self.text[..self.line_start()];
        let mut lines: Vec<&str> = completed.lines().rev().take(count).collect();
        lines.reverse();
        lines
    }

    fn push(&mut self, c: char) {
        self.text.push(c);
        self.chars += 1;
    }

    fn line_start(&self) -> usize {
        self.text.rfind('\n').map_or(0, |i| i + 1)
    }

    fn rewind_line(&mut self) {
        let start = self.line_start();
        self.chars -= self.text[start..].chars().count();
        self.text.truncate(start);
    }

    fn truncate_front(&mut self) {
        let drop = self.chars - self.retain_chars;
        let cut = self
            .text
            .char_indices()
            .nth(drop)
            .map_or(self.text.len(), |(i, _)| i);

        self.text.drain(..cut);
        self.chars = self.retain_chars;
    }
}
