//! Indented line writer.

const INDENT: &str = "    ";

/// Builds brace-delimited, four-space-indented text.
#[derive(Debug, Default)]
pub(super) struct Writer {
    out: String,
    depth: usize,
}

impl Writer {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Write each line of `text` at the current depth; blank lines stay blank.
    pub(super) fn lines(&mut self, text: &str) {
        for line in text.lines() {
            if line.trim().is_empty() {
                self.blank();
            } else {
                self.line(line);
            }
        }
    }

    pub(super) fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Write `header` and an opening brace, then indent.
    pub(super) fn open(&mut self, header: &str) {
        self.line(header);
        self.line("{");
        self.depth += 1;
    }

    pub(super) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    pub(super) fn close_all(&mut self) {
        while self.depth > 0 {
            self.close();
        }
    }

    pub(super) fn finish(self) -> String {
        self.out
    }
}
