//! Indentation-aware text output for generated Go.

/// Options for the writer.
pub struct WriterOptions {
    /// Indentation string; gofmt uses a tab.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            indent_str: "\t".to_string(),
            new_line: "\n".to_string(),
        }
    }
}

/// Accumulates Go source text line by line.
pub struct GoWriter {
    output: String,
    indent_level: u32,
    options: WriterOptions,
}

impl GoWriter {
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    pub fn with_options(options: WriterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
        }
    }

    pub fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    /// Write one indented line. Empty lines carry no indentation.
    pub fn write_line(&mut self, s: &str) {
        if !s.is_empty() {
            self.write_indent();
            self.output.push_str(s);
        }
        self.write_newline();
    }

    /// Write every line of a multi-line block at the current indentation.
    pub fn write_block(&mut self, block: &str) {
        for line in block.lines() {
            self.write_line(line);
        }
    }

    pub fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl Default for GoWriter {
    fn default() -> Self {
        Self::new()
    }
}
