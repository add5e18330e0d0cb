/// Line terminator used while building output; the normalizer rewrites it
pub const NEWLINE: &str = "\r\n";

/// Indentation unit used while building output; the normalizer rewrites it
pub const INDENT: &str = "\t";

/// Text buffer with indentation tracking for generated definitions
#[derive(Debug, Default)]
pub struct DefinitionWriter {
    buffer: String,
    indent_level: usize,
}

impl DefinitionWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn add_line(&mut self, text: &str) {
        self.add_indented(text);
        self.newline();
    }

    pub fn add_indented(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(INDENT);
        }
        self.buffer.push_str(text);
    }

    pub fn newline(&mut self) {
        self.buffer.push_str(NEWLINE);
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_output(self) -> String {
        self.buffer
    }
}
