use std::io::Write;

use tempfile::NamedTempFile;

use super::instruction::InstructionBuilder;

/// Accumulates instructions and renders them as trace text.
#[derive(Clone, Debug, Default)]
pub struct TraceBuilder {
    lines: Vec<String>,
}

impl TraceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inst(mut self, inst: InstructionBuilder) -> Self {
        self.lines.push(inst.line());
        self
    }

    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// Writes the trace to a temporary file that lives as long as the handle.
    pub fn write_temp(&self) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(self.text().as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }
}
