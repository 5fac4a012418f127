//! C# code emitter - builds C# source text with consistent indentation
//!
//! Blocks use Allman braces (opening brace on its own line), matching the layout of hand-written test files.

use std::fmt::Write;

/// A buffer for building C# source code with proper indentation
#[derive(Debug)]
pub struct CodeEmitter {
    buffer: String,
    indent_level: usize,
    indent_str: &'static str,
}

impl Default for CodeEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeEmitter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: "    ",
        }
    }

    /// Get the generated code
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Get current buffer as string slice
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Write a line with current indentation
    pub fn line(&mut self, s: &str) {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a formatted line with current indentation
    pub fn linef(&mut self, args: std::fmt::Arguments<'_>) {
        self.write_indent();
        let _ = self.buffer.write_fmt(args);
        self.buffer.push('\n');
    }

    /// Write a blank line
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent_str);
        }
    }

    /// Increase indent level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write `header`, then a braced, indented block
    pub fn block<F>(&mut self, header: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.line(header);
        self.line("{");
        self.indent();
        f(self);
        self.dedent();
        self.line("}");
    }

    /// Write an attribute line: `[Name]`
    pub fn attribute(&mut self, name: &str) {
        self.linef(format_args!("[{}]", name));
    }

    /// Write `using <namespace>;`
    pub fn using(&mut self, namespace: &str) {
        self.linef(format_args!("using {};", namespace));
    }

    /// Emit `items` separated by blank lines
    pub fn separated<T, F>(&mut self, items: &[T], mut f: F)
    where
        F: FnMut(&mut Self, &T),
    {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.blank_line();
            }
            f(self, item);
        }
    }
}
