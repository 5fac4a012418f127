//! Diagnostics for the syntax frontend.
//!
//! [`SyntaxError`] is both a `thiserror` error and a `miette` diagnostic, so callers can either render it with
//! miette's graphical reporter or with [`format_error`], a plain `file:line:col` rendering with a caret line.

use std::fmt;

use crate::tree::Span;

/// Which frontend phase rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Lexical => write!(f, "lexical error"),
            ErrorKind::Syntax => write!(f, "syntax error"),
        }
    }
}

/// A frontend error with location information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("{kind}: {message}")]
#[diagnostic(code(stubgen::syntax))]
pub struct SyntaxError {
    pub message: String,
    #[label("here")]
    pub span: Span,
    pub kind: ErrorKind,
    #[help]
    pub hint: Option<String>,
}

impl SyntaxError {
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind: ErrorKind::Lexical,
            hint: None,
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            kind: ErrorKind::Syntax,
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Render an error with source context.
///
/// ```text
/// syntax error: unclosed '{'
///   --> Cart.cs:3:5
///    |
///  3 |     {
///    |     ^
/// ```
pub fn format_error(file_name: &str, source: &str, error: &SyntaxError) -> String {
    let (line_num, col_num, line_text) = get_line_info(source, error.span.start);
    let width = line_num.to_string().len();

    let mut out = format!("{}: {}\n", error.kind, error.message);
    out.push_str(&format!("  --> {}:{}:{}\n", file_name, line_num, col_num));
    out.push_str(&format!("  {:>width$} |\n", "", width = width));
    out.push_str(&format!("  {:>width$} | {}\n", line_num, line_text, width = width));

    let underline_len = error
        .span
        .len()
        .min(line_text.len().saturating_sub(col_num - 1))
        .max(1);
    out.push_str(&format!(
        "  {:>width$} | {}{}\n",
        "",
        " ".repeat(col_num - 1),
        "^".repeat(underline_len),
        width = width
    ));

    if let Some(hint) = &error.hint {
        out.push_str(&format!("  = hint: {}\n", hint));
    }

    out
}

/// Get line number, column number, and line text for a byte offset
fn get_line_info(source: &str, offset: usize) -> (usize, usize, &str) {
    let offset = offset.min(source.len());
    let mut line_num = 1;
    let mut line_start = 0;

    for (i, c) in source.char_indices() {
        if i >= offset {
            break;
        }
        if c == '\n' {
            line_num += 1;
            line_start = i + 1;
        }
    }

    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());

    let line_text = source[line_start..line_end].trim_end_matches('\r');
    let col_num = source[line_start..offset].chars().count() + 1;

    (line_num, col_num, line_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_info_second_line() {
        let source = "namespace A\n{\n  class\n";
        let (line, col, text) = get_line_info(source, 16);
        assert_eq!(line, 3);
        assert_eq!(col, 3);
        assert_eq!(text, "  class");
    }

    #[test]
    fn test_format_error_points_at_span() {
        let source = "namespace A {\n  class }\n";
        let err = SyntaxError::syntax("expected identifier, found '}'", Span::new(22, 23));
        let rendered = format_error("A.cs", source, &err);
        assert!(rendered.starts_with("syntax error: expected identifier, found '}'\n"));
        assert!(rendered.contains("--> A.cs:2:9"));
        assert!(rendered.contains("  class }"));
        assert!(rendered.ends_with("        ^\n"));
    }

    #[test]
    fn test_display_includes_kind() {
        let err = SyntaxError::lexical("unterminated string literal", Span::new(0, 1));
        assert_eq!(err.to_string(), "lexical error: unterminated string literal");
    }
}
