//! String and char literal scanning for the lexer
//!
//! Handles regular (`"..."`), verbatim (`@"..."`), interpolated (`$"..."`, `$@"..."`) and raw (`"""..."""`)
//! strings, plus char literals. Contents are skipped; only their extent matters, so braces and quotes inside a
//! literal never reach the parser.

use super::Lexer;
use super::tokens::{LiteralKind, TokenKind};
use crate::diagnostics::SyntaxError;
use crate::tree::Span;

impl<'a> Lexer<'a> {
    /// Scan a string whose opening `"` has been consumed and push a literal token.
    pub(super) fn string_literal(&mut self, start: usize, verbatim: bool, interpolated: bool) {
        match self.skip_string_body(start, verbatim, interpolated) {
            Ok(()) => self.add_token(TokenKind::Literal(LiteralKind::String), start),
            Err(err) => self.errors.push(err),
        }
    }

    /// Scan `$"..."`, `$@"..."`, `$$"""..."""` starting after the first `$`.
    pub(super) fn interpolated_string(&mut self, start: usize) {
        while self.match_char('$') {}
        let verbatim = self.match_char('@');
        if self.match_char('"') {
            self.string_literal(start, verbatim, true);
        } else {
            self.add_token(TokenKind::Symbol('$'), start);
        }
    }

    /// Scan a char literal whose opening `'` has been consumed.
    pub(super) fn char_literal(&mut self, start: usize) {
        match self.skip_char_body(start) {
            Ok(()) => self.add_token(TokenKind::Literal(LiteralKind::Char), start),
            Err(err) => self.errors.push(err),
        }
    }

    fn skip_char_body(&mut self, start: usize) -> Result<(), SyntaxError> {
        loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some('\'') => return Ok(()),
                Some('\n') | None => {
                    return Err(SyntaxError::lexical(
                        "unterminated char literal",
                        Span::new(start, self.current_pos),
                    ));
                }
                Some(_) => {}
            }
        }
    }

    fn skip_string_body(&mut self, start: usize, verbatim: bool, interpolated: bool) -> Result<(), SyntaxError> {
        // `"""` opens a raw string; `""` alone is just an empty string
        if !verbatim && self.peek() == Some('"') && self.peek_next() == Some('"') {
            return self.skip_raw_string_body(start);
        }

        loop {
            match self.advance() {
                Some('\\') if !verbatim => {
                    self.advance();
                }
                Some('"') => {
                    // `""` is an escaped quote in verbatim strings
                    if verbatim && self.match_char('"') {
                        continue;
                    }
                    return Ok(());
                }
                Some('{') if interpolated => {
                    if !self.match_char('{') {
                        self.skip_interpolation_hole(start)?;
                    }
                }
                Some('\n') if !verbatim => return Err(unterminated_string(start, self.current_pos)),
                None => return Err(unterminated_string(start, self.current_pos)),
                Some(_) => {}
            }
        }
    }

    /// Skip a raw string. One opening quote has been consumed and at least two more follow.
    fn skip_raw_string_body(&mut self, start: usize) -> Result<(), SyntaxError> {
        let mut quotes = 1;
        while self.match_char('"') {
            quotes += 1;
        }

        let mut run = 0;
        loop {
            match self.advance() {
                Some('"') => {
                    run += 1;
                    if run == quotes {
                        // Extra closing quotes belong to the delimiter run as well
                        while self.match_char('"') {}
                        return Ok(());
                    }
                }
                Some(_) => run = 0,
                None => return Err(unterminated_string(start, self.current_pos)),
            }
        }
    }

    /// Skip an interpolation hole (`{expr}`) whose `{` has been consumed.
    fn skip_interpolation_hole(&mut self, start: usize) -> Result<(), SyntaxError> {
        let mut depth = 1;
        loop {
            let Some(c) = self.advance() else {
                return Err(unterminated_string(start, self.current_pos));
            };
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                '"' => self.skip_string_body(self.current_pos - 1, false, false)?,
                '@' if self.match_char('"') => self.skip_string_body(self.current_pos - 2, true, false)?,
                '$' if self.match_char('"') => self.skip_string_body(self.current_pos - 2, false, true)?,
                '\'' => self.skip_char_body(self.current_pos - 1)?,
                _ => {}
            }
        }
    }
}

fn unterminated_string(start: usize, end: usize) -> SyntaxError {
    SyntaxError::lexical("unterminated string literal", Span::new(start, end))
        .with_hint("close the string with a matching '\"'")
}

#[cfg(test)]
mod tests {
    use crate::lexer::{LiteralKind, TokenKind, lex};

    fn literal_count(source: &str) -> usize {
        lex(source)
            .unwrap()
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Literal(_)))
            .count()
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(literal_count(r#""a \" b""#), 1);
    }

    #[test]
    fn test_verbatim_doubled_quote() {
        assert_eq!(literal_count(r#"@"C:\dir ""quoted"" ""#), 1);
    }

    #[test]
    fn test_verbatim_spans_lines() {
        assert_eq!(literal_count("@\"line one\nline two\""), 1);
    }

    #[test]
    fn test_interpolated_with_nested_string() {
        let tokens = lex(r#"$"{(ok ? "}" : "{")} done" ;"#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::String));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_interpolated_escaped_brace() {
        assert_eq!(literal_count(r#"$"{{literal}}""#), 1);
    }

    #[test]
    fn test_raw_string() {
        let source = "\"\"\"\n  { \"quoted\" }\n  \"\"\" x";
        let tokens = lex(source).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::String));
        assert_eq!(tokens[1].kind, TokenKind::Ident("x".to_string()));
    }

    #[test]
    fn test_empty_string_is_not_raw() {
        assert_eq!(literal_count(r#""" + """#), 2);
    }

    #[test]
    fn test_char_literals() {
        assert_eq!(literal_count(r"'a' '\'' '{'"), 3);
    }

    #[test]
    fn test_unterminated_string_reports_error() {
        let errs = lex("var s = \"open\nclass A {}").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].message.contains("unterminated string"));
        assert!(errs[0].hint.is_some());
    }
}
