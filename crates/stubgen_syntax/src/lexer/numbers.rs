//! Numeric literal scanning for the lexer

use super::Lexer;
use super::tokens::{LiteralKind, TokenKind};

impl<'a> Lexer<'a> {
    /// Scan a numeric literal whose first digit has been consumed.
    ///
    /// Accepts hex/binary prefixes, digit separators, exponents and type suffixes (`0xFF`, `1_000`, `2.5e3f`,
    /// `10UL`) without validating them: the literal's value is never needed.
    pub(super) fn scan_number(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            let fraction = c == '.' && self.peek_next().is_some_and(|n| n.is_ascii_digit());
            if c.is_ascii_alphanumeric() || c == '_' || fraction {
                self.advance();
            } else {
                break;
            }
        }
        self.add_token(TokenKind::Literal(LiteralKind::Number), start);
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{LiteralKind, TokenKind, lex};

    #[test]
    fn test_number_forms() {
        for source in ["42", "0xFF", "1_000_000", "2.5e3f", "10UL", "0b1010"] {
            let tokens = lex(source).unwrap();
            assert_eq!(tokens.len(), 2, "{source}");
            assert_eq!(tokens[0].kind, TokenKind::Literal(LiteralKind::Number));
        }
    }

    #[test]
    fn test_member_access_after_number_is_not_fraction() {
        let tokens = lex("1.ToString").unwrap();
        assert_eq!(tokens.len(), 4);
    }
}
