//! Lexer for C#-style source text.
//!
//! Handles tokenization including:
//! - Declaration keywords and modifiers (namespace, class, public, static, etc.)
//! - Identifiers, including verbatim identifiers (`@class`)
//! - Literals (regular, verbatim, interpolated and raw strings; chars; numbers), whose contents are skipped
//! - Comments and preprocessor directives, which produce no tokens
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, LiteralKind)
//! - `strings` - String and char literal scanning
//! - `numbers` - Numeric literal scanning

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{LiteralKind, Token, TokenKind, keyword_id};

use crate::diagnostics::SyntaxError;
use crate::tree::Span;
use stubgen_core::lang::punctuation::{self, PunctuationId};

/// Lexer for C#-style source code.
///
/// Converts source text into a stream of tokens. Operators the parser does not care about come out as
/// [`TokenKind::Symbol`]; the only multi-character token is `=>`.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    /// Only whitespace seen since the last newline (preprocessor directives must start a line)
    at_line_start: bool,
    tokens: Vec<Token>,
    errors: Vec<SyntaxError>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            at_line_start: true,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source code.
    ///
    /// Returns a vector of tokens on success, or a vector of errors on failure.
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<SyntaxError>> {
        // A leading byte-order mark is not part of the source text
        if self.peek() == Some('\u{feff}') {
            self.advance();
        }

        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.current_pos, self.current_pos)));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next(); // skip current
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        // Skip whitespace, tracking line starts for preprocessor directives
        while let Some(c) = self.peek() {
            if c == '\n' {
                self.at_line_start = true;
                self.advance();
            } else if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;
        let line_start = self.at_line_start;

        let Some(c) = self.advance() else {
            return;
        };
        self.at_line_start = false;

        match c {
            // Preprocessor directives (#region, #if, #nullable ...)
            '#' if line_start => self.skip_line(),

            // Comments
            '/' if self.peek() == Some('/') => self.skip_line(),
            '/' if self.peek() == Some('*') => {
                self.advance();
                self.skip_block_comment(start);
                self.at_line_start = line_start;
            }

            // Strings and chars
            '"' => self.string_literal(start, false, false),
            '\'' => self.char_literal(start),
            '@' if self.peek() == Some('"') => {
                self.advance();
                self.string_literal(start, true, false);
            }
            '@' if self.peek() == Some('$') && self.peek_next() == Some('"') => {
                self.advance();
                self.advance();
                self.string_literal(start, true, true);
            }
            '$' => self.interpolated_string(start),

            // Verbatim identifiers (`@class`) never resolve to keywords
            '@' if self.peek().is_some_and(is_ident_start) => {
                let name = self.take_identifier_tail(String::new());
                self.add_token(TokenKind::Ident(name), start);
            }

            // Numbers
            '0'..='9' => self.scan_number(start),

            '=' if self.match_char('>') => self.add_punct(PunctuationId::FatArrow, start),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start, c),

            _ => match punctuation::from_char(c) {
                Some(id) => self.add_punct(id, start),
                None => self.add_token(TokenKind::Symbol(c), start),
            },
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    fn scan_identifier(&mut self, start: usize, first: char) {
        let name = self.take_identifier_tail(String::from(first));
        let kind = match keyword_id(&name) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident(name),
        };
        self.add_token(kind, start);
    }

    fn take_identifier_tail(&mut self, mut name: String) -> String {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                name.push(c);
                self.advance();
            } else {
                break;
            }
        }
        name
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, start: usize) {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => {}
                None => {
                    self.errors.push(SyntaxError::lexical(
                        "unterminated block comment",
                        Span::new(start, start + 2),
                    ));
                    return;
                }
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenize `source`.
///
/// ## Errors
/// Returns every lexical error found (unterminated literals and comments).
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<SyntaxError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
