/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords and punctuation
/// - Skipping balanced groups (`skip_balanced`, `skip_to_semicolon`)
/// - Error recovery (`synchronize`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &'a Token {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF_TOKEN)
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &'a Token {
        self.tokens.get(self.pos + 1).unwrap_or_else(|| self.peek())
    }

    /// Advance to the next token and return the token we just consumed.
    ///
    /// At `Eof` the position stays put and `Eof` is returned again.
    fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or_else(|| self.current_span(), |t| t.span)
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    /// Return `true` if the current token is the plain identifier `name` (`global`, `alias`, `ref`).
    fn check_ident(&self, name: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(ident) if ident == name)
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&'a Token, SyntaxError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(self.error_here(msg))
        }
    }

    /// Consume an identifier, accepting contextual keywords.
    fn expect_identifier(&mut self, msg: &str) -> Result<(String, Span), SyntaxError> {
        let token = self.peek();
        match token.kind.identifier() {
            Some(name) => {
                self.advance();
                Ok((name.to_string(), token.span))
            }
            None => Err(self.error_here(msg)),
        }
    }

    /// Consume the `}` closing a body opened at `open`.
    fn expect_closing_brace(&mut self, open: Span) -> Result<Span, SyntaxError> {
        if self.check_punct(PunctuationId::RBrace) {
            Ok(self.advance().span)
        } else {
            Err(SyntaxError::syntax("unclosed '{'", open).with_hint("add a matching '}'"))
        }
    }

    /// Build a syntax error at the current token: `"{msg}, found {token}"`.
    fn error_here(&self, msg: &str) -> SyntaxError {
        SyntaxError::syntax(format!("{}, found {}", msg, self.peek().kind), self.current_span())
    }

    /// Return `true` if the current token opens a group skipped as a unit. Angle brackets only
    /// count where the caller knows they delimit type arguments.
    fn at_group_open(&self) -> bool {
        matches!(
            self.peek().punctuation_id(),
            Some(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace)
        )
    }

    // ========================================================================
    // Skipping
    // ========================================================================

    /// Skip a balanced group starting at the current opening delimiter and return its span.
    ///
    /// Nested `(`, `[` and `{` are tracked; nested `<` only when the group itself opened with `<`,
    /// since inside bodies `<` is usually a comparison.
    ///
    /// ## Errors
    /// - If the current token is not an opening delimiter.
    /// - On a closing delimiter that does not match the innermost open one.
    /// - If the input ends before the group is closed.
    fn skip_balanced(&mut self) -> Result<Span, SyntaxError> {
        let open = self.advance();
        let Some((open_id, open_closer)) = open
            .punctuation_id()
            .and_then(|id| punctuation::closing(id).map(|closer| (id, closer)))
        else {
            return Err(SyntaxError::syntax(
                format!("expected an opening delimiter, found {}", open.kind),
                open.span,
            ));
        };

        let track_angles = open_id == PunctuationId::LAngle;
        let mut stack = vec![(open_id, open_closer, open.span)];
        let mut end = open.span;

        while let Some(&(opener, closer, opener_span)) = stack.last() {
            if self.is_at_end() {
                return Err(SyntaxError::syntax(
                    format!("unclosed '{}'", punctuation::as_str(opener)),
                    opener_span,
                )
                .with_hint(format!("add a matching '{}'", punctuation::as_str(closer))));
            }

            let token = self.advance();
            end = token.span;
            let Some(id) = token.punctuation_id() else {
                continue;
            };

            if id == closer {
                stack.pop();
            } else if let Some(nested_closer) = punctuation::closing(id) {
                if id != PunctuationId::LAngle || track_angles {
                    stack.push((id, nested_closer, token.span));
                }
            } else if matches!(
                id,
                PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace
            ) {
                return Err(SyntaxError::syntax(
                    format!(
                        "mismatched '{}', expected '{}'",
                        punctuation::as_str(id),
                        punctuation::as_str(closer)
                    ),
                    token.span,
                ));
            }
        }

        Ok(open.span.merge(end))
    }

    /// Skip up to and including the next `;` at this nesting level, stepping over balanced groups.
    ///
    /// ## Errors
    /// Fails at a `}` or end of input, which means the `;` is missing.
    fn skip_to_semicolon(&mut self) -> Result<Span, SyntaxError> {
        let start = self.current_span();
        loop {
            if self.is_at_end() || self.check_punct(PunctuationId::RBrace) {
                return Err(self.error_here("expected ';'"));
            }
            if self.check_punct(PunctuationId::Semicolon) {
                let end = self.advance().span;
                return Ok(start.merge(end));
            }
            if self.at_group_open() {
                self.skip_balanced()?;
            } else {
                self.advance();
            }
        }
    }

    /// Recover after an error by skipping to the end of the broken declaration.
    ///
    /// Stops after a `;` or a skipped `{ ... }` body, or before a `}` that closes the enclosing
    /// scope. Makes progress on every call unless already at `}` or end of input.
    fn synchronize(&mut self) {
        while !self.is_at_end() && !self.check_punct(PunctuationId::RBrace) {
            if self.match_punct(PunctuationId::Semicolon) {
                return;
            }
            if self.at_group_open() {
                let body = self.check_punct(PunctuationId::LBrace);
                if self.skip_balanced().is_err() || body {
                    return;
                }
            } else {
                self.advance();
            }
        }
    }
}
