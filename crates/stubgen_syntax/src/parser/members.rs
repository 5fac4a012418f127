/// Member parsing inside type bodies.
///
/// A member head is scanned token by token until one of the tokens that decides its kind:
///
/// | terminator | kind |
/// |------------|------|
/// | `(` | method, constructor, or other (operator, destructor, delegate) |
/// | `{` / `=>` | property (indexers are named `this`) |
/// | `=` / `;` | field |
///
/// The rest of the member is skipped.
impl<'a> Parser<'a> {
    fn member_declaration(
        &mut self,
        parent: NodeId,
        modifiers: Vec<KeywordId>,
        start: Span,
        forced: Option<NodeKind>,
    ) -> Result<(), SyntaxError> {
        let head = self.member_head()?;
        let Some(name) = head.name else {
            return Err(SyntaxError::syntax("expected member name", start.merge(self.current_span())));
        };

        let kind = match head.terminator {
            PunctuationId::LParen if head.operator || head.destructor => NodeKind::Other,
            PunctuationId::LParen if head.idents == 1 && name == self.tree.node(parent).name() => {
                NodeKind::Constructor
            }
            PunctuationId::LParen => NodeKind::Method,
            PunctuationId::LBrace | PunctuationId::FatArrow => NodeKind::Property,
            _ => NodeKind::Field,
        };
        let id = self
            .tree
            .add_child(parent, forced.unwrap_or(kind), name, modifiers, start);

        let end = match head.terminator {
            PunctuationId::LParen => self.method_rest()?,
            PunctuationId::LBrace => self.property_rest()?,
            _ => self.skip_to_semicolon()?,
        };
        self.tree.extend_span(id, end);
        Ok(())
    }

    /// Scan a member head up to (not including) its terminator.
    fn member_head(&mut self) -> Result<MemberHead, SyntaxError> {
        let mut head = MemberHead {
            name: None,
            idents: 0,
            operator: false,
            destructor: false,
            terminator: PunctuationId::Semicolon,
        };

        loop {
            let token = self.peek();
            match &token.kind {
                TokenKind::Eof | TokenKind::Punctuation(PunctuationId::RBrace) => {
                    return Err(self.error_here("expected member declaration"));
                }
                // Tuple return type: `(int, string) Pair()`
                TokenKind::Punctuation(PunctuationId::LParen) if head.idents == 0 && !head.operator => {
                    self.skip_balanced()?;
                }
                // `operator ==`, `operator >=`
                TokenKind::Punctuation(PunctuationId::Eq | PunctuationId::LAngle) if head.operator => {
                    self.advance();
                }
                TokenKind::Punctuation(
                    id @ (PunctuationId::LParen
                    | PunctuationId::LBrace
                    | PunctuationId::FatArrow
                    | PunctuationId::Semicolon
                    | PunctuationId::Eq),
                ) => {
                    head.terminator = *id;
                    return Ok(head);
                }
                // Type arguments, array ranks, indexer parameters
                TokenKind::Punctuation(PunctuationId::LAngle | PunctuationId::LBracket) => {
                    self.skip_balanced()?;
                }
                TokenKind::Punctuation(PunctuationId::Tilde) => {
                    head.destructor = true;
                    self.advance();
                }
                TokenKind::Keyword(KeywordId::Operator) => {
                    head.operator = true;
                    head.name = Some(keywords::as_str(KeywordId::Operator).to_string());
                    self.advance();
                }
                TokenKind::Keyword(KeywordId::This) => {
                    head.name = Some(keywords::as_str(KeywordId::This).to_string());
                    self.advance();
                }
                kind => {
                    // Conversion operators name their target type after `operator`
                    if let Some(ident) = kind.identifier().filter(|_| !head.operator) {
                        head.name = Some(ident.to_string());
                        head.idents += 1;
                    }
                    self.advance();
                }
            }
        }
    }

    /// Skip parameters, constraints or constructor initializer, and the body.
    fn method_rest(&mut self) -> Result<Span, SyntaxError> {
        let params = self.skip_balanced()?;
        loop {
            if self.check_punct(PunctuationId::LBrace) {
                return Ok(params.merge(self.skip_balanced()?));
            }
            if self.check_punct(PunctuationId::FatArrow) || self.check_punct(PunctuationId::Semicolon) {
                return Ok(params.merge(self.skip_to_semicolon()?));
            }
            if self.is_at_end() || self.check_punct(PunctuationId::RBrace) {
                return Err(self.error_here("expected method body or ';'"));
            }
            // `where T : IComparable<T>`, `: base(x)`
            if self.at_group_open() || self.check_punct(PunctuationId::LAngle) {
                self.skip_balanced()?;
            } else {
                self.advance();
            }
        }
    }

    /// Skip accessor block and optional `= initializer;`.
    fn property_rest(&mut self) -> Result<Span, SyntaxError> {
        let accessors = self.skip_balanced()?;
        if self.check_punct(PunctuationId::Eq) {
            return Ok(accessors.merge(self.skip_to_semicolon()?));
        }
        Ok(accessors)
    }
}

/// What the head scan learned about a member.
struct MemberHead {
    /// Last identifier seen (the declared name), `this` for indexers, `operator` for operators.
    name: Option<String>,
    idents: usize,
    operator: bool,
    destructor: bool,
    terminator: PunctuationId,
}
