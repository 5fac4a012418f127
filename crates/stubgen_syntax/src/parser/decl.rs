/// Declaration parsing: member lists, namespaces and type declarations.
impl<'a> Parser<'a> {
    // ========================================================================
    // Member lists
    // ========================================================================

    /// Parse declarations into `parent` until the closing `}` (when `braced`) or end of input.
    ///
    /// The closing brace itself is left for the caller.
    fn member_list(&mut self, parent: NodeId, scope: Scope, braced: bool) {
        self.depth += 1;
        while !self.is_at_end() {
            if self.check_punct(PunctuationId::RBrace) {
                if braced {
                    break;
                }
                let stray = self.advance();
                self.errors.push(SyntaxError::syntax("unexpected '}'", stray.span));
                continue;
            }

            if let Err(err) = self.member(parent, scope) {
                self.errors.push(err);
                self.synchronize();
            }
        }
        self.depth -= 1;
    }

    /// Refuse to open another body once nesting hits [`MAX_NESTING_DEPTH`].
    ///
    /// Called before the `{` is consumed so recovery skips the whole body.
    fn check_nesting(&self) -> Result<(), SyntaxError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(SyntaxError::syntax("declarations are nested too deeply", self.current_span()));
        }
        Ok(())
    }

    fn member(&mut self, parent: NodeId, scope: Scope) -> Result<(), SyntaxError> {
        if scope != Scope::Type && self.at_directive() {
            self.skip_to_semicolon()?;
            return Ok(());
        }

        // Attributes, including trailing `[assembly: ...]` lists with nothing after them
        while self.check_punct(PunctuationId::LBracket) {
            self.skip_balanced()?;
        }
        if self.is_at_end() || self.check_punct(PunctuationId::RBrace) {
            return Ok(());
        }

        let start = self.current_span();
        let modifiers = self.modifiers();

        match self.peek().keyword_id() {
            Some(KeywordId::Namespace) if scope != Scope::Type && modifiers.is_empty() => {
                self.namespace_declaration(parent, scope, start)
            }
            Some(KeywordId::Class) => self.type_declaration(parent, TypeKind::Class, modifiers, start),
            Some(KeywordId::Struct) => self.type_declaration(parent, TypeKind::Struct, modifiers, start),
            Some(KeywordId::Interface) => self.type_declaration(parent, TypeKind::Interface, modifiers, start),
            Some(KeywordId::Enum) => self.type_declaration(parent, TypeKind::Enum, modifiers, start),
            Some(KeywordId::Record) if self.at_record_declaration() => {
                // `record class` / `record struct` name the same declaration
                if matches!(
                    self.peek_next().keyword_id(),
                    Some(KeywordId::Class | KeywordId::Struct)
                ) {
                    self.advance();
                }
                self.type_declaration(parent, TypeKind::Record, modifiers, start)
            }
            Some(KeywordId::Delegate) => {
                self.advance();
                self.member_declaration(parent, modifiers, start, Some(NodeKind::Other))
            }
            Some(KeywordId::Event) if scope == Scope::Type => {
                self.advance();
                self.member_declaration(parent, modifiers, start, Some(NodeKind::Other))
            }
            _ if scope == Scope::Type => self.member_declaration(parent, modifiers, start, None),
            _ => Err(self.error_here("expected namespace or type declaration")),
        }
    }

    /// `using ...;`, `global using ...;` or `extern alias ...;`.
    fn at_directive(&self) -> bool {
        let next = &self.peek_next().kind;
        self.check_keyword(KeywordId::Using)
            || (self.check_ident("global") && next.is_keyword(KeywordId::Using))
            || (self.check_keyword(KeywordId::Extern) && matches!(next, TokenKind::Ident(n) if n == "alias"))
    }

    /// `record` introduces a declaration when followed by `class`, `struct` or a name.
    fn at_record_declaration(&self) -> bool {
        let next = &self.peek_next().kind;
        next.is_keyword(KeywordId::Class) || next.is_keyword(KeywordId::Struct) || next.identifier().is_some()
    }

    /// Consume declaration modifiers in source order.
    fn modifiers(&mut self) -> Vec<KeywordId> {
        let mut modifiers = Vec::new();
        loop {
            if let Some(id) = self.peek().keyword_id().filter(|id| keywords::is_modifier(*id)) {
                modifiers.push(id);
                self.advance();
            } else if self.check_ident("ref") && self.peek_next().kind.is_keyword(KeywordId::Struct) {
                // `ref struct` is still a struct
                self.advance();
            } else {
                return modifiers;
            }
        }
    }

    // ========================================================================
    // Namespaces
    // ========================================================================

    fn namespace_declaration(&mut self, parent: NodeId, scope: Scope, start: Span) -> Result<(), SyntaxError> {
        self.advance(); // `namespace`
        let name = self.qualified_name()?;
        let ns = self.tree.add_child(parent, NodeKind::Namespace, name, Vec::new(), start);

        if self.check_punct(PunctuationId::Semicolon) {
            let semi = self.advance().span;
            if scope != Scope::CompilationUnit {
                return Err(SyntaxError::syntax("file-scoped namespace must be declared at the top level", semi)
                    .with_hint("use a block-bodied namespace `namespace Name { ... }` here"));
            }
            // A file-scoped namespace owns every remaining declaration
            self.member_list(ns, Scope::Namespace, false);
            self.tree.extend_span(ns, self.previous_span());
            return Ok(());
        }

        self.check_nesting()?;
        let open = self
            .expect_punct(PunctuationId::LBrace, "expected '{' or ';' after namespace name")?
            .span;
        self.member_list(ns, Scope::Namespace, true);
        let close = self.expect_closing_brace(open)?;
        self.match_punct(PunctuationId::Semicolon);
        self.tree.extend_span(ns, close);
        Ok(())
    }

    /// `A.B.C`, returned joined with `.`.
    fn qualified_name(&mut self) -> Result<String, SyntaxError> {
        let (mut name, _) = self.expect_identifier("expected namespace name")?;
        while self.match_punct(PunctuationId::Dot) {
            let (segment, _) = self.expect_identifier("expected identifier after '.'")?;
            name.push('.');
            name.push_str(&segment);
        }
        Ok(name)
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    /// Parse a type declaration; the current token is its `class`/`struct`/... keyword.
    fn type_declaration(
        &mut self,
        parent: NodeId,
        kind: TypeKind,
        modifiers: Vec<KeywordId>,
        start: Span,
    ) -> Result<(), SyntaxError> {
        self.advance();
        let (name, _) = self.expect_identifier(&format!("expected {} name", kind.as_str()))?;
        let ty = self.tree.add_child(parent, NodeKind::Type(kind), name, modifiers, start);

        // Header: type parameters, primary constructor, base list, constraints
        loop {
            if self.check_punct(PunctuationId::LBrace) {
                break;
            }
            if self.check_punct(PunctuationId::Semicolon) {
                // Positional record or body-less declaration
                let end = self.advance().span;
                self.tree.extend_span(ty, end);
                return Ok(());
            }
            if self.is_at_end() || self.check_punct(PunctuationId::RBrace) {
                return Err(self.error_here("expected '{' to open the type body"));
            }
            if self.at_group_open() || self.check_punct(PunctuationId::LAngle) {
                self.skip_balanced()?;
            } else {
                self.advance();
            }
        }

        let end = if kind == TypeKind::Enum {
            self.skip_balanced()?
        } else {
            self.check_nesting()?;
            let open = self.advance().span;
            self.member_list(ty, Scope::Type, true);
            self.expect_closing_brace(open)?
        };
        self.match_punct(PunctuationId::Semicolon);
        self.tree.extend_span(ty, end);
        Ok(())
    }
}
