//! Recursive descent parser for module interfaces.
//!
//! The [`Parser`] consumes a token stream and builds a [`SourceFile`]
//! holding one [`ModuleDecl`] per module. Only interface structure is
//! parsed: module headers, parameter lists (consumed and discarded), ANSI
//! port declarations, and non-ANSI body port declarations. Everything else
//! in a module body is skipped token by token, with `function`/`task`
//! bodies skipped as units so their argument declarations are never
//! mistaken for ports.
//!
//! The parser fails fast: any syntax error aborts the parse, because a
//! partial parse cannot yield a trustworthy port interface.

use crate::ast::{Bound, Direction, ModuleDecl, NetType, PortDecl, PortStyle, Range, SourceFile};
use crate::error::ParseError;
use crate::token::{Span, Token, TokenKind};

/// A recursive descent parser over a lexed token stream.
pub struct Parser<'src> {
    tokens: Vec<Token>,
    pos: usize,
    source: &'src str,
}

impl<'src> Parser<'src> {
    /// Creates a parser from a token stream lexed from `source`.
    pub fn new(tokens: Vec<Token>, source: &'src str) -> Self {
        Self {
            tokens,
            pos: 0,
            source,
        }
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    fn current(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    fn current_span(&self) -> Span {
        self.tokens[self.pos].span
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.current() == TokenKind::Eof
    }

    fn prev_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            self.current_span()
        }
    }

    fn advance(&mut self) {
        if !self.at_eof() {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.expected(&format!("{kind:?}")))
        }
    }

    /// Expects and returns a plain identifier.
    ///
    /// Escaped identifiers are rejected here: their names cannot appear in
    /// generated driver code, so accepting them would only defer the
    /// failure to a less helpful place.
    fn expect_ident(&mut self) -> Result<String, ParseError> {
        if self.at(TokenKind::Identifier) {
            let text = self.text_at(self.current_span()).to_string();
            self.advance();
            Ok(text)
        } else if self.at(TokenKind::EscapedIdentifier) {
            Err(self.err_here("escaped identifiers are not supported here"))
        } else {
            Err(self.expected("identifier"))
        }
    }

    fn peek_kind(&self, offset: usize) -> TokenKind {
        let idx = self.pos + offset;
        if idx < self.tokens.len() {
            self.tokens[idx].kind
        } else {
            TokenKind::Eof
        }
    }

    fn text_at(&self, span: Span) -> &'src str {
        &self.source[span.start as usize..span.end as usize]
    }

    fn err_here(&self, msg: &str) -> ParseError {
        ParseError::at(self.source, self.current_span().start, msg)
    }

    fn err_at(&self, span: Span, msg: &str) -> ParseError {
        ParseError::at(self.source, span.start, msg)
    }

    fn expected(&self, what: &str) -> ParseError {
        let found = if self.at_eof() {
            "end of file".to_string()
        } else {
            format!("'{}'", self.text_at(self.current_span()))
        };
        self.err_here(&format!("expected {what}, found {found}"))
    }

    // ========================================================================
    // Top-level parsing
    // ========================================================================

    /// Parses a complete source file.
    pub fn parse_source_file(&mut self) -> Result<SourceFile, ParseError> {
        let mut modules = Vec::new();
        while !self.at_eof() {
            if self.at(TokenKind::Module) {
                modules.push(self.parse_module()?);
            } else {
                return Err(self.expected("'module'"));
            }
        }
        Ok(SourceFile { modules })
    }

    /// Parses one module declaration through its `endmodule`.
    fn parse_module(&mut self) -> Result<ModuleDecl, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::Module)?;
        let name = self.expect_ident()?;

        // Parameter port list: consumed and discarded. Widths that refer
        // to parameters come out symbolic and default to 1 downstream.
        if self.at(TokenKind::Hash) {
            self.skip_parameter_ports()?;
        }

        let (port_style, header_ports, port_names) = if self.at(TokenKind::LeftParen) {
            self.parse_port_list()?
        } else {
            (PortStyle::Empty, Vec::new(), Vec::new())
        };

        self.expect(TokenKind::Semicolon)?;

        let body_ports = self.parse_module_body()?;
        self.expect(TokenKind::Endmodule)?;

        let ports = match port_style {
            PortStyle::NonAnsi => body_ports,
            PortStyle::Ansi | PortStyle::Empty => {
                if let Some(decl) = body_ports.first() {
                    return Err(self.err_at(
                        decl.span,
                        &format!(
                            "port declaration in body of module '{name}' requires a non-ANSI port list"
                        ),
                    ));
                }
                header_ports
            }
        };

        let span = start.merge(self.prev_span());
        Ok(ModuleDecl {
            name,
            port_style,
            ports,
            port_names,
            span,
        })
    }

    /// Consumes a `#( ... )` parameter port list without interpreting it.
    fn skip_parameter_ports(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::Hash)?;
        self.expect(TokenKind::LeftParen)?;
        let mut depth = 1usize;
        loop {
            match self.current() {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => {
                    depth -= 1;
                    if depth == 0 {
                        self.advance();
                        return Ok(());
                    }
                }
                TokenKind::Eof => return Err(self.expected("')'")),
                _ => {}
            }
            self.advance();
        }
    }

    // ========================================================================
    // Port lists
    // ========================================================================

    /// Parses a port list, detecting ANSI vs non-ANSI style.
    ///
    /// ANSI lists open with a direction or net type: `(input a, output b)`.
    /// Non-ANSI lists hold bare identifiers declared in the body: `(a, b)`.
    fn parse_port_list(
        &mut self,
    ) -> Result<(PortStyle, Vec<PortDecl>, Vec<String>), ParseError> {
        self.expect(TokenKind::LeftParen)?;

        if self.eat(TokenKind::RightParen) {
            return Ok((PortStyle::Empty, Vec::new(), Vec::new()));
        }

        if self.current().is_direction() || self.current().is_net_type() {
            let ports = self.parse_ansi_ports()?;
            self.expect(TokenKind::RightParen)?;
            Ok((PortStyle::Ansi, ports, Vec::new()))
        } else {
            let names = self.parse_name_list()?;
            self.expect(TokenKind::RightParen)?;
            Ok((PortStyle::NonAnsi, Vec::new(), names))
        }
    }

    /// Parses ANSI-style port declarations: `dir [type] [range] name {, name}`.
    ///
    /// A group without a direction keyword inherits the direction of the
    /// previous group; the first group defaults to `input`.
    fn parse_ansi_ports(&mut self) -> Result<Vec<PortDecl>, ParseError> {
        let mut ports = Vec::new();
        let mut current_dir = Direction::Input;

        loop {
            let start = self.current_span();

            let direction = match self.current() {
                TokenKind::Input => {
                    self.advance();
                    current_dir = Direction::Input;
                    Direction::Input
                }
                TokenKind::Output => {
                    self.advance();
                    current_dir = Direction::Output;
                    Direction::Output
                }
                TokenKind::Inout => {
                    self.advance();
                    current_dir = Direction::Inout;
                    Direction::Inout
                }
                _ => current_dir,
            };

            let net_type = self.eat_net_type();
            let signed = self.eat(TokenKind::Signed);
            let range = if self.at(TokenKind::LeftBracket) {
                Some(self.parse_range()?)
            } else {
                None
            };

            let mut names = vec![self.expect_ident()?];
            while self.at(TokenKind::Comma) {
                // A direction or net type after the comma starts a new group
                let next = self.peek_kind(1);
                if next.is_direction() || next.is_net_type() {
                    break;
                }
                self.advance();
                names.push(self.expect_ident()?);
            }

            let span = start.merge(self.prev_span());
            ports.push(PortDecl {
                direction,
                net_type,
                signed,
                range,
                names,
                span,
            });

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }

        Ok(ports)
    }

    /// Parses a comma-separated identifier list.
    fn parse_name_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut names = vec![self.expect_ident()?];
        while self.eat(TokenKind::Comma) {
            names.push(self.expect_ident()?);
        }
        Ok(names)
    }

    fn eat_net_type(&mut self) -> Option<NetType> {
        let net_type = match self.current() {
            TokenKind::Wire => NetType::Wire,
            TokenKind::Reg => NetType::Reg,
            TokenKind::Tri => NetType::Tri,
            TokenKind::Logic => NetType::Logic,
            TokenKind::Integer => NetType::Integer,
            TokenKind::Real => NetType::Real,
            _ => return None,
        };
        self.advance();
        Some(net_type)
    }

    /// Parses a range: `[ bound : bound ]`.
    fn parse_range(&mut self) -> Result<Range, ParseError> {
        let start = self.current_span();
        self.expect(TokenKind::LeftBracket)?;
        let msb = self.parse_bound(TokenKind::Colon)?;
        self.expect(TokenKind::Colon)?;
        let lsb = self.parse_bound(TokenKind::RightBracket)?;
        self.expect(TokenKind::RightBracket)?;
        let span = start.merge(self.prev_span());
        Ok(Range { msb, lsb, span })
    }

    /// Parses one range bound, scanning up to `terminator` at bracket depth 0.
    ///
    /// A bound that is a single plain integer token becomes
    /// [`Bound::Literal`]; anything else (parameter names, arithmetic,
    /// based literals) is kept as [`Bound::Symbolic`] source text.
    fn parse_bound(&mut self, terminator: TokenKind) -> Result<Bound, ParseError> {
        let first = self.current_span();
        let mut depth = 0usize;
        let mut count = 0usize;

        loop {
            let kind = self.current();
            if depth == 0
                && (kind == terminator
                    || kind == TokenKind::RightBracket
                    || kind == TokenKind::RightParen
                    || kind == TokenKind::Semicolon
                    || kind == TokenKind::Eof)
            {
                break;
            }
            match kind {
                TokenKind::LeftParen | TokenKind::LeftBracket => depth += 1,
                TokenKind::RightParen | TokenKind::RightBracket => depth -= 1,
                _ => {}
            }
            count += 1;
            self.advance();
        }

        if count == 0 {
            return Err(self.expected("range bound"));
        }

        let text = self.text_at(first.merge(self.prev_span())).trim();
        if count == 1 {
            let digits: String = text.chars().filter(|c| *c != '_').collect();
            if let Ok(value) = digits.parse::<u64>() {
                return Ok(Bound::Literal(value));
            }
        }
        Ok(Bound::Symbolic(text.to_string()))
    }

    // ========================================================================
    // Module body
    // ========================================================================

    /// Scans a module body up to (not including) `endmodule`.
    ///
    /// Collects non-ANSI port declarations and skips everything else.
    fn parse_module_body(&mut self) -> Result<Vec<PortDecl>, ParseError> {
        let mut ports = Vec::new();
        loop {
            match self.current() {
                TokenKind::Endmodule => return Ok(ports),
                TokenKind::Eof => return Err(self.expected("'endmodule'")),
                TokenKind::Input | TokenKind::Output | TokenKind::Inout => {
                    ports.push(self.parse_body_port_decl()?);
                }
                TokenKind::Function => self.skip_until(TokenKind::Endfunction)?,
                TokenKind::Task => self.skip_until(TokenKind::Endtask)?,
                _ => self.advance(),
            }
        }
    }

    /// Parses a body port declaration: `dir [type] [range] name {, name} ;`.
    fn parse_body_port_decl(&mut self) -> Result<PortDecl, ParseError> {
        let start = self.current_span();
        let direction = match self.current() {
            TokenKind::Input => Direction::Input,
            TokenKind::Output => Direction::Output,
            _ => Direction::Inout,
        };
        self.advance();

        let net_type = self.eat_net_type();
        let signed = self.eat(TokenKind::Signed);
        let range = if self.at(TokenKind::LeftBracket) {
            Some(self.parse_range()?)
        } else {
            None
        };
        let names = self.parse_name_list()?;
        self.expect(TokenKind::Semicolon)?;

        let span = start.merge(self.prev_span());
        Ok(PortDecl {
            direction,
            net_type,
            signed,
            range,
            names,
            span,
        })
    }

    /// Skips tokens through the given end keyword.
    fn skip_until(&mut self, end: TokenKind) -> Result<(), ParseError> {
        loop {
            if self.eat(end) {
                return Ok(());
            }
            if self.at_eof() {
                return Err(self.expected(&format!("{end:?}")));
            }
            self.advance();
        }
    }
}
