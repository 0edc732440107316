//! Lexical analyzer for Verilog source text.
//!
//! Converts source text into a sequence of [`Token`]s: case-sensitive
//! keywords, sized/based literals (`4'b1010`), string literals with C-style
//! escapes, line and block comments, escaped identifiers, and system
//! identifiers. Compiler directives (`` `timescale ``, `` `define ``, ...)
//! are skipped to the end of their line, since the interface parser works on
//! unpreprocessed sources. Operator characters the parser never inspects
//! lex as [`TokenKind::Punct`].

use crate::error::ParseError;
use crate::token::{lookup_keyword, Span, Token, TokenKind};

/// Lexes the given Verilog source text into a vector of tokens.
///
/// Whitespace, comments, and compiler directives are skipped. The returned
/// vector always ends with a [`TokenKind::Eof`] token. The first malformed
/// construct aborts the lex with an error.
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        source: source.as_bytes(),
        text: source,
        pos: 0,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    source: &'a [u8],
    text: &'a str,
    pos: usize,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            if self.pos >= self.source.len() {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    span: Span::new(self.pos as u32, self.pos as u32),
                });
                break;
            }
            tokens.push(self.next_token()?);
        }
        Ok(tokens)
    }

    fn peek(&self) -> u8 {
        if self.pos < self.source.len() {
            self.source[self.pos]
        } else {
            0
        }
    }

    fn peek_at(&self, offset: usize) -> u8 {
        let idx = self.pos + offset;
        if idx < self.source.len() {
            self.source[idx]
        } else {
            0
        }
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start as u32, self.pos as u32)
    }

    fn error(&self, msg: &str, offset: usize) -> ParseError {
        ParseError::at(self.text, offset as u32, msg)
    }

    /// Skips whitespace, comments, and compiler directives.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            while self.pos < self.source.len() && self.source[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos >= self.source.len() {
                return Ok(());
            }
            // Line comment: //
            if self.peek() == b'/' && self.peek_at(1) == b'/' {
                self.pos += 2;
                while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }
            // Block comment: /* ... */ (non-nesting in Verilog)
            if self.peek() == b'/' && self.peek_at(1) == b'*' {
                let start = self.pos;
                self.pos += 2;
                loop {
                    if self.pos >= self.source.len() {
                        return Err(self.error("unterminated block comment", start));
                    }
                    if self.source[self.pos] == b'*' && self.peek_at(1) == b'/' {
                        self.pos += 2;
                        break;
                    }
                    self.pos += 1;
                }
                continue;
            }
            // Compiler directive: `identifier, skipped to end of line
            if self.peek() == b'`' {
                while self.pos < self.source.len() && self.source[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }
            return Ok(());
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let b = self.peek();

        if is_ident_start(b) {
            return Ok(self.lex_identifier_or_keyword(start));
        }
        if b == b'\\' {
            return self.lex_escaped_identifier(start);
        }
        if b == b'$' {
            return self.lex_system_identifier(start);
        }
        if b.is_ascii_digit() {
            return Ok(self.lex_number(start));
        }
        // Unsized based literal: 'b1010, 'hFF etc.
        if b == b'\'' {
            let next = self.peek_at(1).to_ascii_lowercase();
            if matches!(next, b'b' | b'o' | b'd' | b'h' | b's') {
                return Ok(self.lex_based_tail(start));
            }
        }
        if b == b'"' {
            return self.lex_string(start);
        }

        self.lex_punct(start)
    }

    fn lex_identifier_or_keyword(&mut self, start: usize) -> Token {
        while self.pos < self.source.len() && is_ident_char(self.source[self.pos]) {
            self.pos += 1;
        }
        let text = &self.text[start..self.pos];
        let kind = lookup_keyword(text).unwrap_or(TokenKind::Identifier);
        Token {
            kind,
            span: self.span_from(start),
        }
    }

    fn lex_escaped_identifier(&mut self, start: usize) -> Result<Token, ParseError> {
        self.pos += 1; // skip backslash
                       // Extends to the next whitespace
        while self.pos < self.source.len() && !self.source[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        if self.pos == start + 1 {
            return Err(self.error("empty escaped identifier", start));
        }
        Ok(Token {
            kind: TokenKind::EscapedIdentifier,
            span: self.span_from(start),
        })
    }

    fn lex_system_identifier(&mut self, start: usize) -> Result<Token, ParseError> {
        self.pos += 1; // skip $
        if !is_ident_start(self.peek()) {
            return Err(self.error("expected identifier after '$'", start));
        }
        while self.pos < self.source.len() && is_ident_char(self.source[self.pos]) {
            self.pos += 1;
        }
        Ok(Token {
            kind: TokenKind::SystemIdentifier,
            span: self.span_from(start),
        })
    }

    fn lex_number(&mut self, start: usize) -> Token {
        self.eat_decimal_digits();

        // Sized literal: digits ' [s] base digits
        if self.peek() == b'\'' {
            let next = self.peek_at(1).to_ascii_lowercase();
            let base_at = if next == b's' {
                self.peek_at(2).to_ascii_lowercase()
            } else {
                next
            };
            if matches!(base_at, b'b' | b'o' | b'd' | b'h') {
                return self.lex_based_tail(start);
            }
        }

        // Real literal: digits.digits or digits with exponent
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            self.pos += 1;
            self.eat_decimal_digits();
            self.eat_exponent();
            return Token {
                kind: TokenKind::RealLiteral,
                span: self.span_from(start),
            };
        }
        if matches!(self.peek(), b'e' | b'E') {
            self.eat_exponent();
            return Token {
                kind: TokenKind::RealLiteral,
                span: self.span_from(start),
            };
        }

        Token {
            kind: TokenKind::IntLiteral,
            span: self.span_from(start),
        }
    }

    /// Lexes from the tick of a based literal: `'b1010`, `'sh7F`.
    ///
    /// The optional size digits before the tick have already been consumed.
    fn lex_based_tail(&mut self, start: usize) -> Token {
        self.pos += 1; // skip '
        if self.peek().to_ascii_lowercase() == b's' {
            self.pos += 1;
        }
        let base = self.peek().to_ascii_lowercase();
        if matches!(base, b'b' | b'o' | b'd' | b'h') {
            self.pos += 1;
            self.eat_based_digits(base);
        }
        Token {
            kind: TokenKind::SizedLiteral,
            span: self.span_from(start),
        }
    }

    fn eat_decimal_digits(&mut self) {
        while self.pos < self.source.len() {
            let ch = self.source[self.pos];
            if ch.is_ascii_digit() || ch == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn eat_based_digits(&mut self, base: u8) {
        while self.pos < self.source.len() {
            let ch = self.source[self.pos].to_ascii_lowercase();
            let valid = match base {
                b'b' => matches!(ch, b'0' | b'1' | b'x' | b'z' | b'?' | b'_'),
                b'o' => matches!(ch, b'0'..=b'7' | b'x' | b'z' | b'?' | b'_'),
                b'd' => ch.is_ascii_digit() || ch == b'_',
                b'h' => ch.is_ascii_hexdigit() || matches!(ch, b'x' | b'z' | b'?' | b'_'),
                _ => false,
            };
            if valid {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn eat_exponent(&mut self) {
        if matches!(self.peek(), b'e' | b'E') {
            self.pos += 1;
            if matches!(self.peek(), b'+' | b'-') {
                self.pos += 1;
            }
            self.eat_decimal_digits();
        }
    }

    fn lex_string(&mut self, start: usize) -> Result<Token, ParseError> {
        self.pos += 1; // skip opening "
        loop {
            if self.pos >= self.source.len() || self.source[self.pos] == b'\n' {
                return Err(self.error("unterminated string literal", start));
            }
            match self.source[self.pos] {
                b'\\' => self.pos += 2, // C-style escape
                b'"' => {
                    self.pos += 1;
                    return Ok(Token {
                        kind: TokenKind::StringLiteral,
                        span: self.span_from(start),
                    });
                }
                _ => self.pos += 1,
            }
        }
    }

    fn lex_punct(&mut self, start: usize) -> Result<Token, ParseError> {
        let b = self.peek();
        let kind = match b {
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b'#' => TokenKind::Hash,
            b'=' => TokenKind::Equals,
            b'+' | b'-' | b'*' | b'/' | b'%' | b'<' | b'>' | b'!' | b'&' | b'|' | b'^' | b'~'
            | b'?' | b'@' | b'.' | b'{' | b'}' | b'\'' => TokenKind::Punct,
            _ => {
                return Err(self.error(
                    &format!("unrecognized character '{}'", b as char),
                    start,
                ))
            }
        };
        self.pos += 1;
        Ok(Token {
            kind,
            span: self.span_from(start),
        })
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
