//! Interface-focused Verilog parser.
//!
//! This crate parses Verilog source just deeply enough to recover module
//! port interfaces: module names, port names, directions, and bit ranges.
//! Module bodies are scanned rather than parsed, so arbitrary synthesizable
//! (or behavioral) content is accepted without a full expression grammar.
//! The main entry point is [`parse_source`], which takes source text and
//! returns a [`SourceFile`].
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): Converts source text to tokens, handling
//!   case-sensitive keywords, sized/based literals, escaped identifiers,
//!   comments, and compiler directives.
//! - **Parser** ([`parser`]): Recursive descent over module headers and
//!   port declarations; fails fast on the first syntax error.
//! - **AST** ([`ast`]): Interface-level node types with spans and serde
//!   support.

#![warn(missing_docs)]

/// Interface-level AST node types.
pub mod ast;
/// Parse error type with line/column positions.
pub mod error;
/// Lexical analyzer for Verilog source text.
pub mod lexer;
/// Recursive descent parser for module interfaces.
pub mod parser;
/// Token types for the Verilog lexer.
pub mod token;

pub use ast::{Bound, Direction, ModuleDecl, PortStyle, Range, SourceFile};
pub use error::ParseError;
pub use token::{Token, TokenKind};

/// Parses Verilog source text into an interface-level AST.
///
/// Lexes the source and parses every module declaration in it. Returns the
/// first lexical or syntax error encountered; a partial interface is never
/// produced.
pub fn parse_source(source: &str) -> Result<SourceFile, ParseError> {
    let tokens = lexer::lex(source)?;
    let mut parser = parser::Parser::new(tokens, source);
    parser.parse_source_file()
}
