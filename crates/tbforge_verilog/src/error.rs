//! Parse error type for the interface parser.

use thiserror::Error;

/// An error produced while lexing or parsing Verilog source text.
///
/// The parser fails fast: the first syntax error aborts the parse, since a
/// partially parsed file cannot yield a trustworthy port interface. Line
/// and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct ParseError {
    /// Human-readable description of the problem.
    pub message: String,
    /// 1-based line number of the offending position.
    pub line: u32,
    /// 1-based column number of the offending position.
    pub column: u32,
}

impl ParseError {
    /// Creates a parse error at the given byte offset into `source`.
    pub fn at(source: &str, offset: u32, message: impl Into<String>) -> Self {
        let (line, column) = position(source, offset);
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Computes the 1-based (line, column) of a byte offset in `source`.
///
/// Offsets past the end of the source resolve to the position just after
/// the last byte.
fn position(source: &str, offset: u32) -> (u32, u32) {
    let offset = (offset as usize).min(source.len());
    let mut line = 1;
    let mut column = 1;
    for b in source.as_bytes()[..offset].iter() {
        if *b == b'\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}
