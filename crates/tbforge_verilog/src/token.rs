//! Token types and source spans for the Verilog lexer.
//!
//! Defines the [`TokenKind`] enum covering the keywords, punctuation, and
//! literals the interface parser cares about, plus the [`Token`] struct
//! pairing a kind with its source [`Span`]. Operator characters that only
//! occur inside module bodies (which the parser skips) collapse into the
//! generic [`TokenKind::Punct`] kind.

use serde::{Deserialize, Serialize};

/// A half-open byte range into the source text.
///
/// Token and AST node text is not stored directly; it is recovered by
/// slicing the source with the span.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first byte.
    pub start: u32,
    /// Byte offset one past the last byte.
    pub end: u32,
}

impl Span {
    /// Creates a span from start and end byte offsets.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns the smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A token kind.
///
/// Keywords are case-sensitive in Verilog and must appear in lowercase.
/// Literal values are not stored in the token; they are retrieved from the
/// source text using the token's span.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TokenKind {
    // === Keywords ===
    /// `module`
    Module,
    /// `endmodule`
    Endmodule,
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
    /// `wire`
    Wire,
    /// `reg`
    Reg,
    /// `tri`
    Tri,
    /// `logic`
    Logic,
    /// `integer`
    Integer,
    /// `real`
    Real,
    /// `signed`
    Signed,
    /// `parameter`
    Parameter,
    /// `localparam`
    Localparam,
    /// `function`
    Function,
    /// `endfunction`
    Endfunction,
    /// `task`
    Task,
    /// `endtask`
    Endtask,

    // === Literals ===
    /// Plain integer literal (e.g., `42`, `1_000`)
    IntLiteral,
    /// Sized/based literal (e.g., `4'b1010`, `16'hFF`, `'d10`)
    SizedLiteral,
    /// Real literal (e.g., `3.5`, `1.0e-3`)
    RealLiteral,
    /// String literal (e.g., `"hello"`)
    StringLiteral,

    // === Punctuation ===
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `#`
    Hash,
    /// `=`
    Equals,
    /// Any other operator character (`+`, `-`, `@`, `{`, `.`, ...)
    Punct,

    // === Identifiers and special ===
    /// A regular identifier (e.g., `my_signal`, `clk`)
    Identifier,
    /// An escaped identifier (e.g., `\my+signal `)
    EscapedIdentifier,
    /// A system identifier (e.g., `$display`, `$clog2`)
    SystemIdentifier,
    /// End of file
    Eof,
}

impl TokenKind {
    /// Returns `true` if this token is a direction keyword (`input`, `output`, `inout`).
    pub fn is_direction(self) -> bool {
        matches!(self, TokenKind::Input | TokenKind::Output | TokenKind::Inout)
    }

    /// Returns `true` if this token is a net/variable type keyword.
    pub fn is_net_type(self) -> bool {
        matches!(
            self,
            TokenKind::Wire
                | TokenKind::Reg
                | TokenKind::Tri
                | TokenKind::Logic
                | TokenKind::Integer
                | TokenKind::Real
        )
    }
}

/// A lexed token with its kind and source location.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Token {
    /// The kind of this token.
    pub kind: TokenKind,
    /// The source span covering this token's text.
    pub span: Span,
}

/// Looks up a keyword from an identifier string.
///
/// Returns `Some(TokenKind)` if the string matches a keyword this parser
/// recognizes, or `None` for a regular identifier. Keywords are
/// case-sensitive.
pub fn lookup_keyword(s: &str) -> Option<TokenKind> {
    match s {
        "module" => Some(TokenKind::Module),
        "endmodule" => Some(TokenKind::Endmodule),
        "input" => Some(TokenKind::Input),
        "output" => Some(TokenKind::Output),
        "inout" => Some(TokenKind::Inout),
        "wire" => Some(TokenKind::Wire),
        "reg" => Some(TokenKind::Reg),
        "tri" => Some(TokenKind::Tri),
        "logic" => Some(TokenKind::Logic),
        "integer" => Some(TokenKind::Integer),
        "real" => Some(TokenKind::Real),
        "signed" => Some(TokenKind::Signed),
        "parameter" => Some(TokenKind::Parameter),
        "localparam" => Some(TokenKind::Localparam),
        "function" => Some(TokenKind::Function),
        "endfunction" => Some(TokenKind::Endfunction),
        "task" => Some(TokenKind::Task),
        "endtask" => Some(TokenKind::Endtask),
        _ => None,
    }
}
