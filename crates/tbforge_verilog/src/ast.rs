//! AST node types for the interface parser.
//!
//! The tree covers exactly what interface extraction needs: module names
//! and port declarations. Module bodies are not represented beyond the
//! port declarations a non-ANSI module keeps there. Every node carries a
//! [`Span`] into the source text.

use serde::{Deserialize, Serialize};

use crate::token::Span;

/// A parsed Verilog source file, reduced to its module interfaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// The modules declared in this file, in source order.
    pub modules: Vec<ModuleDecl>,
}

impl SourceFile {
    /// Finds a module by name.
    pub fn module(&self, name: &str) -> Option<&ModuleDecl> {
        self.modules.iter().find(|m| m.name == name)
    }
}

/// A module declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDecl {
    /// The module name.
    pub name: String,
    /// Port style: ANSI (declarations in the header) or non-ANSI
    /// (names in the header, declarations in the body).
    pub port_style: PortStyle,
    /// Port declarations: from the header for ANSI modules, from the
    /// body for non-ANSI modules.
    pub ports: Vec<PortDecl>,
    /// Header port names (non-ANSI modules only; empty otherwise).
    pub port_names: Vec<String>,
    /// Source span of the whole declaration.
    pub span: Span,
}

/// Whether ports are declared ANSI-style (inline) or non-ANSI (separate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortStyle {
    /// ANSI port declarations: `module m(input a, output b);`
    Ansi,
    /// Non-ANSI port list: `module m(a, b);` with body declarations.
    NonAnsi,
    /// No ports: `module m;` or `module m();`
    Empty,
}

/// A port declaration, covering one or more names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortDecl {
    /// Port direction.
    pub direction: Direction,
    /// Optional net/variable type (`wire`, `reg`, `logic`, ...).
    pub net_type: Option<NetType>,
    /// Whether this port is `signed`.
    pub signed: bool,
    /// Optional bit range (e.g., `[7:0]`).
    pub range: Option<Range>,
    /// Port names declared by this entry (`input a, b` yields two).
    pub names: Vec<String>,
    /// Source span.
    pub span: Span,
}

/// Port direction keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
}

/// Net or variable type keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetType {
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
}

/// A bit range: `[msb:lsb]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Range {
    /// The most-significant-bit bound.
    pub msb: Bound,
    /// The least-significant-bit bound.
    pub lsb: Bound,
    /// Source span including the brackets.
    pub span: Span,
}

/// One bound of a bit range.
///
/// Extraction only needs to know whether a bound is a literal integer;
/// anything else (parameter references, arithmetic, `$clog2` calls) is
/// kept as its source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bound {
    /// A literal integer bound, e.g. the `7` in `[7:0]`.
    Literal(u64),
    /// A symbolic bound, e.g. `WIDTH-1`. Holds the source text.
    Symbolic(String),
}

impl Bound {
    /// Returns the literal value, if this bound is one.
    pub fn as_literal(&self) -> Option<u64> {
        match self {
            Bound::Literal(v) => Some(*v),
            Bound::Symbolic(_) => None,
        }
    }
}
