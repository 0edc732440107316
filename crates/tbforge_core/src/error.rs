//! Error types for extraction and generation.
//!
//! Every failure mode from locating a source file through building its
//! [`PortTable`](crate::PortTable) is a variant of [`Error`]. All variants
//! are terminal: generation never runs on a partial interface, because a
//! testbench for a misread interface fails in ways that look like design
//! bugs.

use std::io;
use std::path::PathBuf;

use tbforge_verilog::ParseError;

/// Errors that can occur while extracting a module interface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested source file does not exist.
    #[error("source file not found: {}", path.display())]
    SourceNotFound {
        /// Path that was requested.
        path: PathBuf,
    },

    /// The source file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The source text could not be parsed.
    #[error("parse failure: {0}")]
    Parse(#[from] ParseError),

    /// The source parsed, but contains no module with the requested name.
    #[error("module '{name}' not found in source")]
    ModuleNotFound {
        /// The module name that was requested.
        name: String,
    },

    /// The module was found but its port list cannot be normalized.
    #[error("malformed port list in module '{module}': {detail}")]
    MalformedPortList {
        /// The module whose ports are malformed.
        module: String,
        /// Description of the defect.
        detail: String,
    },
}
