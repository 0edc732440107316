//! Artifact generation from a port table.
//!
//! Three deterministic, pure text generators (the interface [`summary`],
//! the typed [`driver`] wrapper, and the proptest [`harness`]) plus the
//! [`Artifact`] wrapper pairing generated text with its kind and
//! conventional file name. Every generator derives only from the shared
//! [`PortTable`], so the artifacts agree on the interface by construction.
//!
//! [`summary`]: render_summary
//! [`driver`]: render_driver
//! [`harness`]: render_harness

mod driver;
mod harness;
mod summary;

pub use driver::render_driver;
pub use harness::render_harness;
pub use summary::render_summary;

use serde::{Deserialize, Serialize};

use crate::port::PortTable;

/// Kind of a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// Human-readable interface summary (Markdown).
    Summary,
    /// Rust driver source defining `drive_<module>`.
    Driver,
    /// Rust proptest harness source exercising the driver.
    Harness,
}

impl ArtifactKind {
    /// Conventional file name of this artifact for a module.
    ///
    /// Module names are sanitized the same way generated identifiers are,
    /// so the harness `#[path]` import always matches the driver's file
    /// name.
    pub fn file_name(&self, module: &str) -> String {
        let module = rust_ident(module);
        match self {
            ArtifactKind::Summary => format!("{module}_summary.md"),
            ArtifactKind::Driver => format!("{module}_interface.rs"),
            ArtifactKind::Harness => format!("{module}_harness.rs"),
        }
    }
}

/// One generated artifact: its kind, file name, and full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// What the artifact is.
    pub kind: ArtifactKind,
    /// Conventional file name for the module it was generated from.
    pub file_name: String,
    /// Complete artifact text.
    pub content: String,
}

/// Generates the three artifacts for a module interface.
///
/// Returned in summary, driver, harness order.
pub fn generate(table: &PortTable) -> Vec<Artifact> {
    let make = |kind: ArtifactKind, content: String| Artifact {
        kind,
        file_name: kind.file_name(table.module()),
        content,
    };
    vec![
        make(ArtifactKind::Summary, render_summary(table)),
        make(ArtifactKind::Driver, render_driver(table)),
        make(ArtifactKind::Harness, render_harness(table)),
    ]
}

/// Maps a Verilog identifier to a legal Rust identifier.
///
/// Verilog identifiers may contain `$`; any character that is not
/// alphanumeric or `_` becomes `_`. Bundle keys and port table entries
/// keep the original spelling.
fn rust_ident(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
