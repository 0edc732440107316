//! Port extraction and testbench artifact generation.
//!
//! This crate turns a parsed Verilog module interface into a normalized
//! [`PortTable`] and deterministically generates three artifacts from it:
//! a human-readable summary, a typed Rust driver that writes cycle-accurate
//! SystemVerilog testbenches, and a proptest harness that exercises the
//! driver with randomized stimulus. It also hosts the driver runtime the
//! generated code calls into.
//!
//! # Usage
//!
//! ```ignore
//! use tbforge_core::{extract_from_path, generate};
//!
//! let table = extract_from_path(Path::new("counter.v"), "counter")?;
//! for artifact in generate(&table) {
//!     fs::write(out_dir.join(&artifact.file_name), &artifact.content)?;
//! }
//! ```
//!
//! # Modules
//!
//! - `error`: extraction error types
//! - `port`: `Port`, `PortDirection`, and the ordered `PortTable`
//! - `extract`: builds a `PortTable` from the parsed AST
//! - `generate`: summary, driver, and harness text generation
//! - `testbench`: testbench rendering and the shared drive runtime

#![warn(missing_docs)]

pub mod error;
pub mod extract;
pub mod generate;
pub mod port;
pub mod testbench;

pub use error::Error;
pub use extract::{extract, extract_from_path};
pub use generate::{generate, render_driver, render_harness, render_summary, Artifact, ArtifactKind};
pub use port::{Port, PortDirection, PortTable};
pub use testbench::{drive, DriveConfig, SequenceBundle, TestbenchRun};
