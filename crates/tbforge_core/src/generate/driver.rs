//! Driver artifact generation.
//!
//! Emits a Rust source file containing `drive_<module>`, a statically
//! typed wrapper over [`drive`](crate::testbench::drive). Input ports
//! become required `&[u64]` sequence arguments and output ports become
//! optional expected-value arguments, inputs before outputs, each group in
//! declaration order. Bidirectional ports take no argument; they are
//! declared and connected in the testbench but never driven or checked.
//!
//! The generated body rebuilds the port table literally and does keyed
//! bundle inserts, so every port reference in the artifact is spelled out
//! at generation time.

use std::fmt::Write;

use crate::port::PortTable;

use super::rust_ident;

/// Renders the driver source for a module interface.
pub fn render_driver(table: &PortTable) -> String {
    let module = table.module();
    let fn_name = rust_ident(module);
    let has_ports = !table.is_empty();
    let has_sequences = table.inputs().count() + table.outputs().count() > 0;
    let mut out = String::new();

    writeln!(out, "// Auto-generated driver for the {module} module interface.").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "use std::io;").unwrap();
    writeln!(out).unwrap();
    writeln!(
        out,
        "use tbforge_core::testbench::{{drive, DriveConfig, SequenceBundle, TestbenchRun}};"
    )
    .unwrap();
    if has_ports {
        writeln!(out, "use tbforge_core::{{Port, PortDirection, PortTable}};").unwrap();
    } else {
        writeln!(out, "use tbforge_core::PortTable;").unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "/// Writes a numbered testbench exercising `{module}`.").unwrap();
    writeln!(out, "///").unwrap();
    writeln!(out, "/// Input sequences are required stimulus; output sequences are optional").unwrap();
    writeln!(out, "/// expected values checked with `$error`. The testbench runs for as many").unwrap();
    writeln!(out, "/// cycles as the shortest provided sequence.").unwrap();
    if has_sequences {
        writeln!(out, "pub fn drive_{fn_name}(").unwrap();
        for port in table.inputs() {
            writeln!(out, "    {}_seq: &[u64],", rust_ident(&port.name)).unwrap();
        }
        for port in table.outputs() {
            writeln!(out, "    {}_seq: Option<&[u64]>,", rust_ident(&port.name)).unwrap();
        }
        writeln!(out, ") -> io::Result<TestbenchRun> {{").unwrap();
    } else {
        writeln!(out, "pub fn drive_{fn_name}() -> io::Result<TestbenchRun> {{").unwrap();
    }

    if has_ports {
        writeln!(out, "    let mut table = PortTable::new(\"{module}\");").unwrap();
    } else {
        writeln!(out, "    let table = PortTable::new(\"{module}\");").unwrap();
    }
    for port in table.iter() {
        writeln!(
            out,
            "    table.insert(Port::new(\"{}\", PortDirection::{}, {}));",
            port.name, port.direction, port.width
        )
        .unwrap();
    }
    writeln!(out).unwrap();

    if has_sequences {
        writeln!(out, "    let mut bundle = SequenceBundle::new();").unwrap();
    } else {
        writeln!(out, "    let bundle = SequenceBundle::new();").unwrap();
    }
    for port in table.inputs() {
        writeln!(
            out,
            "    bundle.insert(\"{}\", {}_seq.to_vec());",
            port.name,
            rust_ident(&port.name)
        )
        .unwrap();
    }
    for port in table.outputs() {
        writeln!(out, "    if let Some(values) = {}_seq {{", rust_ident(&port.name)).unwrap();
        writeln!(out, "        bundle.insert(\"{}\", values.to_vec());", port.name).unwrap();
        writeln!(out, "    }}").unwrap();
    }
    writeln!(out).unwrap();

    writeln!(out, "    let run = drive(&table, &bundle, &DriveConfig::default())?;").unwrap();
    writeln!(
        out,
        "    println!(\"Testbench generated: {{}}\", run.testbench_path.display());"
    )
    .unwrap();
    writeln!(out, "    println!(\"VCD dump file: {{}}\", run.dump_path.display());").unwrap();
    writeln!(out, "    Ok(run)").unwrap();
    writeln!(out, "}}").unwrap();

    out
}
