//! Testbench rendering and the shared drive runtime.
//!
//! [`render`] turns a [`PortTable`] plus a [`SequenceBundle`] of per-port
//! value sequences into SystemVerilog testbench text. [`drive`] wraps it
//! with the on-disk protocol used by generated driver functions: pick the
//! next free testbench index in the output directory, write the `.sv` file,
//! and report where the VCD dump will land.
//!
//! Rendering is deterministic: the same table and bundle always produce
//! byte-identical text, so generated testbenches diff cleanly across runs.

use std::fmt::Write;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::port::{Port, PortTable};

/// Per-port value sequences for one testbench run.
///
/// Input sequences are stimulus to apply; output sequences are expected
/// values to check. The number of cycles a testbench exercises is the
/// length of the shortest sequence in the bundle, so mismatched lengths
/// never index past the end of any sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceBundle {
    sequences: IndexMap<String, Vec<u64>>,
}

impl SequenceBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value sequence for the named port, replacing any previous one.
    pub fn insert(&mut self, port: impl Into<String>, values: Vec<u64>) {
        self.sequences.insert(port.into(), values);
    }

    /// Returns the sequence for a port, if one was provided.
    pub fn get(&self, port: &str) -> Option<&[u64]> {
        self.sequences.get(port).map(Vec::as_slice)
    }

    /// Whether a sequence was provided for the named port.
    pub fn contains(&self, port: &str) -> bool {
        self.sequences.contains_key(port)
    }

    /// Number of sequences in the bundle.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Whether the bundle holds no sequences.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Number of cycles the bundle can drive.
    ///
    /// This is the length of the shortest sequence, or 0 for an empty
    /// bundle.
    pub fn num_cycles(&self) -> usize {
        self.sequences.values().map(Vec::len).min().unwrap_or(0)
    }
}

/// Formats a value as a Verilog literal sized for `port`.
///
/// Single-bit ports get binary literals (`1'b0`, `1'b1`); wider ports get
/// decimal literals (`8'd255`). Values beyond the port's range are clamped
/// to [`Port::max_value`] so the emitted literal always fits the signal it
/// drives.
pub fn verilog_literal(port: &Port, value: u64) -> String {
    let value = value.min(port.max_value());
    if port.width == 1 {
        format!("1'b{value}")
    } else {
        format!("{}'d{value}", port.width)
    }
}

/// Renders a complete testbench module as SystemVerilog text.
///
/// Declares one `logic` signal per port in declaration order, instantiates
/// the module under test, sets up VCD dumping into `dump_file`, and emits
/// one stimulus block per cycle: input assignments, output checks via
/// `$error`, a `#1` settle delay, and a cycle counter increment. Ports
/// without a sequence in the bundle are declared and connected but neither
/// driven nor checked.
pub fn render(table: &PortTable, bundle: &SequenceBundle, dump_file: &str) -> String {
    let module = table.module();
    let num_cycles = bundle.num_cycles();
    let mut out = String::new();

    writeln!(out, "// Auto-generated testbench for {module}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "`timescale 1ns/1ps").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "module {module}_tb;").unwrap();
    writeln!(out).unwrap();

    for port in table.iter() {
        if port.width == 1 {
            writeln!(out, "    logic {};", port.name).unwrap();
        } else {
            writeln!(out, "    logic [{}:0] {};", port.width - 1, port.name).unwrap();
        }
    }
    writeln!(out, "    integer cycle;  // Test cycle counter").unwrap();
    writeln!(out).unwrap();

    let connections: Vec<String> = table
        .iter()
        .map(|p| format!(".{}({})", p.name, p.name))
        .collect();
    writeln!(out, "    // Instantiate DUT").unwrap();
    writeln!(out, "    {module} dut ({});", connections.join(", ")).unwrap();
    writeln!(out).unwrap();

    writeln!(out, "    // VCD Dumping").unwrap();
    writeln!(out, "    initial begin").unwrap();
    writeln!(out, "        $dumpfile(\"{dump_file}\");").unwrap();
    writeln!(out, "        $dumpvars(0, {module}_tb);").unwrap();
    writeln!(out, "    end").unwrap();
    writeln!(out).unwrap();

    writeln!(out, "    initial begin").unwrap();
    writeln!(out, "        cycle = 0;  // Initialize counter").unwrap();

    for cycle in 0..num_cycles {
        writeln!(out).unwrap();
        for port in table.inputs() {
            if let Some(values) = bundle.get(&port.name) {
                let literal = verilog_literal(port, values[cycle]);
                writeln!(out, "        {} = {literal};", port.name).unwrap();
            }
        }
        for port in table.outputs() {
            if let Some(values) = bundle.get(&port.name) {
                let literal = verilog_literal(port, values[cycle]);
                writeln!(out, "        if ({} !== {literal}) begin", port.name).unwrap();
                writeln!(
                    out,
                    "            $error(\"Cycle %0d: {}: expected=%0d, actual=%0d\", cycle, {literal}, {});",
                    port.name, port.name
                )
                .unwrap();
                writeln!(out, "        end").unwrap();
            }
        }
        writeln!(out, "        #1;  // Wait for signals to propagate").unwrap();
        writeln!(out, "        cycle = cycle + 1;  // Next test cycle").unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "        $finish;").unwrap();
    writeln!(out, "    end").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "endmodule").unwrap();

    out
}

/// Output locations for [`drive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveConfig {
    /// Directory testbench `.sv` files are written to.
    pub testbench_dir: PathBuf,
    /// Directory the testbench will write its VCD dump to.
    pub dump_dir: PathBuf,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            testbench_dir: PathBuf::from("gen/tests"),
            dump_dir: PathBuf::from("gen/dump"),
        }
    }
}

/// Paths and cycle count of one written testbench.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestbenchRun {
    /// Path of the written `.sv` testbench.
    pub testbench_path: PathBuf,
    /// Path the testbench will write its VCD dump to.
    pub dump_path: PathBuf,
    /// Number of stimulus cycles the testbench exercises.
    pub num_cycles: usize,
}

/// Renders a testbench and writes it to the next free numbered slot.
///
/// Testbenches are numbered `<module>_tb_0.sv`, `<module>_tb_1.sv`, ... in
/// the configured directory; the VCD dump shares the index. The index is
/// found by scanning existing files, so earlier runs are never
/// overwritten. Concurrent writers into the same directory can still race
/// for a slot; a single generating process is assumed.
pub fn drive(
    table: &PortTable,
    bundle: &SequenceBundle,
    config: &DriveConfig,
) -> io::Result<TestbenchRun> {
    fs::create_dir_all(&config.testbench_dir)?;
    fs::create_dir_all(&config.dump_dir)?;

    let index = next_index(&config.testbench_dir, table.module());
    let testbench_path = config
        .testbench_dir
        .join(format!("{}_tb_{index}.sv", table.module()));
    let dump_path = config
        .dump_dir
        .join(format!("{}_tb_{index}.vcd", table.module()));

    let text = render(table, bundle, &dump_path.display().to_string());
    fs::write(&testbench_path, text)?;

    Ok(TestbenchRun {
        testbench_path,
        dump_path,
        num_cycles: bundle.num_cycles(),
    })
}

/// First index with no existing `<module>_tb_<index>.sv` in `dir`.
fn next_index(dir: &Path, module: &str) -> u32 {
    let mut index = 0u32;
    while dir.join(format!("{module}_tb_{index}.sv")).exists() {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortDirection;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn counter_table() -> PortTable {
        let mut t = PortTable::new("counter");
        t.insert(Port::new("clk", PortDirection::Input, 1));
        t.insert(Port::new("rst_n", PortDirection::Input, 1));
        t.insert(Port::new("count", PortDirection::Output, 8));
        t
    }

    fn counter_bundle() -> SequenceBundle {
        let mut b = SequenceBundle::new();
        b.insert("clk", vec![0, 1]);
        b.insert("rst_n", vec![1, 1]);
        b.insert("count", vec![0, 200]);
        b
    }

    #[test]
    fn scalar_literals_are_binary() {
        let p = Port::new("clk", PortDirection::Input, 1);
        assert_eq!(verilog_literal(&p, 0), "1'b0");
        assert_eq!(verilog_literal(&p, 1), "1'b1");
    }

    #[test]
    fn vector_literals_are_decimal() {
        let p = Port::new("data", PortDirection::Input, 8);
        assert_eq!(verilog_literal(&p, 200), "8'd200");
        assert_eq!(verilog_literal(&p, 0), "8'd0");
    }

    #[test]
    fn literals_clamp_to_port_range() {
        let p = Port::new("nib", PortDirection::Input, 4);
        assert_eq!(verilog_literal(&p, 300), "4'd15");
        let p = Port::new("clk", PortDirection::Input, 1);
        assert_eq!(verilog_literal(&p, 5), "1'b1");
        let p = Port::new("wide", PortDirection::Input, 64);
        assert_eq!(verilog_literal(&p, u64::MAX), format!("64'd{}", u64::MAX));
    }

    #[test]
    fn num_cycles_is_shortest_sequence() {
        let mut b = SequenceBundle::new();
        b.insert("a", vec![0; 12]);
        b.insert("b", vec![0; 7]);
        b.insert("c", vec![0; 20]);
        assert_eq!(b.num_cycles(), 7);
    }

    #[test]
    fn empty_bundle_has_zero_cycles() {
        assert_eq!(SequenceBundle::new().num_cycles(), 0);
    }

    #[test]
    fn render_testbench_shell() {
        let text = render(&counter_table(), &counter_bundle(), "dump/counter_tb_0.vcd");
        assert!(text.contains("// Auto-generated testbench for counter"));
        assert!(text.contains("`timescale 1ns/1ps"));
        assert!(text.contains("module counter_tb;"));
        assert!(text.contains("    logic clk;"));
        assert!(text.contains("    logic [7:0] count;"));
        assert!(text.contains("    integer cycle;  // Test cycle counter"));
        assert!(text.contains("    counter dut (.clk(clk), .rst_n(rst_n), .count(count));"));
        assert!(text.contains("$dumpfile(\"dump/counter_tb_0.vcd\");"));
        assert!(text.contains("$dumpvars(0, counter_tb);"));
        assert!(text.contains("$finish;"));
        assert!(text.ends_with("endmodule\n"));
    }

    #[test]
    fn render_stimulus_and_checks() {
        let text = render(&counter_table(), &counter_bundle(), "d.vcd");
        assert!(text.contains("        clk = 1'b0;"));
        assert!(text.contains("        clk = 1'b1;"));
        assert!(text.contains("        rst_n = 1'b1;"));
        assert!(text.contains("        if (count !== 8'd200) begin"));
        assert!(text.contains(
            "$error(\"Cycle %0d: count: expected=%0d, actual=%0d\", cycle, 8'd200, count);"
        ));
        assert!(text.contains("        #1;  // Wait for signals to propagate"));
        assert!(text.contains("        cycle = cycle + 1;  // Next test cycle"));
    }

    #[test]
    fn render_skips_unchecked_outputs() {
        let mut bundle = SequenceBundle::new();
        bundle.insert("clk", vec![0, 1]);
        bundle.insert("rst_n", vec![1, 1]);
        let text = render(&counter_table(), &bundle, "d.vcd");
        assert!(text.contains("    logic [7:0] count;"));
        assert!(text.contains(".count(count)"));
        assert!(!text.contains("$error"));
    }

    #[test]
    fn render_connects_bidirectional_without_driving() {
        let mut table = counter_table();
        table.insert(Port::new("bus", PortDirection::Bidirectional, 4));
        let text = render(&table, &counter_bundle(), "d.vcd");
        assert!(text.contains("    logic [3:0] bus;"));
        assert!(text.contains(".bus(bus)"));
        assert!(!text.contains("bus = "));
        assert!(!text.contains("bus !=="));
    }

    #[test]
    fn render_empty_bundle_still_emits_shell() {
        let text = render(&counter_table(), &SequenceBundle::new(), "d.vcd");
        assert!(text.contains("module counter_tb;"));
        assert!(text.contains("$finish;"));
        assert!(!text.contains("clk = 1'b"));
    }

    #[test]
    fn render_is_deterministic() {
        let a = render(&counter_table(), &counter_bundle(), "d.vcd");
        let b = render(&counter_table(), &counter_bundle(), "d.vcd");
        assert_eq!(a, b);
    }

    #[test]
    fn drive_writes_numbered_testbench() {
        let dir = TempDir::new().unwrap();
        let config = DriveConfig {
            testbench_dir: dir.path().join("tests"),
            dump_dir: dir.path().join("dump"),
        };
        let run = drive(&counter_table(), &counter_bundle(), &config).unwrap();
        assert_eq!(run.testbench_path, config.testbench_dir.join("counter_tb_0.sv"));
        assert_eq!(run.dump_path, config.dump_dir.join("counter_tb_0.vcd"));
        assert_eq!(run.num_cycles, 2);
        let text = fs::read_to_string(&run.testbench_path).unwrap();
        assert!(text.contains("module counter_tb;"));

        let run = drive(&counter_table(), &counter_bundle(), &config).unwrap();
        assert_eq!(run.testbench_path, config.testbench_dir.join("counter_tb_1.sv"));
    }

    #[test]
    fn drive_skips_existing_indices() {
        let dir = TempDir::new().unwrap();
        let config = DriveConfig {
            testbench_dir: dir.path().to_path_buf(),
            dump_dir: dir.path().to_path_buf(),
        };
        fs::write(dir.path().join("counter_tb_0.sv"), "x").unwrap();
        fs::write(dir.path().join("counter_tb_1.sv"), "x").unwrap();
        let run = drive(&counter_table(), &counter_bundle(), &config).unwrap();
        assert_eq!(run.testbench_path, dir.path().join("counter_tb_2.sv"));
    }

    #[test]
    fn drive_numbering_is_per_module() {
        let dir = TempDir::new().unwrap();
        let config = DriveConfig {
            testbench_dir: dir.path().to_path_buf(),
            dump_dir: dir.path().to_path_buf(),
        };
        drive(&counter_table(), &counter_bundle(), &config).unwrap();
        let mut other = PortTable::new("mux");
        other.insert(Port::new("sel", PortDirection::Input, 2));
        let mut bundle = SequenceBundle::new();
        bundle.insert("sel", vec![0]);
        let run = drive(&other, &bundle, &config).unwrap();
        assert_eq!(run.testbench_path, dir.path().join("mux_tb_0.sv"));
    }

    proptest! {
        #[test]
        fn literal_always_fits_port(width in 1u32..=64, value in any::<u64>()) {
            let port = Port::new("p", PortDirection::Input, width);
            let literal = verilog_literal(&port, value);
            let digits = literal.rsplit(['b', 'd']).next().unwrap();
            let parsed: u64 = digits.parse().unwrap();
            prop_assert!(parsed <= port.max_value());
        }

        #[test]
        fn cycle_count_never_exceeds_any_sequence(
            a in 1usize..40,
            b in 1usize..40,
            c in 1usize..40,
        ) {
            let mut bundle = SequenceBundle::new();
            bundle.insert("x", vec![0; a]);
            bundle.insert("y", vec![0; b]);
            bundle.insert("z", vec![0; c]);
            let n = bundle.num_cycles();
            prop_assert_eq!(n, a.min(b).min(c));
        }
    }
}
