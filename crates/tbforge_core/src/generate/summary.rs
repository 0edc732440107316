//! Interface summary generation.

use std::fmt::Write;

use crate::port::PortTable;

/// Renders a human-readable interface summary as Markdown text.
///
/// Ports are listed alphabetically so the table reads the same regardless
/// of declaration order. Widths are reported as `<n>-bit`. The trailing
/// sections are fixed placeholders meant to be filled in by hand.
pub fn render_summary(table: &PortTable) -> String {
    let module = table.module();
    let mut out = String::new();

    writeln!(out, "# {module}").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Hardware description for the {module} Verilog module.").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Ports:").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "| {:<12} | {:<13} | {:<7} |", "Port", "Direction", "Width").unwrap();
    writeln!(
        out,
        "|{}|{}|{}|",
        "-".repeat(14),
        "-".repeat(15),
        "-".repeat(9)
    )
    .unwrap();
    for port in table.sorted_by_name() {
        let width = format!("{}-bit", port.width);
        writeln!(
            out,
            "| {:<12} | {:<13} | {:<7} |",
            port.name, port.direction, width
        )
        .unwrap();
    }
    writeln!(out).unwrap();
    writeln!(out, "Functional Description:").unwrap();
    writeln!(out, "    [Add detailed description of module functionality here]").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Parameters:").unwrap();
    writeln!(out, "    [List any module parameters here]").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "Timing Characteristics:").unwrap();
    writeln!(out, "    [Add timing requirements and characteristics]").unwrap();

    out
}
