//! Proptest harness artifact generation.
//!
//! Emits a Rust test file that feeds the generated driver randomized
//! stimulus: random bit sequences for 1-bit inputs, bounded random values
//! for wider inputs, and all-zero expected-value placeholders for outputs
//! (meant to be replaced with a real model of the module). Sequences are
//! reconciled to the shortest before the driver call, mirroring the
//! reconciliation the runtime performs.
//!
//! The embedded proptest config runs 20 cases with wall-clock limits
//! disabled, because every trial writes a testbench file to disk.

use std::fmt::Write;

use crate::port::{Port, PortTable};

use super::rust_ident;

/// Renders the property-based harness source for a module interface.
pub fn render_harness(table: &PortTable) -> String {
    let module = table.module();
    let fn_name = rust_ident(module);
    let mut out = String::new();

    writeln!(
        out,
        "// Auto-generated proptest harness for the {module} module interface."
    )
    .unwrap();
    writeln!(out).unwrap();

    let sequenced: Vec<&Port> = table.inputs().chain(table.outputs()).collect();
    if sequenced.is_empty() {
        writeln!(out, "#[path = \"{fn_name}_interface.rs\"]").unwrap();
        writeln!(out, "mod {fn_name}_interface;").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "use {fn_name}_interface::drive_{fn_name};").unwrap();
        writeln!(out).unwrap();
        writeln!(out, "#[test]").unwrap();
        writeln!(out, "fn drive_{fn_name}_runs() {{").unwrap();
        writeln!(out, "    let run = drive_{fn_name}().expect(\"driver failed\");").unwrap();
        writeln!(out, "    assert_eq!(run.num_cycles, 0);").unwrap();
        writeln!(out, "}}").unwrap();
        return out;
    }

    writeln!(out, "use proptest::prelude::*;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#[path = \"{fn_name}_interface.rs\"]").unwrap();
    writeln!(out, "mod {fn_name}_interface;").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "use {fn_name}_interface::drive_{fn_name};").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "proptest! {{").unwrap();
    writeln!(out, "    #![proptest_config(ProptestConfig {{").unwrap();
    writeln!(out, "        cases: 20,").unwrap();
    writeln!(out, "        timeout: 0,").unwrap();
    writeln!(out, "        max_shrink_time: 0,").unwrap();
    writeln!(out, "        .. ProptestConfig::default()").unwrap();
    writeln!(out, "    }})]").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "    #[test]").unwrap();
    writeln!(out, "    fn drive_{fn_name}_accepts_random_sequences(").unwrap();
    for port in table.inputs() {
        let arg = rust_ident(&port.name);
        if port.width == 1 {
            writeln!(
                out,
                "        {arg}_seq in prop::collection::vec(any::<bool>(), 10..=100)"
            )
            .unwrap();
            writeln!(
                out,
                "            .prop_map(|v| v.into_iter().map(u64::from).collect::<Vec<u64>>()),"
            )
            .unwrap();
        } else {
            writeln!(
                out,
                "        {arg}_seq in prop::collection::vec(0u64..={}u64, 10..=100),",
                port.max_value()
            )
            .unwrap();
        }
    }
    for port in table.outputs() {
        let arg = rust_ident(&port.name);
        writeln!(out, "        {arg}_seq in Just(vec![0u64; 100]),").unwrap();
    }
    writeln!(out, "    ) {{").unwrap();

    let mut lens = sequenced
        .iter()
        .map(|p| format!("{}_seq.len()", rust_ident(&p.name)));
    let first = lens.next().unwrap();
    let chain: String = lens.map(|l| format!(".min({l})")).collect();
    writeln!(out, "        let num_cycles = {first}{chain};").unwrap();

    writeln!(out, "        let run = drive_{fn_name}(").unwrap();
    for port in table.inputs() {
        writeln!(out, "            &{}_seq[..num_cycles],", rust_ident(&port.name)).unwrap();
    }
    for port in table.outputs() {
        writeln!(
            out,
            "            Some(&{}_seq[..num_cycles]),",
            rust_ident(&port.name)
        )
        .unwrap();
    }
    writeln!(out, "        )").unwrap();
    writeln!(out, "        .expect(\"driver failed\");").unwrap();
    writeln!(out, "        prop_assert_eq!(run.num_cycles, num_cycles);").unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "}}").unwrap();

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortDirection;

    fn counter_table() -> PortTable {
        let mut t = PortTable::new("counter");
        t.insert(Port::new("clk", PortDirection::Input, 1));
        t.insert(Port::new("rst_n", PortDirection::Input, 1));
        t.insert(Port::new("count", PortDirection::Output, 8));
        t
    }

    #[test]
    fn harness_imports_driver_by_path() {
        let text = render_harness(&counter_table());
        assert!(text.contains("#[path = \"counter_interface.rs\"]"));
        assert!(text.contains("mod counter_interface;"));
        assert!(text.contains("use counter_interface::drive_counter;"));
    }

    #[test]
    fn harness_config_disables_time_limits() {
        let text = render_harness(&counter_table());
        assert!(text.contains("cases: 20,"));
        assert!(text.contains("timeout: 0,"));
        assert!(text.contains("max_shrink_time: 0,"));
        assert!(text.contains(".. ProptestConfig::default()"));
    }

    #[test]
    fn harness_scalar_inputs_use_bool_strategy() {
        let text = render_harness(&counter_table());
        assert!(text.contains("clk_seq in prop::collection::vec(any::<bool>(), 10..=100)"));
        assert!(text.contains(".prop_map(|v| v.into_iter().map(u64::from).collect::<Vec<u64>>()),"));
    }

    #[test]
    fn harness_vector_inputs_use_bounded_strategy() {
        let mut table = counter_table();
        table.insert(Port::new("data", PortDirection::Input, 8));
        let text = render_harness(&table);
        assert!(text.contains("data_seq in prop::collection::vec(0u64..=255u64, 10..=100),"));
    }

    #[test]
    fn harness_outputs_use_zero_placeholders() {
        let text = render_harness(&counter_table());
        assert!(text.contains("count_seq in Just(vec![0u64; 100]),"));
    }

    #[test]
    fn harness_reconciles_to_shortest_sequence() {
        let text = render_harness(&counter_table());
        assert!(text.contains(
            "let num_cycles = clk_seq.len().min(rst_n_seq.len()).min(count_seq.len());"
        ));
        assert!(text.contains("&clk_seq[..num_cycles],"));
        assert!(text.contains("Some(&count_seq[..num_cycles]),"));
        assert!(text.contains("prop_assert_eq!(run.num_cycles, num_cycles);"));
    }

    #[test]
    fn harness_single_input_min_chain() {
        let mut table = PortTable::new("inv");
        table.insert(Port::new("a", PortDirection::Input, 1));
        let text = render_harness(&table);
        assert!(text.contains("let num_cycles = a_seq.len();"));
    }

    #[test]
    fn harness_for_empty_interface_is_plain_test() {
        let text = render_harness(&PortTable::new("stub"));
        assert!(!text.contains("proptest!"));
        assert!(text.contains("#[test]"));
        assert!(text.contains("fn drive_stub_runs() {"));
        assert!(text.contains("let run = drive_stub().expect(\"driver failed\");"));
        assert!(text.contains("assert_eq!(run.num_cycles, 0);"));
    }

    #[test]
    fn harness_ignores_bidirectional_ports() {
        let mut table = counter_table();
        table.insert(Port::new("bus", PortDirection::Bidirectional, 4));
        let text = render_harness(&table);
        assert!(!text.contains("bus_seq"));
    }

    #[test]
    fn harness_is_deterministic() {
        assert_eq!(
            render_harness(&counter_table()),
            render_harness(&counter_table())
        );
    }
}
