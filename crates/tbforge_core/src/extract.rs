//! Port interface extraction.
//!
//! Turns a parsed module declaration into a [`PortTable`], resolving
//! non-ANSI port lists against their body declarations and computing bit
//! widths from ranges. This is the only place AST port syntax is
//! interpreted; generators never see the AST.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tbforge_verilog::ast::{ModuleDecl, PortDecl, PortStyle};
use tbforge_verilog::SourceFile;

use crate::error::Error;
use crate::port::{Port, PortDirection, PortTable};

/// Extracts the port interface of `module_name` from a parsed source file.
pub fn extract(file: &SourceFile, module_name: &str) -> Result<PortTable, Error> {
    let module = file.module(module_name).ok_or_else(|| Error::ModuleNotFound {
        name: module_name.to_string(),
    })?;
    build_table(module)
}

/// Reads, parses, and extracts the port interface of `module_name` from a
/// source file on disk.
pub fn extract_from_path(path: &Path, module_name: &str) -> Result<PortTable, Error> {
    if !path.exists() {
        return Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let source = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file = tbforge_verilog::parse_source(&source)?;
    extract(&file, module_name)
}

/// Builds the port table for a parsed module.
fn build_table(module: &ModuleDecl) -> Result<PortTable, Error> {
    match module.port_style {
        PortStyle::Empty => Ok(PortTable::new(&module.name)),
        PortStyle::Ansi => build_ansi(module),
        PortStyle::NonAnsi => build_non_ansi(module),
    }
}

fn build_ansi(module: &ModuleDecl) -> Result<PortTable, Error> {
    let mut table = PortTable::new(&module.name);
    for decl in &module.ports {
        let direction = PortDirection::from(decl.direction);
        let width = decl_width(decl);
        for name in &decl.names {
            let prev = table.insert(Port::new(name.clone(), direction, width));
            if prev.is_some() {
                return Err(malformed(module, format!("duplicate port '{name}'")));
            }
        }
    }
    Ok(table)
}

/// Resolves a non-ANSI header name list against the body declarations.
///
/// Every header name must be declared exactly once in the body, and every
/// body port declaration must name a header port.
fn build_non_ansi(module: &ModuleDecl) -> Result<PortTable, Error> {
    let mut declared: IndexMap<&str, Port> = IndexMap::new();
    for decl in &module.ports {
        let direction = PortDirection::from(decl.direction);
        let width = decl_width(decl);
        for name in &decl.names {
            let prev = declared.insert(name.as_str(), Port::new(name.clone(), direction, width));
            if prev.is_some() {
                return Err(malformed(module, format!("duplicate port '{name}'")));
            }
        }
    }

    let mut table = PortTable::new(&module.name);
    for name in &module.port_names {
        let port = declared.shift_remove(name.as_str()).ok_or_else(|| {
            malformed(module, format!("port '{name}' has no body declaration"))
        })?;
        if table.insert(port).is_some() {
            return Err(malformed(module, format!("duplicate port '{name}'")));
        }
    }

    if let Some(name) = declared.keys().next() {
        return Err(malformed(
            module,
            format!("port '{name}' declared in body but missing from port list"),
        ));
    }
    Ok(table)
}

/// Width of a port declaration.
///
/// `[msb:lsb]` with two integer bounds gives `|msb - lsb| + 1`, so
/// descending and ascending ranges both work. Symbolic bounds (parameters,
/// expressions) fall back to width 1, as does the absence of a range.
fn decl_width(decl: &PortDecl) -> u32 {
    match &decl.range {
        Some(range) => match (range.msb.as_literal(), range.lsb.as_literal()) {
            (Some(msb), Some(lsb)) => {
                u32::try_from(msb.abs_diff(lsb).saturating_add(1)).unwrap_or(u32::MAX)
            }
            _ => 1,
        },
        None => 1,
    }
}

fn malformed(module: &ModuleDecl, detail: String) -> Error {
    Error::MalformedPortList {
        module: module.name.clone(),
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn extract_src(source: &str, module: &str) -> Result<PortTable, Error> {
        let file = tbforge_verilog::parse_source(source)?;
        extract(&file, module)
    }

    fn extract_ok(source: &str, module: &str) -> PortTable {
        extract_src(source, module).expect("unexpected extraction error")
    }

    #[test]
    fn ansi_counter_interface() {
        let table = extract_ok(
            "module counter(
                input wire clk,
                input wire rst_n,
                input wire en,
                output reg [7:0] count
            );
            endmodule",
            "counter",
        );
        assert_eq!(table.module(), "counter");
        assert_eq!(table.len(), 4);
        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["clk", "rst_n", "en", "count"]);
        assert_eq!(table.get("clk").unwrap().width, 1);
        assert_eq!(table.get("clk").unwrap().direction, PortDirection::Input);
        assert_eq!(table.get("count").unwrap().width, 8);
        assert_eq!(table.get("count").unwrap().direction, PortDirection::Output);
    }

    #[test]
    fn multi_name_group_shares_width() {
        let table = extract_ok("module m(input wire [3:0] a, b, output y); endmodule", "m");
        assert_eq!(table.get("a").unwrap().width, 4);
        assert_eq!(table.get("b").unwrap().width, 4);
        assert_eq!(table.get("y").unwrap().width, 1);
    }

    #[test]
    fn descending_range_width() {
        let table = extract_ok("module m(input [0:7] a); endmodule", "m");
        assert_eq!(table.get("a").unwrap().width, 8);
    }

    #[test]
    fn symbolic_range_defaults_to_one() {
        let table = extract_ok(
            "module m #(parameter W = 8)(input [W-1:0] a); endmodule",
            "m",
        );
        assert_eq!(table.get("a").unwrap().width, 1);
    }

    #[test]
    fn inout_is_bidirectional() {
        let table = extract_ok("module m(inout wire [7:0] bus); endmodule", "m");
        assert_eq!(
            table.get("bus").unwrap().direction,
            PortDirection::Bidirectional
        );
    }

    #[test]
    fn empty_port_list() {
        let table = extract_ok("module m(); endmodule", "m");
        assert!(table.is_empty());
        let table = extract_ok("module n; endmodule", "n");
        assert!(table.is_empty());
    }

    #[test]
    fn non_ansi_resolution() {
        let table = extract_ok(
            "module adder(a, b, sum);
                input [3:0] a;
                input [3:0] b;
                output [4:0] sum;
            endmodule",
            "adder",
        );
        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "sum"]);
        assert_eq!(table.get("sum").unwrap().width, 5);
        assert_eq!(table.get("sum").unwrap().direction, PortDirection::Output);
    }

    #[test]
    fn non_ansi_order_follows_header() {
        // Body declares in a different order than the header lists
        let table = extract_ok(
            "module m(x, y, z);
                output z;
                input x;
                input y;
            endmodule",
            "m",
        );
        let names: Vec<&str> = table.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn non_ansi_unresolved_port_is_malformed() {
        let err = extract_src(
            "module m(a, b);
                input a;
            endmodule",
            "m",
        )
        .unwrap_err();
        match err {
            Error::MalformedPortList { module, detail } => {
                assert_eq!(module, "m");
                assert!(detail.contains("'b'"));
                assert!(detail.contains("no body declaration"));
            }
            other => panic!("expected MalformedPortList, got {other}"),
        }
    }

    #[test]
    fn non_ansi_stray_body_decl_is_malformed() {
        let err = extract_src(
            "module m(a);
                input a;
                input b;
            endmodule",
            "m",
        )
        .unwrap_err();
        match err {
            Error::MalformedPortList { detail, .. } => {
                assert!(detail.contains("missing from port list"));
            }
            other => panic!("expected MalformedPortList, got {other}"),
        }
    }

    #[test]
    fn duplicate_ansi_port_is_malformed() {
        let err = extract_src("module m(input a, input a); endmodule", "m").unwrap_err();
        assert!(matches!(err, Error::MalformedPortList { .. }));
    }

    #[test]
    fn duplicate_body_decl_is_malformed() {
        let err = extract_src(
            "module m(a);
                input a;
                output a;
            endmodule",
            "m",
        )
        .unwrap_err();
        assert!(matches!(err, Error::MalformedPortList { .. }));
    }

    #[test]
    fn function_arguments_are_not_ports() {
        let table = extract_ok(
            "module m(input clk);
                function [3:0] inc;
                    input [3:0] v;
                    begin
                        inc = v + 1;
                    end
                endfunction
            endmodule",
            "m",
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn selects_requested_module() {
        let source = "module a(input x); endmodule
                      module b(output [1:0] y); endmodule";
        let table = extract_ok(source, "b");
        assert_eq!(table.module(), "b");
        assert_eq!(table.get("y").unwrap().width, 2);
    }

    #[test]
    fn missing_module_error() {
        let err = extract_src("module a; endmodule", "z").unwrap_err();
        match err {
            Error::ModuleNotFound { name } => assert_eq!(name, "z"),
            other => panic!("expected ModuleNotFound, got {other}"),
        }
    }

    #[test]
    fn parse_failure_error() {
        let err = extract_src("module ; endmodule", "m").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn path_not_found_error() {
        let err = extract_from_path(Path::new("/nonexistent/design.v"), "m").unwrap_err();
        assert!(matches!(err, Error::SourceNotFound { .. }));
    }

    #[test]
    fn extract_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("blinker.v");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "module blinker(input clk, output led); endmodule").unwrap();
        let table = extract_from_path(&path, "blinker").unwrap();
        assert_eq!(table.len(), 2);
    }
}
