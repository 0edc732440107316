//! Port interface model for extracted modules.
//!
//! A [`PortTable`] is the normalized interface of one Verilog module: every
//! port with its [`PortDirection`] and bit width, keyed by name, in
//! declaration order. All generators consume this table and nothing else,
//! so whatever the source syntax looked like (ANSI or non-ANSI, grouped or
//! one-per-line), downstream output is identical.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tbforge_verilog::Direction;

/// Direction of a module port as seen from inside the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Driven by the testbench (`input`).
    Input,
    /// Driven by the design under test (`output`).
    Output,
    /// Driven by either side (`inout`).
    Bidirectional,
}

impl From<Direction> for PortDirection {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Input => PortDirection::Input,
            Direction::Output => PortDirection::Output,
            Direction::Inout => PortDirection::Bidirectional,
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PortDirection::Input => "Input",
            PortDirection::Output => "Output",
            PortDirection::Bidirectional => "Bidirectional",
        };
        // pad() so that width specifiers apply in report tables
        f.pad(s)
    }
}

/// One port of a module interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// Port name as declared in the source.
    pub name: String,
    /// Direction as seen from inside the module.
    pub direction: PortDirection,
    /// Bit width. Always at least 1; scalar ports have width 1.
    pub width: u32,
}

impl Port {
    /// Creates a port. A width of 0 is normalized to 1.
    pub fn new(name: impl Into<String>, direction: PortDirection, width: u32) -> Self {
        Self {
            name: name.into(),
            direction,
            width: width.max(1),
        }
    }

    /// Largest value representable on this port.
    ///
    /// Stimulus values are `u64`, so ports 64 bits and wider saturate at
    /// `u64::MAX`.
    pub fn max_value(&self) -> u64 {
        if self.width >= 64 {
            u64::MAX
        } else {
            (1u64 << self.width) - 1
        }
    }
}

/// The complete port interface of one module, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortTable {
    module: String,
    ports: IndexMap<String, Port>,
}

impl PortTable {
    /// Creates an empty table for the named module.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ports: IndexMap::new(),
        }
    }

    /// Name of the module this table describes.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Inserts a port, keyed by its name.
    ///
    /// Returns the previously held port if one with the same name was
    /// already present.
    pub fn insert(&mut self, port: Port) -> Option<Port> {
        self.ports.insert(port.name.clone(), port)
    }

    /// Looks up a port by name.
    pub fn get(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }

    /// Number of ports.
    pub fn len(&self) -> usize {
        self.ports.len()
    }

    /// Whether the module has no ports.
    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    /// Iterates over ports in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Port> {
        self.ports.values()
    }

    /// Input ports, in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .values()
            .filter(|p| p.direction == PortDirection::Input)
    }

    /// Output ports, in declaration order.
    pub fn outputs(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .values()
            .filter(|p| p.direction == PortDirection::Output)
    }

    /// Bidirectional ports, in declaration order.
    pub fn bidirectionals(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .values()
            .filter(|p| p.direction == PortDirection::Bidirectional)
    }

    /// Ports sorted alphabetically by name, for stable report output.
    pub fn sorted_by_name(&self) -> Vec<&Port> {
        let mut ports: Vec<&Port> = self.ports.values().collect();
        ports.sort_by(|a, b| a.name.cmp(&b.name));
        ports
    }
}
