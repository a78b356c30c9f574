//! Port declarations
//!
//! A netlist is synthesized against a declared port map: each name carries
//! a direction, and exactly one port is the output. The JSON form matches
//! the exchange payload used by external generators:
//! `{"A": "in", "B": "in", "Y": "out"}`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::parser::Expr;

/// Direction of a declared port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    #[serde(rename = "in")]
    In,
    #[serde(rename = "out")]
    Out,
}

/// Insertion-ordered name → direction mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortMap {
    ports: IndexMap<String, PortDirection>,
}

impl PortMap {
    pub fn new() -> Self {
        PortMap { ports: IndexMap::new() }
    }

    /// Declare a port, replacing any previous direction for the same name.
    pub fn declare(&mut self, name: impl Into<String>, direction: PortDirection) {
        self.ports.insert(name.into(), direction);
    }

    /// Build the conventional port map for an expression: every variable
    /// as an input, plus the given output name.
    pub fn for_expression(expr: &Expr, output: impl Into<String>) -> Self {
        let mut map = PortMap::new();
        for var in expr.variables() {
            map.declare(var, PortDirection::In);
        }
        map.declare(output, PortDirection::Out);
        map
    }

    pub fn direction(&self, name: &str) -> Option<PortDirection> {
        self.ports.get(name).copied()
    }

    /// True if `name` is a declared input port.
    pub fn is_input(&self, name: &str) -> bool {
        self.direction(name) == Some(PortDirection::In)
    }

    /// Names of all declared input ports, in declaration order.
    pub fn inputs(&self) -> impl Iterator<Item = &str> {
        self.ports
            .iter()
            .filter(|(_, d)| **d == PortDirection::In)
            .map(|(name, _)| name.as_str())
    }

    /// Names of all declared output ports, in declaration order. A valid
    /// port map has exactly one; callers that need it enforced use
    /// [`crate::netlist::synthesize`].
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.ports
            .iter()
            .filter(|(_, d)| **d == PortDirection::Out)
            .map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, PortDirection)> {
        self.ports.iter().map(|(name, d)| (name.as_str(), *d))
    }
}

impl Default for PortMap {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(String, PortDirection)> for PortMap {
    fn from_iter<I: IntoIterator<Item = (String, PortDirection)>>(iter: I) -> Self {
        PortMap { ports: iter.into_iter().collect() }
    }
}
