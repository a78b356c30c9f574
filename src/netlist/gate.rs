//! Gate instances and the netlist container
//!
//! A netlist is an ordered list of 2-input NAND instances plus the port
//! declarations it was synthesized against. Instances are never mutated
//! after emission; the list order is the emission order.
//!
//! # Instance Line Format
//!
//! One instance per line, exactly 7 space-separated tokens:
//!
//! ```text
//! X<id> <input_a> <input_b> <output> VDD VSS nand2
//! ```
//!
//! Both directions are supported: `Display` renders it, and
//! [`Netlist::from_lines`] parses it so externally produced candidates can
//! run through the same validator as library-built netlists.

use thiserror::Error;

use super::ports::PortMap;

/// The only gate kind the synthesizer emits.
pub const GATE_KIND: &str = "nand2";
/// Positive supply rail name carried on every instance line.
pub const RAIL_VDD: &str = "VDD";
/// Ground rail name carried on every instance line.
pub const RAIL_VSS: &str = "VSS";

/// A single 2-input NAND instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    /// 1-based instance id; consecutive in emission order
    pub id: u32,
    /// First input net
    pub input_a: String,
    /// Second input net
    pub input_b: String,
    /// Driven net
    pub output: String,
}

impl Gate {
    pub fn new(id: u32, input_a: impl Into<String>, input_b: impl Into<String>, output: impl Into<String>) -> Self {
        Gate {
            id,
            input_a: input_a.into(),
            input_b: input_b.into(),
            output: output.into(),
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "X{} {} {} {} {} {} {}",
            self.id, self.input_a, self.input_b, self.output, RAIL_VDD, RAIL_VSS, GATE_KIND
        )
    }
}

/// Malformed instance line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateParseError {
    #[error("expected 7 whitespace-separated tokens, found {0}")]
    TokenCount(usize),

    #[error("instance id '{0}' is not X<positive integer>")]
    BadId(String),

    #[error("power rails must be {RAIL_VDD} {RAIL_VSS}, found '{0} {1}'")]
    BadRails(String, String),

    #[error("unsupported gate kind '{0}'")]
    BadKind(String),
}

impl std::str::FromStr for Gate {
    type Err = GateParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 7 {
            return Err(GateParseError::TokenCount(tokens.len()));
        }

        let id = tokens[0]
            .strip_prefix('X')
            .and_then(|digits| digits.parse::<u32>().ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| GateParseError::BadId(tokens[0].to_string()))?;

        if tokens[4] != RAIL_VDD || tokens[5] != RAIL_VSS {
            return Err(GateParseError::BadRails(tokens[4].to_string(), tokens[5].to_string()));
        }
        if tokens[6] != GATE_KIND {
            return Err(GateParseError::BadKind(tokens[6].to_string()));
        }

        Ok(Gate::new(id, tokens[1], tokens[2], tokens[3]))
    }
}

/// Malformed instance line within a netlist body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("netlist line {line}: {source}")]
pub struct NetlistFormatError {
    /// 1-based line number
    pub line: usize,
    #[source]
    pub source: GateParseError,
}

/// Ordered gate-instance list plus the ports it was built against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Netlist {
    gates: Vec<Gate>,
    ports: PortMap,
}

impl Netlist {
    pub(crate) fn from_parts(gates: Vec<Gate>, ports: PortMap) -> Self {
        Netlist { gates, ports }
    }

    /// Parse an instance-line body (as produced by an external generator)
    /// against a port map. Parsing checks only line shape; structural
    /// invariants are the validator's job.
    pub fn from_lines(text: &str, ports: PortMap) -> Result<Self, NetlistFormatError> {
        let mut gates = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let gate = line
                .parse::<Gate>()
                .map_err(|source| NetlistFormatError { line: index + 1, source })?;
            gates.push(gate);
        }
        Ok(Netlist { gates, ports })
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn ports(&self) -> &PortMap {
        &self.ports
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }
}

impl std::fmt::Display for Netlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for gate in &self.gates {
            writeln!(f, "{}", gate)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::ports::PortDirection;

    fn ab_ports() -> PortMap {
        let mut ports = PortMap::new();
        ports.declare("A", PortDirection::In);
        ports.declare("B", PortDirection::In);
        ports.declare("Y", PortDirection::Out);
        ports
    }

    #[test]
    fn test_gate_line_rendering() {
        let gate = Gate::new(3, "w1", "w2", "Y");
        assert_eq!(gate.to_string(), "X3 w1 w2 Y VDD VSS nand2");
    }

    #[test]
    fn test_gate_line_parsing() {
        let gate: Gate = "X1 A B w1 VDD VSS nand2".parse().unwrap();
        assert_eq!(gate, Gate::new(1, "A", "B", "w1"));
    }

    #[test]
    fn test_gate_line_round_trip() {
        let gate = Gate::new(12, "w11", "w11", "Y");
        let back: Gate = gate.to_string().parse().unwrap();
        assert_eq!(back, gate);
    }

    #[test]
    fn test_rejects_wrong_token_count() {
        let err = "X1 A B w1 VDD VSS".parse::<Gate>().unwrap_err();
        assert_eq!(err, GateParseError::TokenCount(6));
    }

    #[test]
    fn test_rejects_bad_id() {
        assert_eq!(
            "U1 A B w1 VDD VSS nand2".parse::<Gate>().unwrap_err(),
            GateParseError::BadId("U1".to_string())
        );
        assert_eq!(
            "X0 A B w1 VDD VSS nand2".parse::<Gate>().unwrap_err(),
            GateParseError::BadId("X0".to_string())
        );
    }

    #[test]
    fn test_rejects_bad_rails_and_kind() {
        assert!(matches!(
            "X1 A B w1 VSS VDD nand2".parse::<Gate>().unwrap_err(),
            GateParseError::BadRails(..)
        ));
        assert_eq!(
            "X1 A B w1 VDD VSS nor2".parse::<Gate>().unwrap_err(),
            GateParseError::BadKind("nor2".to_string())
        );
    }

    #[test]
    fn test_netlist_from_lines() {
        let body = "X1 A B w1 VDD VSS nand2\nX2 w1 w1 Y VDD VSS nand2\n";
        let netlist = Netlist::from_lines(body, ab_ports()).unwrap();
        assert_eq!(netlist.gate_count(), 2);
        assert_eq!(netlist.to_string(), body);
    }

    #[test]
    fn test_netlist_from_lines_reports_line_number() {
        let body = "X1 A B w1 VDD VSS nand2\nbogus line\n";
        let err = Netlist::from_lines(body, ab_ports()).unwrap_err();
        assert_eq!(err.line, 2);
    }
}
