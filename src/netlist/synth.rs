//! NAND synthesis
//!
//! Lowers a boolean AST into a NAND-only instance list by strict post-order
//! traversal, so every operand net exists before the gate that consumes it.
//! The De Morgan decompositions are fixed:
//!
//! - `~x`     → `t = NAND(x, x)`
//! - `a & b`  → `t = NAND(a, b); o = NAND(t, t)`
//! - `a | b`  → `a1 = NAND(a, a); b1 = NAND(b, b); o = NAND(a1, b1)`
//!
//! No common-subexpression elimination is attempted: identical subtrees are
//! synthesized independently, trading gate count for determinism and
//! simplicity. Wires `w1, w2, …` and instance ids `X1, X2, …` are allocated
//! in emission order (wire indices shadowed by a declared port name are
//! skipped), and the final gate is rewritten to drive the declared output
//! net.

use thiserror::Error;

use super::gate::{Gate, Netlist};
use super::ports::PortMap;
use super::validator::ValidationFailure;
use crate::parser::Expr;

/// Synthesis rejected the AST or its port declarations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// A leaf names a signal outside the declared input set.
    #[error("expression references '{0}', which is not a declared input")]
    UndeclaredInput(String),

    /// The port map declares no output.
    #[error("port map declares no output port")]
    MissingOutputPort,

    /// The port map declares more than one output.
    #[error("port map declares a second output port '{0}'")]
    MultipleOutputPorts(String),

    /// A freshly synthesized netlist failed its own validation. The
    /// algorithm is deterministic, so this indicates an internal fault,
    /// never bad user input.
    #[error("regenerated netlist failed validation: {0}")]
    Inconsistent(ValidationFailure),
}

/// Wire and id allocation state for one synthesis call.
///
/// Counters live in this value alone, so independent expressions can be
/// synthesized concurrently without shared state.
struct Builder<'a> {
    ports: &'a PortMap,
    gates: Vec<Gate>,
    next_wire: u32,
}

impl<'a> Builder<'a> {
    fn new(ports: &'a PortMap) -> Self {
        Builder { ports, gates: Vec::new(), next_wire: 1 }
    }

    /// Allocate the next internal wire name. Indices whose `w<k>` name is
    /// taken by a declared port are skipped, so a port legally named `w1`
    /// never collides with a generated wire.
    fn fresh_wire(&mut self) -> String {
        loop {
            let name = format!("w{}", self.next_wire);
            self.next_wire += 1;
            if self.ports.direction(&name).is_none() {
                return name;
            }
        }
    }

    /// Emit one NAND, allocating the next wire and instance id.
    fn emit(&mut self, input_a: String, input_b: String) -> String {
        let output = self.fresh_wire();
        let id = self.gates.len() as u32 + 1;
        self.gates.push(Gate::new(id, input_a, input_b, output.clone()));
        output
    }

    /// Post-order lowering; returns the net carrying the node's value.
    fn lower(&mut self, expr: &Expr) -> Result<String, SynthesisError> {
        match expr {
            Expr::Var(name) => {
                if !self.ports.is_input(name) {
                    return Err(SynthesisError::UndeclaredInput(name.clone()));
                }
                Ok(name.clone())
            }
            Expr::Not(operand) => {
                let net = self.lower(operand)?;
                Ok(self.emit(net.clone(), net))
            }
            Expr::And(left, right) => {
                let net_a = self.lower(left)?;
                let net_b = self.lower(right)?;
                let t = self.emit(net_a, net_b);
                Ok(self.emit(t.clone(), t))
            }
            Expr::Or(left, right) => {
                let net_a = self.lower(left)?;
                let net_b = self.lower(right)?;
                let a1 = self.emit(net_a.clone(), net_a);
                let b1 = self.emit(net_b.clone(), net_b);
                Ok(self.emit(a1, b1))
            }
        }
    }
}

/// Resolve the single declared output name.
fn output_port(ports: &PortMap) -> Result<&str, SynthesisError> {
    let mut outputs = ports.outputs();
    let first = outputs.next().ok_or(SynthesisError::MissingOutputPort)?;
    if let Some(extra) = outputs.next() {
        return Err(SynthesisError::MultipleOutputPorts(extra.to_string()));
    }
    Ok(first)
}

/// Synthesize an AST into a NAND-only netlist.
///
/// The last gate emitted drives the declared output net. A bare variable
/// expression gets a two-gate pass-through buffer, so the output is always
/// gate-driven rather than an alias of an input.
///
/// # Example
///
/// ```
/// use nandify::netlist::{synthesize, PortMap};
/// use nandify::parser::parse_expression;
///
/// let expr = parse_expression("A & B").unwrap();
/// let ports = PortMap::for_expression(&expr, "Y");
/// let netlist = synthesize(&expr, &ports).unwrap();
/// assert_eq!(
///     netlist.to_string(),
///     "X1 A B w1 VDD VSS nand2\nX2 w1 w1 Y VDD VSS nand2\n"
/// );
/// ```
pub fn synthesize(expr: &Expr, ports: &PortMap) -> Result<Netlist, SynthesisError> {
    let output = output_port(ports)?.to_string();
    let mut builder = Builder::new(ports);
    let top = builder.lower(expr)?;

    if let Expr::Var(_) = expr {
        // Buffer a bare input through two inverters.
        let inv = builder.emit(top.clone(), top);
        builder.emit(inv.clone(), inv);
    }

    // Wire allocation ran uniformly; only now does the final wire give way
    // to the declared output name.
    if let Some(last) = builder.gates.last_mut() {
        last.output = output;
    }

    Ok(Netlist::from_parts(builder.gates, ports.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::ports::PortDirection;
    use crate::parser::parse_expression;

    fn synth(input: &str) -> Netlist {
        let expr = parse_expression(input).unwrap();
        let ports = PortMap::for_expression(&expr, "Y");
        synthesize(&expr, &ports).unwrap()
    }

    fn lines(netlist: &Netlist) -> Vec<String> {
        netlist.gates().iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_and_emits_two_gates() {
        assert_eq!(
            lines(&synth("A & B")),
            vec!["X1 A B w1 VDD VSS nand2", "X2 w1 w1 Y VDD VSS nand2"]
        );
    }

    #[test]
    fn test_or_emits_three_gates() {
        assert_eq!(
            lines(&synth("A | B")),
            vec![
                "X1 A A w1 VDD VSS nand2",
                "X2 B B w2 VDD VSS nand2",
                "X3 w1 w2 Y VDD VSS nand2",
            ]
        );
    }

    #[test]
    fn test_not_of_and() {
        assert_eq!(
            lines(&synth("~(A & B)")),
            vec![
                "X1 A B w1 VDD VSS nand2",
                "X2 w1 w1 w2 VDD VSS nand2",
                "X3 w2 w2 Y VDD VSS nand2",
            ]
        );
    }

    #[test]
    fn test_bare_variable_gets_buffer() {
        assert_eq!(
            lines(&synth("A")),
            vec!["X1 A A w1 VDD VSS nand2", "X2 w1 w1 Y VDD VSS nand2"]
        );
    }

    #[test]
    fn test_left_associative_and_or_chain() {
        // A & B | C: AND lowers first, then OR negates both sides.
        assert_eq!(
            lines(&synth("A & B | C")),
            vec![
                "X1 A B w1 VDD VSS nand2",
                "X2 w1 w1 w2 VDD VSS nand2",
                "X3 w2 w2 w3 VDD VSS nand2",
                "X4 C C w4 VDD VSS nand2",
                "X5 w3 w4 Y VDD VSS nand2",
            ]
        );
    }

    #[test]
    fn test_no_common_subexpression_elimination() {
        // (A & B) | (A & B) synthesizes the AND twice.
        let netlist = synth("(A & B) | (A & B)");
        assert_eq!(netlist.gate_count(), 2 + 2 + 3);
        let produced: Vec<_> = netlist.gates().iter().filter(|g| g.input_a == "A").collect();
        assert_eq!(produced.len(), 2);
    }

    #[test]
    fn test_determinism() {
        let expr = parse_expression("~(A & B) | (C & ~D)").unwrap();
        let ports = PortMap::for_expression(&expr, "Y");
        let first = synthesize(&expr, &ports).unwrap();
        let second = synthesize(&expr, &ports).unwrap();
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn test_output_name_only_on_last_line() {
        let netlist = synth("~A | (B & C)");
        let drivers: Vec<_> = netlist
            .gates()
            .iter()
            .enumerate()
            .filter(|(_, g)| g.output == "Y")
            .map(|(i, _)| i)
            .collect();
        assert_eq!(drivers, vec![netlist.gate_count() - 1]);
    }

    #[test]
    fn test_undeclared_input() {
        let expr = parse_expression("A & Z").unwrap();
        let mut ports = PortMap::new();
        ports.declare("A", PortDirection::In);
        ports.declare("Y", PortDirection::Out);
        assert_eq!(
            synthesize(&expr, &ports).unwrap_err(),
            SynthesisError::UndeclaredInput("Z".to_string())
        );
    }

    #[test]
    fn test_output_used_as_input_is_undeclared() {
        let expr = parse_expression("Y").unwrap();
        let mut ports = PortMap::new();
        ports.declare("Y", PortDirection::Out);
        assert_eq!(
            synthesize(&expr, &ports).unwrap_err(),
            SynthesisError::UndeclaredInput("Y".to_string())
        );
    }

    #[test]
    fn test_missing_output_port() {
        let expr = parse_expression("A").unwrap();
        let mut ports = PortMap::new();
        ports.declare("A", PortDirection::In);
        assert_eq!(synthesize(&expr, &ports).unwrap_err(), SynthesisError::MissingOutputPort);
    }

    #[test]
    fn test_multiple_output_ports() {
        let expr = parse_expression("A").unwrap();
        let mut ports = PortMap::new();
        ports.declare("A", PortDirection::In);
        ports.declare("Y", PortDirection::Out);
        ports.declare("Z", PortDirection::Out);
        assert_eq!(
            synthesize(&expr, &ports).unwrap_err(),
            SynthesisError::MultipleOutputPorts("Z".to_string())
        );
    }

    #[test]
    fn test_input_port_named_like_a_wire() {
        // An input legally named w1 must not be shadowed by the first
        // generated wire; allocation skips to w2.
        let expr = parse_expression("w1 & B").unwrap();
        let ports = PortMap::for_expression(&expr, "Y");
        let netlist = synthesize(&expr, &ports).unwrap();
        assert_eq!(
            lines(&netlist),
            vec!["X1 w1 B w2 VDD VSS nand2", "X2 w2 w2 Y VDD VSS nand2"]
        );
        assert_eq!(crate::netlist::validate(&netlist), Ok(()));
    }

    #[test]
    fn test_output_port_named_like_a_wire() {
        let expr = parse_expression("A | B").unwrap();
        let ports = PortMap::for_expression(&expr, "w1");
        let netlist = synthesize(&expr, &ports).unwrap();
        assert_eq!(
            lines(&netlist),
            vec![
                "X1 A A w2 VDD VSS nand2",
                "X2 B B w3 VDD VSS nand2",
                "X3 w2 w3 w1 VDD VSS nand2",
            ]
        );
        assert_eq!(crate::netlist::validate(&netlist), Ok(()));
    }

    #[test]
    fn test_custom_output_name() {
        let expr = parse_expression("A & B").unwrap();
        let ports = PortMap::for_expression(&expr, "OUT");
        let netlist = synthesize(&expr, &ports).unwrap();
        assert_eq!(netlist.gates().last().unwrap().output, "OUT");
    }
}
