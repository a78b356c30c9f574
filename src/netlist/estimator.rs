//! Netlist size estimation
//!
//! Predicts, from the AST alone, exactly what the synthesizer will emit:
//! the decomposition costs are fixed (NOT 1 gate, AND 2, OR 3, bare-input
//! buffer 2), so the estimate is not a heuristic.

use serde::Serialize;

use crate::parser::Expr;

/// Predicted resource usage for synthesizing an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Estimate {
    /// Number of NAND instances the synthesizer will emit
    pub gate_count: u32,
    /// Number of internal `w<k>` wires (one per gate, minus the final
    /// wire renamed to the output)
    pub wire_count: u32,
    /// Longest input-to-output path, in NAND levels
    pub depth: u32,
}

/// Estimate the netlist the synthesizer would produce for `expr`.
pub fn estimate(expr: &Expr) -> Estimate {
    let gate_count = match expr {
        // A bare variable gets the two-gate pass-through buffer.
        Expr::Var(_) => 2,
        _ => gates(expr),
    };
    Estimate {
        gate_count,
        wire_count: gate_count - 1,
        depth: match expr {
            Expr::Var(_) => 2,
            _ => depth(expr),
        },
    }
}

fn gates(expr: &Expr) -> u32 {
    match expr {
        Expr::Var(_) => 0,
        Expr::Not(operand) => 1 + gates(operand),
        Expr::And(left, right) => 2 + gates(left) + gates(right),
        Expr::Or(left, right) => 3 + gates(left) + gates(right),
    }
}

fn depth(expr: &Expr) -> u32 {
    match expr {
        Expr::Var(_) => 0,
        Expr::Not(operand) => 1 + depth(operand),
        Expr::And(left, right) | Expr::Or(left, right) => 2 + depth(left).max(depth(right)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::ports::PortMap;
    use crate::netlist::synth::synthesize;
    use crate::parser::parse_expression;

    #[test]
    fn test_fixed_costs_per_node_kind() {
        assert_eq!(estimate(&parse_expression("~A").unwrap()).gate_count, 1);
        assert_eq!(estimate(&parse_expression("A & B").unwrap()).gate_count, 2);
        assert_eq!(estimate(&parse_expression("A | B").unwrap()).gate_count, 3);
        assert_eq!(estimate(&parse_expression("A").unwrap()).gate_count, 2);
    }

    #[test]
    fn test_composite_expression() {
        // OR(AND(A,B), C): 2 + 3
        let expr = parse_expression("A & B | C").unwrap();
        assert_eq!(
            estimate(&expr),
            Estimate { gate_count: 5, wire_count: 4, depth: 4 }
        );
    }

    #[test]
    fn test_estimate_matches_synthesis() {
        for input in ["A", "~A", "A & B | C", "~(A & B) | (A & B)", "~~A & ~(B | C)"] {
            let expr = parse_expression(input).unwrap();
            let ports = PortMap::for_expression(&expr, "Y");
            let netlist = synthesize(&expr, &ports).unwrap();
            assert_eq!(
                estimate(&expr).gate_count as usize,
                netlist.gate_count(),
                "gate count for {:?}",
                input
            );
        }
    }
}
