//! Structural netlist validation
//!
//! A pure check over a candidate instance list. Netlists built by
//! [`crate::netlist::synthesize`] always pass; the validator earns its keep
//! on candidates from external producers, which flow through the exact same
//! checks. On failure the caller regenerates from the AST; there is no
//! partial repair.

use std::collections::HashSet;

use thiserror::Error;

use super::gate::Netlist;

/// Violated structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// The port map does not declare exactly one output.
    #[error("port map must declare exactly one output")]
    AmbiguousOutput,

    /// Instance ids must run X1, X2, … in list order.
    #[error("instance {index} has id X{found}, expected X{expected}")]
    IdNotContiguous { index: usize, expected: u32, found: u32 },

    /// A net with more than one producing gate.
    #[error("net '{net}' is driven by more than one gate")]
    MultipleDrivers { net: String },

    /// An input net that is neither a declared input nor produced earlier.
    #[error("gate X{id} consumes floating net '{net}'")]
    FloatingNet { id: u32, net: String },

    /// A gate driving a declared input port.
    #[error("gate X{id} drives declared port '{net}'")]
    PortDriven { id: u32, net: String },

    /// The declared output driven by a gate other than the final one.
    #[error("declared output '{net}' is driven before the final gate")]
    OutputNotLast { net: String },

    /// The final gate does not drive the declared output (or the list is
    /// empty).
    #[error("declared output '{net}' is not driven by the final gate")]
    OutputMissing { net: String },
}

/// Check a netlist against the structural invariants.
///
/// Checks, in order: id contiguity from X1, single producer per net, no
/// floating input nets, and the declared output produced exactly once, by
/// the final instance only.
pub fn validate(netlist: &Netlist) -> Result<(), ValidationFailure> {
    let ports = netlist.ports();

    let mut outputs = ports.outputs();
    let output = match (outputs.next(), outputs.next()) {
        (Some(name), None) => name,
        _ => return Err(ValidationFailure::AmbiguousOutput),
    };

    let last_index = match netlist.gate_count().checked_sub(1) {
        Some(index) => index,
        None => return Err(ValidationFailure::OutputMissing { net: output.to_string() }),
    };

    let mut produced: HashSet<&str> = HashSet::new();
    for (index, gate) in netlist.gates().iter().enumerate() {
        let expected = index as u32 + 1;
        if gate.id != expected {
            return Err(ValidationFailure::IdNotContiguous { index, expected, found: gate.id });
        }

        for net in [&gate.input_a, &gate.input_b] {
            if !ports.is_input(net) && !produced.contains(net.as_str()) {
                return Err(ValidationFailure::FloatingNet { id: gate.id, net: net.clone() });
            }
        }

        if gate.output == output {
            if index != last_index {
                return Err(ValidationFailure::OutputNotLast { net: gate.output.clone() });
            }
        } else if ports.direction(&gate.output).is_some() {
            return Err(ValidationFailure::PortDriven { id: gate.id, net: gate.output.clone() });
        }
        if !produced.insert(gate.output.as_str()) {
            return Err(ValidationFailure::MultipleDrivers { net: gate.output.clone() });
        }
    }

    if netlist.gates()[last_index].output != output {
        return Err(ValidationFailure::OutputMissing { net: output.to_string() });
    }

    Ok(())
}
