//! Netlist module
//!
//! NAND-only gate instances, synthesis from an AST, structural validation,
//! and size estimation. The validation contract is fail-closed: a candidate
//! that fails any structural check is discarded wholesale and the netlist
//! is regenerated from the AST, never patched in place.

mod estimator;
mod gate;
mod ports;
mod synth;
mod validator;

pub use estimator::{estimate, Estimate};
pub use gate::{Gate, GateParseError, Netlist, NetlistFormatError, GATE_KIND, RAIL_VDD, RAIL_VSS};
pub use ports::{PortDirection, PortMap};
pub use synth::{synthesize, SynthesisError};
pub use validator::{validate, ValidationFailure};

use crate::parser::Expr;

/// Synthesize a netlist and run it through the validator.
///
/// The deterministic algorithm always passes its own validator, so a
/// failure here is [`SynthesisError::Inconsistent`], an internal fault.
pub fn synthesize_validated(expr: &Expr, ports: &PortMap) -> Result<Netlist, SynthesisError> {
    let netlist = synthesize(expr, ports)?;
    validate(&netlist).map_err(SynthesisError::Inconsistent)?;
    Ok(netlist)
}

/// Accept an externally produced candidate if it validates, otherwise
/// regenerate from the AST.
///
/// This is the bridge for alternate producers (an AI generator, a fixer
/// pass): their output is trusted only after passing the same validator as
/// library-built netlists, and a rejected candidate is replaced by a full
/// resynthesis rather than repaired.
pub fn accept_or_regenerate(
    candidate: Netlist,
    expr: &Expr,
    ports: &PortMap,
) -> Result<Netlist, SynthesisError> {
    match validate(&candidate) {
        Ok(()) => Ok(candidate),
        Err(_) => synthesize_validated(expr, ports),
    }
}
