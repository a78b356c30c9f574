//! Nandify
//!
//! This library compiles textual boolean expressions into gate-level
//! netlists built exclusively from 2-input NAND gates, ready for
//! downstream SPICE templating or simulation tooling.
//!
//! # Example Expressions
//!
//! ```text
//! A & B
//! ~(A & B) | C
//! (sel & data_1) | (~sel & data_0)
//! ```
//!
//! # Pipeline
//!
//! ```text
//! text → tokens → grouped sequence → AST → gate instances → validated netlist
//! ```
//!
//! Each stage is an explicit pure function; nothing runs as an import side
//! effect and no counters outlive a single synthesis call, so independent
//! expressions can be compiled concurrently.
//!
//! ```
//! use nandify::netlist::{synthesize_validated, PortMap};
//! use nandify::parser::parse_expression;
//!
//! let expr = parse_expression("A | B").unwrap();
//! let ports = PortMap::for_expression(&expr, "Y");
//! let netlist = synthesize_validated(&expr, &ports).unwrap();
//! assert_eq!(netlist.to_string(), "\
//! X1 A A w1 VDD VSS nand2
//! X2 B B w2 VDD VSS nand2
//! X3 w1 w2 Y VDD VSS nand2
//! ");
//! ```

// Core modules
pub mod netlist;
pub mod parser;

// Re-export commonly used types
pub use netlist::{
    accept_or_regenerate, estimate, synthesize, synthesize_validated, validate, Estimate, Gate,
    Netlist, PortDirection, PortMap, SynthesisError, ValidationFailure,
};
pub use parser::{parse_expression, Expr, LexError, ParseError};
