//! CLI tool for compiling boolean expressions to NAND netlists
//!
//! Takes an expression (or an AST in the JSON exchange format), synthesizes
//! a NAND-only netlist, and prints one instance line per gate. Can also dump
//! the AST, estimate gate count, or validate an externally produced netlist
//! file against the same expression (regenerating when it fails).
//!
//! # Examples
//!
//! Synthesize a netlist:
//! ```bash
//! nandify-cli --expr "~(A & B) | C"
//! ```
//!
//! Dump the AST exchange JSON:
//! ```bash
//! nandify-cli --expr "A & B | C" --ast
//! ```
//!
//! Check a candidate netlist produced elsewhere:
//! ```bash
//! nandify-cli --expr "A & B" --check candidate.net
//! ```

use std::fs;
use std::process;

use nandify::netlist::{accept_or_regenerate, estimate, synthesize_validated, Netlist, PortMap};
use nandify::parser::{parse_expression, Expr};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    // Parse command line arguments
    let mut expr_input: Option<String> = None;
    let mut ast_input: Option<String> = None;
    let mut ports_input: Option<String> = None;
    let mut output_name: Option<String> = None;
    let mut check_file: Option<String> = None;
    let mut show_ast = false;
    let mut show_estimate = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--expr" | "-e" => {
                if i + 1 < args.len() {
                    expr_input = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --expr requires a value");
                    process::exit(1);
                }
            }
            "--ast-json" | "-j" => {
                if i + 1 < args.len() {
                    ast_input = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --ast-json requires a value");
                    process::exit(1);
                }
            }
            "--ports" | "-p" => {
                if i + 1 < args.len() {
                    ports_input = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --ports requires a value");
                    process::exit(1);
                }
            }
            "--output" | "-o" => {
                if i + 1 < args.len() {
                    output_name = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --output requires a value");
                    process::exit(1);
                }
            }
            "--check" | "-c" => {
                if i + 1 < args.len() {
                    check_file = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    eprintln!("Error: --check requires a file path");
                    process::exit(1);
                }
            }
            "--ast" | "-a" => {
                show_ast = true;
                i += 1;
            }
            "--estimate" => {
                show_estimate = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            "--version" | "-v" => {
                println!("nandify-cli {}", VERSION);
                process::exit(0);
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
    }

    let expr = load_expression(expr_input, ast_input);
    let ports = load_ports(&expr, ports_input, output_name);

    if show_ast {
        match serde_json::to_string(&expr) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to serialize AST: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    if show_estimate {
        let est = estimate(&expr);
        println!("gates: {}", est.gate_count);
        println!("wires: {}", est.wire_count);
        println!("depth: {}", est.depth);
        return;
    }

    if let Some(path) = check_file {
        let body = match fs::read_to_string(&path) {
            Ok(body) => body,
            Err(e) => {
                eprintln!("Error: cannot read '{}': {}", path, e);
                process::exit(1);
            }
        };
        let candidate = match Netlist::from_lines(&body, ports.clone()) {
            Ok(candidate) => candidate,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        match accept_or_regenerate(candidate, &expr, &ports) {
            Ok(netlist) => print!("{}", netlist),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    match synthesize_validated(&expr, &ports) {
        Ok(netlist) => print!("{}", netlist),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Obtain the AST from `--expr` or `--ast-json` (exactly one of the two).
fn load_expression(expr_input: Option<String>, ast_input: Option<String>) -> Expr {
    match (expr_input, ast_input) {
        (Some(text), None) => match parse_expression(&text) {
            Ok(expr) => expr,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        (None, Some(json)) => match serde_json::from_str(&json) {
            Ok(expr) => expr,
            Err(e) => {
                eprintln!("Error: invalid AST JSON: {}", e);
                process::exit(1);
            }
        },
        (Some(_), Some(_)) => {
            eprintln!("Error: --expr and --ast-json are mutually exclusive");
            process::exit(1);
        }
        (None, None) => {
            eprintln!("Error: --expr or --ast-json is required");
            print_usage();
            process::exit(1);
        }
    }
}

/// Build the port map: explicit JSON wins, otherwise every expression
/// variable becomes an input and the output defaults to Y.
fn load_ports(expr: &Expr, ports_input: Option<String>, output_name: Option<String>) -> PortMap {
    match ports_input {
        Some(json) => {
            if output_name.is_some() {
                eprintln!("Error: --output cannot be combined with --ports");
                process::exit(1);
            }
            match serde_json::from_str(&json) {
                Ok(ports) => ports,
                Err(e) => {
                    eprintln!("Error: invalid ports JSON: {}", e);
                    process::exit(1);
                }
            }
        }
        None => PortMap::for_expression(expr, output_name.unwrap_or_else(|| "Y".to_string())),
    }
}

fn print_usage() {
    println!("nandify-cli - Boolean expression to NAND netlist compiler");
    println!();
    println!("USAGE:");
    println!("    nandify-cli [OPTIONS]");
    println!();
    println!("INPUT OPTIONS:");
    println!("    -e, --expr <TEXT>       Boolean expression (e.g., \"~(A & B) | C\")");
    println!("    -j, --ast-json <JSON>   AST in exchange format (e.g., '[\"AND\",\"A\",\"B\"]')");
    println!("    -p, --ports <JSON>      Port declarations (e.g., '{{\"A\":\"in\",\"Y\":\"out\"}}')");
    println!("    -o, --output <NAME>     Output net name (default: Y)");
    println!();
    println!("ACTION OPTIONS (default: print the synthesized netlist):");
    println!("    -a, --ast               Print the AST exchange JSON instead of synthesizing");
    println!("    --estimate              Print gate/wire/depth estimates");
    println!("    -c, --check <FILE>      Validate a candidate netlist file; print it when it");
    println!("                            passes, or a regenerated netlist when it fails");
    println!();
    println!("GENERAL OPTIONS:");
    println!("    -h, --help              Print help information");
    println!("    -v, --version           Print version information");
    println!();
    println!("EXAMPLES:");
    println!("    nandify-cli --expr \"A & B\"");
    println!("    nandify-cli --expr \"A & B | C\" --ast");
    println!("    nandify-cli --ast-json '[\"not\",[\"AND\",\"A\",\"B\"]]' --output OUT");
    println!("    nandify-cli --expr \"A | B\" --check llm_candidate.net");
}
