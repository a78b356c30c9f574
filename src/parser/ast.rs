//! Abstract Syntax Tree for boolean expressions
//!
//! This module defines the AST produced by the parser and consumed by the
//! NAND synthesizer.
//!
//! # Supported Operations
//!
//! - NOT: `~A` (prefix, binds tightest)
//! - AND: `A & B`
//! - OR: `A | B` (binds loosest)
//!
//! Parentheses can be used to control operation order.
//!
//! # Exchange Format
//!
//! The AST serializes to the nested tagged form used by external
//! generators and fixers:
//!
//! - leaves are bare identifier strings: `"A"`
//! - NOT nodes are 2-element sequences: `["not", operand]`
//! - AND/OR nodes are 3-element sequences: `["AND", left, right]`
//!
//! So `~(A & B)` becomes `["not", ["AND", "A", "B"]]`.

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Expression in the boolean AST
///
/// A closed set of node kinds: the synthesizer dispatches exhaustively,
/// so an unsupported operator or a malformed arity cannot reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Named input signal
    Var(String),

    /// Logical negation
    Not(Box<Expr>),

    /// Logical conjunction
    And(Box<Expr>, Box<Expr>),

    /// Logical disjunction
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Helper to create a variable expression
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var(name.into())
    }

    /// Helper to create a NOT expression
    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }

    /// Helper to create an AND expression
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// Helper to create an OR expression
    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// Get all variable names used in this expression, sorted and deduped
    pub fn variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars.sort();
        vars.dedup();
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Expr::Var(name) => vars.push(name.clone()),
            Expr::Not(operand) => operand.collect_variables(vars),
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_variables(vars);
                right.collect_variables(vars);
            }
        }
    }
}

impl std::fmt::Display for Expr {
    /// Fully parenthesized rendering; re-parsing the output yields the
    /// same tree.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Not(operand) => write!(f, "~{}", operand),
            Expr::And(left, right) => write!(f, "({} & {})", left, right),
            Expr::Or(left, right) => write!(f, "({} | {})", left, right),
        }
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Expr::Var(name) => serializer.serialize_str(name),
            Expr::Not(operand) => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element("not")?;
                seq.serialize_element(operand)?;
                seq.end()
            }
            Expr::And(left, right) => serialize_binary(serializer, "AND", left, right),
            Expr::Or(left, right) => serialize_binary(serializer, "OR", left, right),
        }
    }
}

fn serialize_binary<S: Serializer>(
    serializer: S,
    tag: &str,
    left: &Expr,
    right: &Expr,
) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(3))?;
    seq.serialize_element(tag)?;
    seq.serialize_element(left)?;
    seq.serialize_element(right)?;
    seq.end()
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExprVisitor)
    }
}

struct ExprVisitor;

impl<'de> Visitor<'de> for ExprVisitor {
    type Value = Expr;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str("an identifier string or a [tag, operand...] sequence")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Expr, E> {
        Ok(Expr::Var(value.to_string()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Expr, A::Error> {
        let tag: String = seq
            .next_element()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;

        let node = match tag.as_str() {
            "not" => {
                let operand: Expr = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                Expr::not(operand)
            }
            "AND" | "OR" => {
                let left: Expr = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let right: Expr = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                if tag == "AND" {
                    Expr::and(left, right)
                } else {
                    Expr::or(left, right)
                }
            }
            other => return Err(de::Error::unknown_variant(other, &["not", "AND", "OR"])),
        };

        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::custom(format!("trailing operand after {} node", tag)));
        }
        Ok(node)
    }
}
