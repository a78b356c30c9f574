//! Parser module
//!
//! This module turns expression text into a boolean AST in three explicit
//! stages: tokenize, group by parentheses, resolve operator precedence.
//! Each stage is a pure function; [`parse_expression`] composes them.

pub mod ast;
mod grouper;
mod lexer;
mod resolver;

pub use ast::Expr;
pub use grouper::{group_tokens, Item};
pub use lexer::{tokenize, LexError, Token};
pub use resolver::resolve;

use thiserror::Error;

/// Structural grammar violation in an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A `)` with no matching `(`, or an unclosed `(` at end of input.
    /// The index identifies the offending token; for an unclosed group it
    /// is one past the final token.
    #[error("unbalanced parentheses at token {token_index}")]
    UnbalancedParens { token_index: usize },

    /// An operator missing an operand on either side.
    #[error("operator '{operator}' is missing an operand")]
    MissingOperand { operator: Token },

    /// The sequence did not reduce to exactly one expression.
    #[error("expression is empty or has adjacent operands")]
    MalformedExpression,
}

/// Parse an expression string into an AST.
///
/// # Example
///
/// ```
/// use nandify::parser::{parse_expression, Expr};
///
/// let expr = parse_expression("~A & B").unwrap();
/// assert_eq!(expr, Expr::and(Expr::not(Expr::var("A")), Expr::var("B")));
/// ```
pub fn parse_expression(input: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(input)?;
    let grouped = group_tokens(tokens)?;
    resolve(grouped)
}
