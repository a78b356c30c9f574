//! Bracket grouping
//!
//! Converts the flat token stream into a nested sequence mirroring the
//! parenthesis structure. No operator semantics are applied here; that is
//! the resolver's job.

use super::ast::Expr;
use super::lexer::Token;
use super::ParseError;

/// One element of a grouped sequence.
///
/// The grouper only produces `Token` and `Group` elements; the `Expr` arm
/// appears while the precedence resolver folds operators into AST nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Token(Token),
    Group(Vec<Item>),
    Expr(Expr),
}

/// Group a token sequence by matched parentheses.
///
/// Maintains a stack of open groups, starting with the implicit top-level
/// group. `(` opens a new group, `)` closes the current one and nests it
/// into its parent. A stray `)` or an unclosed `(` fails with
/// [`ParseError::UnbalancedParens`] carrying the token index (the index one
/// past the last token for an unclosed group).
pub fn group_tokens(tokens: Vec<Token>) -> Result<Vec<Item>, ParseError> {
    let token_count = tokens.len();
    // The group under construction, plus its suspended ancestors. Keeping
    // the current group out of the stack means every token always has a
    // group to land in.
    let mut current: Vec<Item> = Vec::new();
    let mut parents: Vec<Vec<Item>> = Vec::new();

    for (index, token) in tokens.into_iter().enumerate() {
        match token {
            Token::LParen => parents.push(std::mem::take(&mut current)),
            Token::RParen => {
                let group = current;
                current = parents
                    .pop()
                    .ok_or(ParseError::UnbalancedParens { token_index: index })?;
                current.push(Item::Group(group));
            }
            other => current.push(Item::Token(other)),
        }
    }

    if !parents.is_empty() {
        return Err(ParseError::UnbalancedParens { token_index: token_count });
    }
    Ok(current)
}
