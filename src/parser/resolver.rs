//! Precedence resolution
//!
//! Folds a grouped token sequence into a single AST node with three
//! sequential passes, one per operator, in precedence order NOT > AND > OR.
//! Nested groups are resolved completely before the enclosing level folds,
//! so parenthesized sub-expressions always bind tighter than the operators
//! around them.

use super::ast::Expr;
use super::grouper::Item;
use super::lexer::Token;
use super::ParseError;

/// Resolve a grouped sequence into an AST.
///
/// Binary folding is left-associative: `A & B & C` becomes
/// `And(And(A, B), C)`. An operator missing one of its operands fails with
/// [`ParseError::MissingOperand`]; a sequence that does not reduce to
/// exactly one expression fails with [`ParseError::MalformedExpression`].
pub fn resolve(items: Vec<Item>) -> Result<Expr, ParseError> {
    // Inner groups first, each becoming a single operand at this level, and
    // identifiers become leaf expressions.
    let items = items
        .into_iter()
        .map(|item| match item {
            Item::Group(inner) => resolve(inner).map(Item::Expr),
            Item::Token(Token::Ident(name)) => Ok(Item::Expr(Expr::Var(name))),
            other => Ok(other),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let items = fold_not(items)?;
    let items = fold_binary(items, Token::And, Expr::and)?;
    let mut items = fold_binary(items, Token::Or, Expr::or)?;

    match (items.pop(), items.is_empty()) {
        (Some(Item::Expr(expr)), true) => Ok(expr),
        _ => Err(ParseError::MalformedExpression),
    }
}

/// Fold `~` with its following operand. Scans right to left so chained
/// prefixes (`~~A`) fold innermost first.
fn fold_not(items: Vec<Item>) -> Result<Vec<Item>, ParseError> {
    let mut output: Vec<Item> = Vec::with_capacity(items.len());

    for item in items.into_iter().rev() {
        match item {
            Item::Token(Token::Not) => match output.pop() {
                Some(Item::Expr(operand)) => output.push(Item::Expr(Expr::not(operand))),
                _ => return Err(ParseError::MissingOperand { operator: Token::Not }),
            },
            other => output.push(other),
        }
    }

    output.reverse();
    Ok(output)
}

/// Fold one infix operator left-associatively, building nodes with `build`.
/// The last produced operand is the left side, the following element the
/// right side; any missing neighbor is an error rather than a silent skip.
fn fold_binary(
    items: Vec<Item>,
    operator: Token,
    build: fn(Expr, Expr) -> Expr,
) -> Result<Vec<Item>, ParseError> {
    let mut output: Vec<Item> = Vec::with_capacity(items.len());
    let mut iter = items.into_iter();

    while let Some(item) = iter.next() {
        match item {
            Item::Token(ref token) if *token == operator => {
                let left = match output.pop() {
                    Some(Item::Expr(expr)) => expr,
                    _ => return Err(ParseError::MissingOperand { operator: operator.clone() }),
                };
                let right = match iter.next() {
                    Some(Item::Expr(expr)) => expr,
                    _ => return Err(ParseError::MissingOperand { operator: operator.clone() }),
                };
                output.push(Item::Expr(build(left, right)));
            }
            other => output.push(other),
        }
    }

    Ok(output)
}
