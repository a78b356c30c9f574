//! Tokenizer for boolean expressions
//!
//! Turns raw expression text into a flat token sequence. The grammar is
//! small enough that a hand-written scanner is simpler than a generated one:
//! `~` (NOT), `&` (AND), `|` (OR), parentheses, and identifiers matching
//! `[A-Za-z][A-Za-z0-9_]*`. Whitespace is ignored everywhere.

use thiserror::Error;

/// A single lexical token of the expression grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Named input signal
    Ident(String),
    /// `~` prefix operator
    Not,
    /// `&` infix operator
    And,
    /// `|` infix operator
    Or,
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(name) => write!(f, "{}", name),
            Token::Not => write!(f, "~"),
            Token::And => write!(f, "&"),
            Token::Or => write!(f, "|"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// Unrecognized character in the source text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized character '{character}' at byte {position}")]
pub struct LexError {
    /// Byte offset of the offending character
    pub position: usize,
    /// The character itself
    pub character: char,
}

/// Tokenize an expression string.
///
/// Identifiers must start with a letter; digits and underscores are only
/// allowed after the first character. Any other non-whitespace character
/// fails with [`LexError`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        match ch {
            c if c.is_whitespace() => {}
            '~' => tokens.push(Token::Not),
            '&' => tokens.push(Token::And),
            '|' => tokens.push(Token::Or),
            '(' => tokens.push(Token::LParen),
            ')' => tokens.push(Token::RParen),
            c if c.is_ascii_alphabetic() => {
                let mut name = String::new();
                name.push(c);
                while let Some(&(_, next)) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        name.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            character => return Err(LexError { position, character }),
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_tokens() {
        let tokens = tokenize("~(A & B) | C").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Not,
                Token::LParen,
                Token::Ident("A".to_string()),
                Token::And,
                Token::Ident("B".to_string()),
                Token::RParen,
                Token::Or,
                Token::Ident("C".to_string()),
            ]
        );
    }

    #[test]
    fn test_whitespace_ignored() {
        assert_eq!(tokenize("  A&B "), tokenize("A & B"));
        assert_eq!(tokenize("\tA\n&\nB"), tokenize("A&B"));
    }

    #[test]
    fn test_identifier_with_digits_and_underscores() {
        let tokens = tokenize("sel_2 & data_in0").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("sel_2".to_string()),
                Token::And,
                Token::Ident("data_in0".to_string()),
            ]
        );
    }

    #[test]
    fn test_identifier_must_start_with_letter() {
        let err = tokenize("2bit").unwrap_err();
        assert_eq!(err.position, 0);
        assert_eq!(err.character, '2');

        let err = tokenize("_x").unwrap_err();
        assert_eq!(err.character, '_');
    }

    #[test]
    fn test_unrecognized_character() {
        let err = tokenize("A + B").unwrap_err();
        assert_eq!(err.position, 2);
        assert_eq!(err.character, '+');
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
        assert_eq!(tokenize("   ").unwrap(), vec![]);
    }
}
