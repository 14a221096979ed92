//! Region specification text to infix tokens

// internal modules
use crate::error::{RegionError, Result};
use crate::region::{parsers, Operator, Token};

// external crates
use log::trace;

/// Convert a region specification into infix tokens
///
/// The characters `(`, `)`, `|`, and `~` are operators in their own right.
/// Signed integers are surface references, kept exactly as written. Any
/// whitespace is skipped, and juxtaposed terms are then joined with explicit
/// [Operator::Intersection] tokens.
///
/// An empty specification gives an empty program, i.e. all of space.
///
/// ```rust
/// # use halfspace::region::{tokenize, Operator, Token};
/// let tokens = tokenize("1 -2").unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Operand(1),
///         Token::Operator(Operator::Intersection),
///         Token::Operand(-2),
///     ]
/// );
/// ```
pub fn tokenize(region_spec: &str) -> Result<Vec<Token<i32>>> {
    let mut tokens = Vec::new();
    let mut rest = region_spec;

    loop {
        // whitespace never fails
        if let Ok((i, _)) = parsers::whitespace(rest) {
            rest = i;
        }

        let Some(c) = rest.chars().next() else {
            break;
        };

        if let Ok((i, op)) = parsers::operator(rest) {
            tokens.push(Token::Operator(op));
            rest = i;
        } else if let Ok((i, literal)) = parsers::signed_integer(rest) {
            // surfaces are looked up by absolute id, so i32::MIN has no match
            let id = literal
                .parse::<i32>()
                .ok()
                .filter(|id| *id != i32::MIN)
                .ok_or_else(|| RegionError::InvalidLiteral {
                    literal: literal.to_string(),
                })?;
            tokens.push(Token::Operand(id));
            rest = i;
        } else {
            return Err(RegionError::InvalidCharacter { character: c });
        }
    }

    let tokens = insert_intersections(tokens);
    trace!("Tokenized \"{}\" into {} tokens", region_spec.trim(), tokens.len());
    Ok(tokens)
}

/// Add the implicit intersection between adjacent terms
///
/// An intersection goes between a pair of tokens when the left one can end
/// an expression (operand or `)`) and the right one can start one (operand,
/// `(`, or `~`).
pub fn insert_intersections<T: Copy>(tokens: Vec<Token<T>>) -> Vec<Token<T>> {
    let mut infix = Vec::with_capacity(2 * tokens.len());
    let mut iter = tokens.into_iter().peekable();

    while let Some(left) = iter.next() {
        infix.push(left);
        if let Some(right) = iter.peek() {
            if left.ends_expression() && right.starts_expression() {
                infix.push(Token::Operator(Operator::Intersection));
            }
        }
    }

    infix.shrink_to_fit();
    infix
}
