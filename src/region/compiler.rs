//! Infix to postfix conversion using the shunting-yard algorithm

// internal modules
use crate::error::{RegionError, Result};
use crate::region::{Operator, Token};

/// Convert an infix region program to Reverse Polish Notation
///
/// Operands go straight to the output. Operators wait on a stack until
/// something that binds more loosely turns up, or a closing parenthesis
/// flushes them. Precedence from tightest to loosest is complement,
/// intersection, then union.
///
/// The resulting program is checked to make sure every operator has enough
/// operands, so anything returned is safe to evaluate on a stack machine.
///
/// - `cell` - Cell id, only used for error messages
/// - `infix` - Tokens as given by [tokenize](crate::region::tokenize)
///
/// ```rust
/// # use halfspace::region::{tokenize, to_postfix};
/// # use halfspace::utils::space_separated;
/// let infix = tokenize("(1 2) | ~3").unwrap();
/// let rpn = to_postfix(10, &infix).unwrap();
/// assert_eq!(space_separated(&rpn), "1 2 & 3 ~ |");
/// ```
pub fn to_postfix<T: Copy>(cell: i32, infix: &[Token<T>]) -> Result<Vec<Token<T>>> {
    let mut rpn: Vec<Token<T>> = Vec::with_capacity(infix.len());
    let mut stack: Vec<Operator> = Vec::new();

    for token in infix {
        match *token {
            Token::Operand(_) => rpn.push(*token),
            Token::Operator(Operator::LeftParen) => stack.push(Operator::LeftParen),
            Token::Operator(Operator::RightParen) => loop {
                // running out of operators before a left parenthesis is found
                // means the parentheses are mismatched
                match stack.pop() {
                    Some(Operator::LeftParen) => break,
                    Some(op) => rpn.push(Token::Operator(op)),
                    None => return Err(RegionError::MismatchedParentheses { cell }),
                }
            },
            Token::Operator(op) => {
                while let Some(&top) = stack.last() {
                    if !yields_to(op, top) {
                        break;
                    }
                    rpn.push(Token::Operator(top));
                    stack.pop();
                }
                stack.push(op);
            }
        }
    }

    while let Some(op) = stack.pop() {
        if op.is_paren() {
            return Err(RegionError::MismatchedParentheses { cell });
        }
        rpn.push(Token::Operator(op));
    }

    check_arity(cell, infix, &rpn)?;

    rpn.shrink_to_fit();
    Ok(rpn)
}

/// Should the incoming operator let `top` go to the output first?
///
/// Left-associative operators give way to anything at least as tight, the
/// right-associative complement only to something strictly tighter.
fn yields_to(incoming: Operator, top: Operator) -> bool {
    if top.is_paren() {
        return false;
    }
    match incoming.is_right_associative() {
        true => top.precedence() > incoming.precedence(),
        false => top.precedence() >= incoming.precedence(),
    }
}

/// Make sure the program would never underflow the evaluation stack
///
/// Simulates the stack depth: operands push, binary operators pop two and
/// push one, complements need one to work on. A non-empty program must leave
/// exactly one result. Parentheses with nothing inside, e.g. `"()"`, leave an
/// empty program from a non-empty specification and are also rejected.
fn check_arity<T>(cell: i32, infix: &[Token<T>], rpn: &[Token<T>]) -> Result<()> {
    if rpn.is_empty() {
        return match infix.is_empty() {
            true => Ok(()),
            false => Err(RegionError::MalformedExpression { cell }),
        };
    }

    let mut depth: usize = 0;
    for token in rpn {
        match token {
            Token::Operand(_) => depth += 1,
            Token::Operator(Operator::Complement) if depth >= 1 => (),
            Token::Operator(Operator::Intersection | Operator::Union) if depth >= 2 => depth -= 1,
            _ => return Err(RegionError::MalformedExpression { cell }),
        }
    }

    match depth {
        1 => Ok(()),
        _ => Err(RegionError::MalformedExpression { cell }),
    }
}

/// True for a pure intersection of half-spaces
///
/// Any union or complement in the postfix program rules out the short
/// circuiting evaluation.
pub fn is_simple<T>(rpn: &[Token<T>]) -> bool {
    !rpn
        .iter()
        .any(|t| t.is(Operator::Complement) || t.is(Operator::Union))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::tokenize;
    use crate::region::Operator::*;
    use crate::utils::space_separated;
    use rstest::rstest;

    fn compile(spec: &str) -> Result<Vec<Token<i32>>> {
        to_postfix(1, &tokenize(spec)?)
    }

    #[test]
    fn intersection_of_two() {
        let rpn = compile("1 -2").unwrap();
        assert_eq!(
            rpn,
            vec![
                Token::Operand(1),
                Token::Operand(-2),
                Token::Operator(Intersection)
            ]
        );
    }

    #[test]
    fn union_complement_paren_mix() {
        let rpn = compile("(1 2) | ~3").unwrap();
        assert_eq!(
            rpn,
            vec![
                Token::Operand(1),
                Token::Operand(2),
                Token::Operator(Intersection),
                Token::Operand(3),
                Token::Operator(Complement),
                Token::Operator(Union),
            ]
        );
        assert!(!is_simple(&rpn));
    }

    #[rstest]
    #[case("1 2 3", "1 2 & 3 &")]
    #[case("1 | 2 | 3", "1 2 | 3 |")]
    #[case("1 | 2 3", "1 2 3 & |")]
    #[case("1 2 | 3", "1 2 & 3 |")]
    #[case("~1 2", "1 ~ 2 &")]
    #[case("~(1 | 2)", "1 2 | ~")]
    #[case("~~1", "1 ~ ~")]
    #[case("1 ~2", "1 2 ~ &")]
    #[case("((1))", "1")]
    #[case("-1 (2 | -3) 4", "-1 2 -3 | & 4 &")]
    #[case("", "")]
    fn precedence_and_grouping(#[case] spec: &str, #[case] expected: &str) {
        assert_eq!(space_separated(&compile(spec).unwrap()), expected);
    }

    #[rstest]
    #[case("1 2 3", true)]
    #[case("(1 2) 3", true)]
    #[case("-1", true)]
    #[case("", true)]
    #[case("1 | 2", false)]
    #[case("~1", false)]
    fn simple_detection(#[case] spec: &str, #[case] expected: bool) {
        assert_eq!(is_simple(&compile(spec).unwrap()), expected);
    }

    #[rstest]
    #[case("(1")]
    #[case("1)")]
    #[case("((1 2)")]
    #[case("(1 2))(3")]
    fn mismatched_parentheses(#[case] spec: &str) {
        assert_eq!(
            compile(spec).unwrap_err(),
            RegionError::MismatchedParentheses { cell: 1 }
        );
    }

    #[test]
    fn mismatch_names_the_cell() {
        let err = to_postfix(27, &tokenize("(1").unwrap()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Mismatched parentheses in region specification for cell 27"
        );
    }

    #[rstest]
    #[case("1 |")]
    #[case("| 1")]
    #[case("~")]
    #[case("1 ~")]
    #[case("()")]
    #[case("1 | | 2")]
    fn malformed_expressions(#[case] spec: &str) {
        assert_eq!(
            compile(spec).unwrap_err(),
            RegionError::MalformedExpression { cell: 1 }
        );
    }
}
