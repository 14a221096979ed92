//! Lexing primitives for region specifications
//!
//! All of these operate on the front of the remaining input and leave the
//! rest for the caller, the tokenizer simply loops over them.

// internal modules
use crate::region::Operator;

// external crates
use nom::branch::alt;
use nom::bytes::complete::take_while;
use nom::character::complete::{char, digit0, one_of};
use nom::combinator::{recognize, value};
use nom::sequence::pair;
use nom::IResult;

/// Any amount of leading whitespace, including none
///
/// Vertical tab counts as whitespace along with the usual ASCII set.
pub(crate) fn whitespace(i: &str) -> IResult<&str, &str> {
    take_while(|c: char| c.is_ascii_whitespace() || c == '\x0b')(i)
}

/// Single character operator, intersection has no written form
pub(crate) fn operator(i: &str) -> IResult<&str, Operator> {
    alt((
        value(Operator::LeftParen, char('(')),
        value(Operator::RightParen, char(')')),
        value(Operator::Union, char('|')),
        value(Operator::Complement, char('~')),
    ))(i)
}

/// A sign or digit followed by any number of digits, e.g. `-12`, `+3`, `7`
///
/// Returns the literal text. Whether a lone sign is acceptable is left to
/// the caller.
pub(crate) fn signed_integer(i: &str) -> IResult<&str, &str> {
    recognize(pair(one_of("+-0123456789"), digit0))(i)
}
