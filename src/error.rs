//! Errors raised while building regions and cells
//!
//! Every failure here happens at construction time. Once a
//! [Region](crate::region::Region) exists, evaluating it can not fail.

use thiserror::Error;

/// Fatal problems found while compiling a region specification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// Anything outside of `()|~`, digits, signs, and whitespace
    #[error("Region specification contains invalid character, \"{character}\"")]
    InvalidCharacter { character: char },

    /// A signed literal that is not a usable surface id, e.g. a lone `-`
    #[error("Region specification contains invalid surface reference, \"{literal}\"")]
    InvalidLiteral { literal: String },

    /// Unbalanced parentheses found by the compiler
    #[error("Mismatched parentheses in region specification for cell {cell}")]
    MismatchedParentheses { cell: i32 },

    /// Operators without enough operands, or operands with no operator
    #[error("Malformed region specification for cell {cell}")]
    MalformedExpression { cell: i32 },

    /// Surface id not present in the [SurfaceMap](crate::surface::SurfaceMap)
    #[error("Surface {surface} referenced in region of cell {cell} does not exist")]
    UnknownSurface { cell: i32, surface: i32 },

    /// Two surfaces share the same user id
    #[error("Two or more surfaces use the same unique id: {id}")]
    DuplicateSurface { id: i32 },

    /// Nothing to build a geometry from
    #[error("No cells found in geometry definition")]
    NoCells,
}

/// Shorthand used throughout the library
pub type Result<T> = std::result::Result<T, RegionError>;
