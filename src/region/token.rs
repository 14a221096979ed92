//! Tokens making up infix and postfix region programs

// external crates
use serde::Serialize;

/// Operators allowed in a region specification
///
/// | Operator       | Text | Precedence | Associativity |
/// | -------------- | ---- | ---------- | ------------- |
/// | `Complement`   | `~`  | 3          | right         |
/// | `Intersection` | none | 2          | left          |
/// | `Union`        | `\|` | 1          | left          |
///
/// Parentheses are only ever seen in the infix program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Operator {
    LeftParen,
    RightParen,
    Complement,
    Intersection,
    Union,
}

impl Operator {
    /// Binding strength, tighter operators have larger values
    ///
    /// Parentheses are never compared and sit outside of the ordering.
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Complement => 3,
            Self::Intersection => 2,
            Self::Union => 1,
            Self::LeftParen | Self::RightParen => 0,
        }
    }

    #[inline]
    /// Only the complement is right-associative
    pub const fn is_right_associative(&self) -> bool {
        matches!(self, Self::Complement)
    }

    #[inline]
    /// Check for either parenthesis
    pub const fn is_paren(&self) -> bool {
        matches!(self, Self::LeftParen | Self::RightParen)
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::Complement => "~",
            Self::Intersection => "&",
            Self::Union => "|",
        };
        write!(f, "{s}")
    }
}

/// A single element of a region program
///
/// The operand type changes as the program is built. Freshly lexed tokens
/// carry the signed surface id exactly as the user wrote it (`Token<i32>`)
/// and compiled programs carry a resolved [Halfspace].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Token<T> {
    /// Signed reference to one side of a surface
    Operand(T),
    /// Any of the [Operator] variants
    Operator(Operator),
}

impl<T> Token<T> {
    #[inline]
    /// Check if the token is the `Operand` variant
    pub const fn is_operand(&self) -> bool {
        matches!(self, Self::Operand(_))
    }

    #[inline]
    /// Check for a specific operator
    pub fn is(&self, operator: Operator) -> bool {
        matches!(self, Self::Operator(op) if *op == operator)
    }

    /// The operand, if this is one
    pub fn operand(&self) -> Option<&T> {
        match self {
            Self::Operand(value) => Some(value),
            Self::Operator(_) => None,
        }
    }

    /// Token that can close off a sub-expression, e.g. `1` or `)`
    pub fn ends_expression(&self) -> bool {
        self.is_operand() || self.is(Operator::RightParen)
    }

    /// Token that can open a sub-expression, e.g. `1`, `(`, or `~`
    pub fn starts_expression(&self) -> bool {
        self.is_operand() || self.is(Operator::LeftParen) || self.is(Operator::Complement)
    }

    /// Convert the operand while keeping operators as they are
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Token<U>, E> {
        match self {
            Self::Operand(value) => Ok(Token::Operand(f(value)?)),
            Self::Operator(op) => Ok(Token::Operator(op)),
        }
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Token<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Operand(value) => write!(f, "{value}"),
            Self::Operator(op) => write!(f, "{op}"),
        }
    }
}

/// One side of a surface, referenced by dense surface index
///
/// This is the resolved form of a signed surface id. The on-surface hint
/// given to the evaluators is an `Option<Halfspace>` and the surface crossed
/// is reported back as one.
///
/// ```rust
/// # use halfspace::region::Halfspace;
/// let inside = Halfspace::new(4, false);
/// assert_eq!(-inside, Halfspace::new(4, true));
/// assert_eq!(inside.to_string(), "-s4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Halfspace {
    /// Dense index into the surface collection
    pub surface: usize,
    /// Positive or negative side of the surface
    pub positive: bool,
}

impl Halfspace {
    pub const fn new(surface: usize, positive: bool) -> Self {
        Self { surface, positive }
    }

    /// Resolve a signed user id through the surface map
    ///
    /// The sign of a surface id of zero is always positive. `i32::MIN` has no
    /// positive counterpart and never resolves.
    pub fn from_signed_id(id: i32, map: &crate::surface::SurfaceMap) -> Option<Self> {
        map.index(id.checked_abs()?)
            .map(|surface| Self::new(surface, id >= 0))
    }

    /// Signed user id of this half-space for writing back to text
    pub fn to_signed_id(&self, map: &crate::surface::SurfaceMap) -> Option<i32> {
        map.id(self.surface)
            .map(|id| if self.positive { id } else { -id })
    }
}

impl std::ops::Neg for Halfspace {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(self.surface, !self.positive)
    }
}

impl std::fmt::Display for Halfspace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{sign}s{}", self.surface)
    }
}
