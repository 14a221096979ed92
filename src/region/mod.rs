//! Compiled CSG regions
//!
//! # Overview
//!
//! A region is a boolean expression over half-spaces, i.e. the positive or
//! negative side of a surface. The text form is the usual one for cell cards:
//!
//! | Text       | Meaning                               |
//! | ---------- | ------------------------------------- |
//! | `1`, `+1`  | positive side of surface 1            |
//! | `-1`       | negative side of surface 1            |
//! | `1 -2`     | intersection, written as adjacency    |
//! | `1 \| 2`   | union                                 |
//! | `~1`       | complement                            |
//! | `( ... )`  | grouping                              |
//!
//! Building a [Region] goes through three stages, each available on its own:
//!
//! 1. [tokenize] the text, inserting the implicit intersections
//! 2. resolve the user surface ids to dense indices with a
//!    [SurfaceMap](crate::surface::SurfaceMap)
//! 3. [to_postfix] using the shunting-yard algorithm
//!
//! The result is immutable and can be shared freely between threads for the
//! [Region::contains] and [Region::distance] queries.
//!
//! ```rust
//! # use halfspace::region::Region;
//! # use halfspace::surface::SurfaceMap;
//! let surfaces = SurfaceMap::from_ids([1, 2, 3]).unwrap();
//! let region = Region::new(10, "(1 -2) | ~3", &surfaces).unwrap();
//!
//! assert!(!region.is_simple());
//! assert_eq!(region.to_spec(&surfaces), " ( 1 -2 ) | ~ 3");
//! ```

// Split into subfiles for development, but anything important is re-exported
mod compiler;
mod evaluate;
mod parsers;
mod token;
mod tokenizer;

#[doc(inline)]
pub use crate::region::compiler::{is_simple, to_postfix};

#[doc(inline)]
pub use crate::region::evaluate::FP_PRECISION;

#[doc(inline)]
pub use crate::region::token::{Halfspace, Operator, Token};

#[doc(inline)]
pub use crate::region::tokenizer::{insert_intersections, tokenize};

// internal modules
use crate::error::{RegionError, Result};
use crate::surface::SurfaceMap;
use crate::utils::*;

// external crates
use log::{debug, trace};

/// Infix and postfix programs for a single region
///
/// The infix program is kept for writing the region back out as text, and
/// the postfix program is what actually gets evaluated. A region made only of
/// intersections is flagged as `simple` for a faster containment check.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    infix: Vec<Token<Halfspace>>,
    rpn: Vec<Token<Halfspace>>,
    simple: bool,
}

impl Region {
    /// Compile a region specification
    ///
    /// - `cell` - Id of the owning cell, used in error messages
    /// - `region_spec` - Region text, e.g. `"-1 2 (3 | ~4)"`
    /// - `surfaces` - Map of every known surface id
    ///
    /// Any surface id not in `surfaces` is an error.
    pub fn new(cell: i32, region_spec: &str, surfaces: &SurfaceMap) -> Result<Self> {
        let tokens = tokenize(region_spec)?;

        let infix = tokens
            .into_iter()
            .map(|t| {
                t.try_map(|id| {
                    Halfspace::from_signed_id(id, surfaces).ok_or(RegionError::UnknownSurface {
                        cell,
                        surface: id.saturating_abs(),
                    })
                })
            })
            .collect::<Result<Vec<Token<Halfspace>>>>()?;

        Self::from_infix(cell, infix)
    }

    /// Compile from an already resolved infix program
    ///
    /// Every half-space must index into the surface collection later passed
    /// to the evaluators.
    pub fn from_infix(cell: i32, infix: Vec<Token<Halfspace>>) -> Result<Self> {
        let rpn = to_postfix(cell, &infix)?;
        let simple = is_simple(&rpn);

        debug!(
            "Cell {cell} region compiled: {} tokens, {} operands, simple={simple}",
            rpn.len(),
            rpn.iter().filter(|t| t.is_operand()).count()
        );
        trace!("  |_ infix: {}", space_separated(&infix));
        trace!("  |_ rpn  : {}", space_separated(&rpn));

        Ok(Self { infix, rpn, simple })
    }

    /// Infix program, including the implicit intersections
    pub fn infix(&self) -> &[Token<Halfspace>] {
        &self.infix
    }

    /// Postfix program used for evaluation
    pub fn rpn(&self) -> &[Token<Halfspace>] {
        &self.rpn
    }

    #[inline]
    /// True if the region is nothing but intersections of half-spaces
    pub fn is_simple(&self) -> bool {
        self.simple
    }

    #[inline]
    /// True if there is no region at all, i.e. the cell fills all space
    pub fn is_empty(&self) -> bool {
        self.infix.is_empty()
    }

    /// Every half-space referenced, in the order they are evaluated
    pub fn halfspaces(&self) -> impl Iterator<Item = &Halfspace> {
        self.rpn.iter().filter_map(Token::operand)
    }

    /// Write the region back out as text using the user surface ids
    ///
    /// Every token is written with a leading space. Intersections are left
    /// implicit so that the text tokenizes back to the same infix program.
    pub fn to_spec(&self, surfaces: &SurfaceMap) -> String {
        let mut s = String::new();
        for token in &self.infix {
            match token {
                Token::Operator(Operator::Intersection) => (),
                Token::Operator(op) => s += &f!(" {op}"),
                Token::Operand(h) => match h.to_signed_id(surfaces) {
                    Some(id) => s += &f!(" {id}"),
                    None => s += &f!(" {h}"),
                },
            }
        }
        s
    }

    /// Postfix program written with the user surface ids
    ///
    /// Intersections are shown as `&`, which is only for display and is not
    /// valid in a region specification.
    pub fn rpn_spec(&self, surfaces: &SurfaceMap) -> String {
        let tokens: Vec<String> = self
            .rpn
            .iter()
            .map(|token| match token {
                Token::Operand(h) => match h.to_signed_id(surfaces) {
                    Some(id) => id.to_string(),
                    None => h.to_string(),
                },
                Token::Operator(op) => op.to_string(),
            })
            .collect();
        space_separated(&tokens)
    }
}
