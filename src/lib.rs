//! # The Halfspace crate
//!
//! Compiler and evaluator for constructive solid geometry cell regions, as
//! used by Monte Carlo particle transport codes
//!
//! ## Installation
//!
//! Install from a local checkout:
//!
//! ```shell
//! cargo install --path .
//! ```
//!
//! ## Overview
//!
//! Cells are bounded by boolean combinations of half-spaces, written in the
//! familiar cell card form such as `-1 2 (3 | ~4)`. The crate turns that text
//! into a postfix program once, and then answers the two questions a tracking
//! loop keeps asking:
//!
//! - is this point inside the cell?
//! - how far along this ray is the nearest surface bounding the cell?
//!
//! | Stage                                        | Description                                   |
//! | -------------------------------------------- | --------------------------------------------- |
//! | [tokenize](crate::region::tokenize)          | Text to infix tokens, implicit intersections  |
//! | [to_postfix](crate::region::to_postfix)      | Shunting-yard conversion to postfix           |
//! | [Region::contains](crate::region::Region)    | Inside/outside test for a point and direction |
//! | [Region::distance](crate::region::Region)    | Distance to the nearest referenced surface    |
//!
//! The analytic form of the surfaces is deliberately not included. Anything
//! implementing the [Surface](crate::surface::Surface) trait can be used.
//!
//! ## Command line
//!
//! | Command line | Description                                          |
//! | ------------ | ---------------------------------------------------- |
//! | `region2rpn` | Compile region specifications and inspect the result |
//!
//! ## Example
//!
//! ```rust
//! use halfspace::{Cell, Surface, SurfaceMap};
//!
//! // plane perpendicular to x, positive side is x > x0
//! struct XPlane { id: i32, x0: f64 }
//!
//! impl Surface for XPlane {
//!     fn id(&self) -> i32 { self.id }
//!     fn sense(&self, xyz: &[f64; 3], uvw: &[f64; 3]) -> bool {
//!         let f = xyz[0] - self.x0;
//!         if f == 0.0 { uvw[0] > 0.0 } else { f > 0.0 }
//!     }
//!     fn distance(&self, xyz: &[f64; 3], uvw: &[f64; 3], coincident: bool) -> f64 {
//!         let d = (self.x0 - xyz[0]) / uvw[0];
//!         if coincident || !(d > 0.0) { f64::INFINITY } else { d }
//!     }
//! }
//!
//! let surfaces = vec![XPlane { id: 1, x0: 0.0 }, XPlane { id: 2, x0: 10.0 }];
//! let map = SurfaceMap::from_surfaces(&surfaces).unwrap();
//! let slab = Cell::new(1, Some("slab"), None, "1 -2", &map).unwrap();
//!
//! let xyz = [4.0, 0.0, 0.0];
//! let uvw = [1.0, 0.0, 0.0];
//! assert!(slab.contains(&surfaces, &xyz, &uvw, None));
//!
//! let (distance, crossed) = slab.distance(&surfaces, &xyz, &uvw, None);
//! assert_eq!(distance, 6.0);
//! assert_eq!(crossed.and_then(|h| h.to_signed_id(&map)), Some(2));
//! ```
//!
//! In the background, the `nom` parser combinator library does the lexing,
//! `clap` is used for the command line interface, and `log` reports what
//! was compiled. Evaluation itself never logs or allocates for any region of
//! reasonable depth, so it is cheap to call from many threads at once.

// Public facing modules
pub mod cell;
pub mod error;
pub mod region;
pub mod surface;
pub mod utils;

// Re-exports of useful data structures
#[doc(inline)]
pub use crate::cell::{build_cells, Cell, CellDefinition, CellSummary};

#[doc(inline)]
pub use crate::error::RegionError;

#[doc(inline)]
pub use crate::region::{Halfspace, Region};

#[doc(inline)]
pub use crate::surface::{Surface, SurfaceMap};
