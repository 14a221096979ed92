//! Containment and distance queries on compiled regions
//!
//! These run for every surface crossing of every particle. Nothing here
//! logs or returns an error, and the evaluation stack only reaches the heap
//! for unusually deep regions. A region can only be built through the
//! compiler, which guarantees a well formed postfix program.

// internal modules
use crate::region::{Halfspace, Operator, Region, Token};
use crate::surface::Surface;

// external crates
use smallvec::SmallVec;

/// Default relative precision used to separate nearly coincident surfaces
pub const FP_PRECISION: f64 = 1e-14;

/// Evaluation stack kept inline for programs of typical depth
type BoolStack = SmallVec<[bool; 32]>;

/// Containment
impl Region {
    /// Check if a point is inside the region
    ///
    /// - `surfaces` - Surface collection indexed by dense surface index
    /// - `xyz` - Position of the particle
    /// - `uvw` - Direction of the particle, used to break ties on a surface
    /// - `on_surface` - Half-space the particle is known to be sitting on
    ///
    /// The `on_surface` hint overrides whatever the surface itself would say
    /// about the sense, which avoids floating point noise right at a crossing.
    /// An empty region contains everything.
    ///
    /// # Panics
    ///
    /// Every half-space indexes directly into `surfaces`, so the slice must
    /// hold a surface for each index of the [SurfaceMap](crate::SurfaceMap)
    /// the region was compiled against.
    pub fn contains<S: Surface>(
        &self,
        surfaces: &[S],
        xyz: &[f64; 3],
        uvw: &[f64; 3],
        on_surface: Option<Halfspace>,
    ) -> bool {
        match self.simple {
            true => self.contains_simple(surfaces, xyz, uvw, on_surface),
            false => self.contains_complex(surfaces, xyz, uvw, on_surface),
        }
    }

    /// Short circuiting AND over every operand
    ///
    /// All operators of a simple region are intersections, so they can be
    /// skipped entirely.
    fn contains_simple<S: Surface>(
        &self,
        surfaces: &[S],
        xyz: &[f64; 3],
        uvw: &[f64; 3],
        on_surface: Option<Halfspace>,
    ) -> bool {
        self.rpn
            .iter()
            .filter_map(Token::operand)
            .all(|h| is_satisfied(*h, surfaces, xyz, uvw, on_surface))
    }

    /// Full boolean stack machine over the postfix program
    fn contains_complex<S: Surface>(
        &self,
        surfaces: &[S],
        xyz: &[f64; 3],
        uvw: &[f64; 3],
        on_surface: Option<Halfspace>,
    ) -> bool {
        let mut stack = BoolStack::new();

        for token in &self.rpn {
            match token {
                Token::Operand(h) => stack.push(is_satisfied(*h, surfaces, xyz, uvw, on_surface)),
                Token::Operator(Operator::Union) => combine(&mut stack, |a, b| a || b),
                Token::Operator(Operator::Intersection) => combine(&mut stack, |a, b| a && b),
                Token::Operator(Operator::Complement) => {
                    if let Some(top) = stack.last_mut() {
                        *top = !*top;
                    }
                }
                // never present in a postfix program
                Token::Operator(_) => (),
            }
        }

        // nothing on the stack means there was no region to begin with
        stack.pop().unwrap_or(true)
    }
}

/// Distance to boundary
impl Region {
    /// Distance along a ray to the nearest surface referenced by the region
    ///
    /// Returns the distance and the half-space being left when the surface is
    /// crossed, i.e. the negation of the winning operand. Every operand is a
    /// candidate no matter how the boolean operators combine them.
    ///
    /// An empty region, or a ray that never hits anything, gives
    /// `(f64::INFINITY, None)`.
    ///
    /// Uses [FP_PRECISION] to decide between nearly coincident surfaces, see
    /// [Region::distance_with_precision].
    ///
    /// # Panics
    ///
    /// As for [Region::contains], `surfaces` must cover every surface index
    /// the region refers to.
    pub fn distance<S: Surface>(
        &self,
        surfaces: &[S],
        xyz: &[f64; 3],
        uvw: &[f64; 3],
        on_surface: Option<Halfspace>,
    ) -> (f64, Option<Halfspace>) {
        self.distance_with_precision(surfaces, xyz, uvw, on_surface, FP_PRECISION)
    }

    /// Same as [Region::distance] with an explicit relative precision
    ///
    /// A candidate `d` only replaces the current minimum `m` if `d < m` and
    /// `|d - m| / m >= precision`. Candidates are visited in program order
    /// and the first of several indistinguishable surfaces wins, so repeated
    /// calls always report the same surface.
    pub fn distance_with_precision<S: Surface>(
        &self,
        surfaces: &[S],
        xyz: &[f64; 3],
        uvw: &[f64; 3],
        on_surface: Option<Halfspace>,
        precision: f64,
    ) -> (f64, Option<Halfspace>) {
        let mut min_dist = f64::INFINITY;
        let mut crossed: Option<Halfspace> = None;

        for h in self.rpn.iter().filter_map(Token::operand) {
            let coincident = on_surface == Some(*h);
            let d = surfaces[h.surface].distance(xyz, uvw, coincident);

            if d < min_dist
                && (min_dist.is_infinite() || (d - min_dist).abs() / min_dist >= precision)
            {
                min_dist = d;
                crossed = Some(-*h);
            }
        }

        (min_dist, crossed)
    }
}

/// Whether the point is on the side of the surface the half-space requires
#[inline]
fn is_satisfied<S: Surface>(
    halfspace: Halfspace,
    surfaces: &[S],
    xyz: &[f64; 3],
    uvw: &[f64; 3],
    on_surface: Option<Halfspace>,
) -> bool {
    match on_surface {
        Some(hint) if hint == halfspace => true,
        Some(hint) if hint == -halfspace => false,
        _ => surfaces[halfspace.surface].sense(xyz, uvw) == halfspace.positive,
    }
}

/// Replace the top two entries with a single combined result
#[inline]
fn combine(stack: &mut BoolStack, op: impl Fn(bool, bool) -> bool) {
    if let (Some(rhs), Some(lhs)) = (stack.pop(), stack.last_mut()) {
        *lhs = op(*lhs, rhs);
    }
}
