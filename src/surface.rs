//! Surfaces as seen by a region
//!
//! The analytic form of any surface (plane, sphere, cylinder, cone, ...) is
//! somebody else's problem. A region only ever needs to know three things
//! about a surface, captured by the [Surface] trait.
//!
//! Regions refer to surfaces by a dense index rather than the user-facing id
//! written in the input. The [SurfaceMap] owns the translation in both
//! directions and must be fully populated before any region is compiled.

// standard library
use std::collections::HashMap;

// internal modules
use crate::error::{RegionError, Result};

/// Capability required of any surface referenced by a region
///
/// Implementations must be safe to call from many threads at once, which is
/// the case for anything that only reads its own coefficients.
pub trait Surface {
    /// User-facing surface id, as written in region specifications
    fn id(&self) -> i32;

    /// Which side of the surface `xyz` lies on
    ///
    /// `true` for the positive half-space. For points on the surface the
    /// direction `uvw` is used to decide which side the particle is heading.
    fn sense(&self, xyz: &[f64; 3], uvw: &[f64; 3]) -> bool;

    /// Distance along `uvw` from `xyz` to the surface
    ///
    /// Returns `f64::INFINITY` if the ray never reaches the surface. When
    /// `coincident` is set the point is known to lie on the surface already
    /// and the degenerate branch should be used.
    fn distance(&self, xyz: &[f64; 3], uvw: &[f64; 3], coincident: bool) -> f64;
}

impl<S: Surface + ?Sized> Surface for &S {
    fn id(&self) -> i32 {
        (**self).id()
    }

    fn sense(&self, xyz: &[f64; 3], uvw: &[f64; 3]) -> bool {
        (**self).sense(xyz, uvw)
    }

    fn distance(&self, xyz: &[f64; 3], uvw: &[f64; 3], coincident: bool) -> f64 {
        (**self).distance(xyz, uvw, coincident)
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn id(&self) -> i32 {
        (**self).id()
    }

    fn sense(&self, xyz: &[f64; 3], uvw: &[f64; 3]) -> bool {
        (**self).sense(xyz, uvw)
    }

    fn distance(&self, xyz: &[f64; 3], uvw: &[f64; 3], coincident: bool) -> f64 {
        (**self).distance(xyz, uvw, coincident)
    }
}

/// Translation between user surface ids and dense surface indices
///
/// Dense indices are assigned in insertion order, so a map built with
/// [SurfaceMap::from_surfaces] indexes the same slice it was built from.
///
/// ```rust
/// # use halfspace::surface::SurfaceMap;
/// let map = SurfaceMap::from_ids([10, 20, 5]).unwrap();
/// assert_eq!(map.index(20), Some(1));
/// assert_eq!(map.id(2), Some(5));
/// assert_eq!(map.index(7), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SurfaceMap {
    /// Dense index => user id
    ids: Vec<i32>,
    /// User id => dense index
    indices: HashMap<i32, usize>,
}

impl SurfaceMap {
    /// Just calls Default::default(), nothing special to be initialised
    pub fn new() -> Self {
        Default::default()
    }

    /// Build from user ids, in the order their surfaces are stored
    pub fn from_ids<I: IntoIterator<Item = i32>>(ids: I) -> Result<Self> {
        let mut map = Self::new();
        for id in ids {
            map.insert(id)?;
        }
        Ok(map)
    }

    /// Build directly from the surface collection that will be evaluated
    pub fn from_surfaces<S: Surface>(surfaces: &[S]) -> Result<Self> {
        Self::from_ids(surfaces.iter().map(|s| s.id()))
    }

    /// Register a new surface id and return its dense index
    pub fn insert(&mut self, id: i32) -> Result<usize> {
        if self.indices.contains_key(&id) {
            return Err(RegionError::DuplicateSurface { id });
        }
        let index = self.ids.len();
        self.ids.push(id);
        self.indices.insert(id, index);
        Ok(index)
    }

    /// Dense index for a user surface id
    pub fn index(&self, id: i32) -> Option<usize> {
        self.indices.get(&id).copied()
    }

    /// User surface id for a dense index
    pub fn id(&self, index: usize) -> Option<i32> {
        self.ids.get(index).copied()
    }

    /// Number of known surfaces
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True if no surfaces have been registered
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[1, 2, 3], 1, Some(0))]
    #[case(&[1, 2, 3], 3, Some(2))]
    #[case(&[100, 7], 7, Some(1))]
    #[case(&[100, 7], 8, None)]
    fn lookup_by_id(#[case] ids: &[i32], #[case] id: i32, #[case] expected: Option<usize>) {
        let map = SurfaceMap::from_ids(ids.iter().copied()).unwrap();
        assert_eq!(map.index(id), expected);
    }

    #[test]
    fn reverse_lookup() {
        let map = SurfaceMap::from_ids([42, 9]).unwrap();
        assert_eq!(map.id(0), Some(42));
        assert_eq!(map.id(1), Some(9));
        assert_eq!(map.id(2), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let result = SurfaceMap::from_ids([1, 2, 1]);
        assert_eq!(result.unwrap_err(), RegionError::DuplicateSurface { id: 1 });
    }
}
