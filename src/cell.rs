//! Cells bounded by a region
//!
//! A [Cell] is the unit a tracking loop deals with: an id, an optional name,
//! the universe it belongs to, and the [Region] bounding it.
//!
//! ```rust
//! # use halfspace::cell::Cell;
//! # use halfspace::surface::SurfaceMap;
//! let surfaces = SurfaceMap::from_ids([1, 2]).unwrap();
//! let cell = Cell::new(7, Some("fuel"), None, "-1 2", &surfaces).unwrap();
//!
//! assert_eq!(cell.universe, 0);
//! assert_eq!(cell.region_spec(&surfaces), " -1 2");
//! ```
//!
//! Finding which of many cells holds a point is left to whatever owns the
//! universe hierarchy.

// internal modules
use crate::error::{RegionError, Result};
use crate::region::{Halfspace, Region};
use crate::surface::{Surface, SurfaceMap};

// external crates
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A single cell of the geometry
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Unique user id
    pub id: i32,
    /// Optional descriptive name, empty if not given
    pub name: String,
    /// Id of the universe containing this cell
    pub universe: i32,
    /// Compiled bounding region
    region: Region,
}

impl Cell {
    /// Build a cell from its region specification
    ///
    /// - `id` - Unique cell id
    /// - `name` - Optional name
    /// - `universe` - Owning universe, `None` for the root universe 0
    /// - `region_spec` - Region text, empty for a cell filling all space
    /// - `surfaces` - Map of every known surface id
    pub fn new(
        id: i32,
        name: Option<&str>,
        universe: Option<i32>,
        region_spec: &str,
        surfaces: &SurfaceMap,
    ) -> Result<Self> {
        Ok(Self {
            id,
            name: name.unwrap_or_default().to_string(),
            universe: universe.unwrap_or(0),
            region: Region::new(id, region_spec, surfaces)?,
        })
    }

    /// The compiled region
    pub fn region(&self) -> &Region {
        &self.region
    }

    #[inline]
    /// Cell is nothing but intersections of half-spaces
    pub fn is_simple(&self) -> bool {
        self.region.is_simple()
    }

    /// Check if a point is inside the cell, see [Region::contains]
    pub fn contains<S: Surface>(
        &self,
        surfaces: &[S],
        xyz: &[f64; 3],
        uvw: &[f64; 3],
        on_surface: Option<Halfspace>,
    ) -> bool {
        self.region.contains(surfaces, xyz, uvw, on_surface)
    }

    /// Distance to the cell boundary, see [Region::distance]
    pub fn distance<S: Surface>(
        &self,
        surfaces: &[S],
        xyz: &[f64; 3],
        uvw: &[f64; 3],
        on_surface: Option<Halfspace>,
    ) -> (f64, Option<Halfspace>) {
        self.region.distance(surfaces, xyz, uvw, on_surface)
    }

    /// Region written back out as text, see [Region::to_spec]
    pub fn region_spec(&self, surfaces: &SurfaceMap) -> String {
        self.region.to_spec(surfaces)
    }

    /// Serialisable overview of the cell for summary outputs
    pub fn summary(&self, surfaces: &SurfaceMap) -> CellSummary {
        CellSummary {
            id: self.id,
            name: self.name.clone(),
            universe: self.universe,
            region: self.region.to_spec(surfaces).trim_start().to_string(),
            rpn: self.region.rpn_spec(surfaces),
            simple: self.region.is_simple(),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cell {} (universe {}, {} tokens, simple={})",
            self.id,
            self.universe,
            self.region.rpn().len(),
            self.region.is_simple()
        )
    }
}

/// Everything worth reporting about a cell
///
/// Empty names and regions are left out of the serialised output entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellSummary {
    pub id: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub universe: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
    pub rpn: String,
    pub simple: bool,
}

/// Raw cell description as handed over by whatever reads the input
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellDefinition {
    pub id: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub universe: Option<i32>,
    #[serde(default)]
    pub region: String,
}

/// Compile every cell definition
///
/// Stops at the first cell that fails to build. An empty list of
/// definitions is an error since a geometry needs at least one cell.
pub fn build_cells(definitions: &[CellDefinition], surfaces: &SurfaceMap) -> Result<Vec<Cell>> {
    if definitions.is_empty() {
        return Err(RegionError::NoCells);
    }

    let cells = definitions
        .iter()
        .map(|d| {
            Cell::new(
                d.id,
                d.name.as_deref(),
                d.universe,
                &d.region,
                surfaces,
            )
        })
        .collect::<Result<Vec<Cell>>>()?;

    let n_simple = cells.iter().filter(|c| c.is_simple()).count();
    info!("Compiled {} cells ({} simple)", cells.len(), n_simple);
    debug!("Surfaces known: {}", surfaces.len());

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> SurfaceMap {
        SurfaceMap::from_ids([1, 2, 3]).unwrap()
    }

    fn definition(id: i32, region: &str) -> CellDefinition {
        CellDefinition {
            id,
            region: region.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults() {
        let cell = Cell::new(4, None, None, "", &map()).unwrap();
        assert_eq!(cell.name, "");
        assert_eq!(cell.universe, 0);
        assert!(cell.region().is_empty());
    }

    #[test]
    fn summary_skips_empty_fields() {
        let cell = Cell::new(4, None, Some(2), "", &map()).unwrap();
        let json = serde_json::to_string(&cell.summary(&map())).unwrap();
        assert_eq!(json, r#"{"id":4,"universe":2,"rpn":"","simple":true}"#);
    }

    #[test]
    fn summary_of_complex_cell() {
        let cell = Cell::new(9, Some("moderator"), None, "(1 2) | ~3", &map()).unwrap();
        let summary = cell.summary(&map());
        assert_eq!(summary.name, "moderator");
        assert_eq!(summary.region, "( 1 2 ) | ~ 3");
        assert_eq!(summary.rpn, "1 2 & 3 ~ |");
        assert!(!summary.simple);
    }

    #[test]
    fn build_all_cells() {
        let definitions = vec![definition(1, "-1"), definition(2, "1 -2"), definition(3, "2 | 3")];
        let cells = build_cells(&definitions, &map()).unwrap();
        assert_eq!(cells.len(), 3);
        assert!(cells[1].is_simple());
        assert!(!cells[2].is_simple());
    }

    #[test]
    fn first_failure_reported() {
        let definitions = vec![definition(1, "-1"), definition(2, "(1 -2"), definition(3, "4")];
        assert_eq!(
            build_cells(&definitions, &map()).unwrap_err(),
            RegionError::MismatchedParentheses { cell: 2 }
        );
    }

    #[test]
    fn no_cells() {
        assert_eq!(build_cells(&[], &map()).unwrap_err(), RegionError::NoCells);
    }

    #[test]
    fn definitions_from_json() {
        let definitions: Vec<CellDefinition> =
            serde_json::from_str(r#"[{"id": 1, "region": "-1 2"}, {"id": 2, "universe": 5}]"#)
                .unwrap();
        let cells = build_cells(&definitions, &map()).unwrap();
        assert_eq!(cells[1].universe, 5);
        assert!(cells[1].region().is_empty());
    }
}
