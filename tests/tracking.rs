//! Cells bounded by axis-aligned planes, tracked the way a transport loop
//! would use them

use halfspace::{build_cells, Cell, CellDefinition, Halfspace, Surface, SurfaceMap};
use rstest::{fixture, rstest};

/// Plane perpendicular to one of the axes, positive side above `offset`
struct AxisPlane {
    id: i32,
    axis: usize,
    offset: f64,
}

impl AxisPlane {
    fn new(id: i32, axis: usize, offset: f64) -> Self {
        Self { id, axis, offset }
    }
}

impl Surface for AxisPlane {
    fn id(&self) -> i32 {
        self.id
    }

    fn sense(&self, xyz: &[f64; 3], uvw: &[f64; 3]) -> bool {
        let f = xyz[self.axis] - self.offset;
        match f == 0.0 {
            true => uvw[self.axis] > 0.0,
            false => f > 0.0,
        }
    }

    fn distance(&self, xyz: &[f64; 3], uvw: &[f64; 3], coincident: bool) -> f64 {
        if coincident || uvw[self.axis] == 0.0 {
            return f64::INFINITY;
        }
        let d = (self.offset - xyz[self.axis]) / uvw[self.axis];
        match d > 0.0 {
            true => d,
            false => f64::INFINITY,
        }
    }
}

/// Box from 0 to 10 in x and y, surfaces 11 to 14, plus a divider
/// at x = 5 as surface 20
#[fixture]
fn planes() -> Vec<AxisPlane> {
    vec![
        AxisPlane::new(11, 0, 0.0),
        AxisPlane::new(12, 0, 10.0),
        AxisPlane::new(13, 1, 0.0),
        AxisPlane::new(14, 1, 10.0),
        AxisPlane::new(20, 0, 5.0),
    ]
}

const PLUS_X: [f64; 3] = [1.0, 0.0, 0.0];

#[rstest]
#[case([5.0, 5.0, 0.0], true)]
#[case([0.5, 9.5, 3.0], true)]
#[case([-1.0, 5.0, 0.0], false)]
#[case([5.0, 11.0, 0.0], false)]
fn box_containment(planes: Vec<AxisPlane>, #[case] xyz: [f64; 3], #[case] inside: bool) {
    let map = SurfaceMap::from_surfaces(&planes).unwrap();
    let cell = Cell::new(1, Some("box"), None, "11 -12 13 -14", &map).unwrap();
    assert!(cell.is_simple());
    assert_eq!(cell.contains(&planes, &xyz, &PLUS_X, None), inside);
}

#[rstest]
#[case([2.0, 5.0, 0.0], false)]
#[case([7.0, 5.0, 0.0], true)]
#[case([-3.0, 5.0, 0.0], true)]
#[case([12.0, 5.0, 0.0], true)]
fn outside_left_half(planes: Vec<AxisPlane>, #[case] xyz: [f64; 3], #[case] inside: bool) {
    let map = SurfaceMap::from_surfaces(&planes).unwrap();
    let cell = Cell::new(2, None, None, "~(11 -20 13 -14)", &map).unwrap();
    assert!(!cell.is_simple());
    assert_eq!(cell.contains(&planes, &xyz, &PLUS_X, None), inside);
}

#[rstest]
fn walk_across_the_box(planes: Vec<AxisPlane>) {
    let map = SurfaceMap::from_surfaces(&planes).unwrap();
    let definitions = vec![
        CellDefinition {
            id: 1,
            region: "11 -20 13 -14".to_string(),
            ..Default::default()
        },
        CellDefinition {
            id: 2,
            region: "20 -12 13 -14".to_string(),
            ..Default::default()
        },
        CellDefinition {
            id: 3,
            name: Some("outside".to_string()),
            region: "-11 | 12 | -13 | 14".to_string(),
            ..Default::default()
        },
    ];
    let cells = build_cells(&definitions, &map).unwrap();

    let mut xyz = [1.0, 5.0, 0.0];
    let mut on_surface: Option<Halfspace> = None;
    let mut visited = Vec::new();

    for _ in 0..3 {
        let cell = cells
            .iter()
            .find(|c| c.contains(&planes, &xyz, &PLUS_X, on_surface))
            .unwrap();
        visited.push(cell.id);

        let (d, crossed) = cell.distance(&planes, &xyz, &PLUS_X, on_surface);
        if d == f64::INFINITY {
            break;
        }
        xyz[0] += d;
        // now sitting on the far side of the surface just crossed
        on_surface = crossed;
    }

    assert_eq!(visited, vec![1, 2, 3]);
    assert_eq!(xyz[0], 10.0);
    assert_eq!(
        on_surface.and_then(|h| h.to_signed_id(&map)),
        Some(12)
    );
}

#[rstest]
fn on_surface_hint_settles_ties(planes: Vec<AxisPlane>) {
    let map = SurfaceMap::from_surfaces(&planes).unwrap();
    let left = Cell::new(1, None, None, "11 -20 13 -14", &map).unwrap();
    let right = Cell::new(2, None, None, "20 -12 13 -14", &map).unwrap();

    // sitting exactly on the divider, travelling in -x
    let xyz = [5.0, 5.0, 0.0];
    let minus_x = [-1.0, 0.0, 0.0];
    let divider = map.index(20).unwrap();

    // without a hint the direction decides
    assert!(left.contains(&planes, &xyz, &minus_x, None));
    assert!(!right.contains(&planes, &xyz, &minus_x, None));

    // a hint on the positive side wins over the direction
    let hint = Some(Halfspace::new(divider, true));
    assert!(!left.contains(&planes, &xyz, &minus_x, hint));
    assert!(right.contains(&planes, &xyz, &minus_x, hint));

    // the divider itself is coincident and skipped for the distance
    let (d, crossed) = right.distance(&planes, &xyz, &PLUS_X, hint);
    assert_eq!(d, 5.0);
    assert_eq!(crossed.and_then(|h| h.to_signed_id(&map)), Some(12));
}

#[rstest]
fn boxed_surfaces(planes: Vec<AxisPlane>) {
    let boxed: Vec<Box<dyn Surface>> = planes
        .into_iter()
        .map(|p| Box::new(p) as Box<dyn Surface>)
        .collect();
    let map = SurfaceMap::from_surfaces(&boxed).unwrap();
    let cell = Cell::new(1, None, None, "11 -12 13 -14", &map).unwrap();
    assert!(cell.contains(&boxed, &[1.0, 1.0, 0.0], &PLUS_X, None));
}

#[rstest]
fn shared_between_threads(planes: Vec<AxisPlane>) {
    let map = SurfaceMap::from_surfaces(&planes).unwrap();
    let cell = Cell::new(1, None, None, "(11 -20 13 -14) | (20 -12 13 -14)", &map).unwrap();

    std::thread::scope(|scope| {
        for t in 0..4 {
            let (cell, planes) = (&cell, &planes);
            scope.spawn(move || {
                for i in 0..1000 {
                    let x = (t * 1000 + i) as f64 * 0.003;
                    let xyz = [x, 5.0, 0.0];
                    let inside = x < 10.0;
                    assert_eq!(cell.contains(planes, &xyz, &PLUS_X, None), inside);
                }
            });
        }
    });
}

#[rstest]
fn region_round_trip(planes: Vec<AxisPlane>) {
    let map = SurfaceMap::from_surfaces(&planes).unwrap();
    let cell = Cell::new(1, None, None, "~(11 -20)|(+13-14)", &map).unwrap();
    let text = cell.region_spec(&map);
    assert_eq!(text, " ~ ( 11 -20 ) | ( 13 -14 )");

    let again = Cell::new(1, None, None, &text, &map).unwrap();
    assert_eq!(cell, again);
}
