// patterns.rs - Classic seed patterns, as offsets from their top-left corner

use crate::cells::{LiveCellSet, Pos, Rgb};
use crate::geometry::Geometry;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

impl Pattern {
    pub fn width(&self) -> i32 {
        self.cells.iter().map(|&(x, _)| x + 1).max().unwrap_or(0)
    }

    pub fn height(&self) -> i32 {
        self.cells.iter().map(|&(_, y)| y + 1).max().unwrap_or(0)
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
    },
    Pattern {
        name: "Toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
    },
    Pattern {
        name: "Pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 4), (1, 4), (0, 5), (1, 5),
            (10, 4), (10, 5), (10, 6), (11, 3), (11, 7), (12, 2), (12, 8),
            (13, 2), (13, 8), (14, 5), (15, 3), (15, 7), (16, 4), (16, 5),
            (16, 6), (17, 5), (20, 2), (20, 3), (20, 4), (21, 2), (21, 3),
            (21, 4), (22, 1), (22, 5), (24, 0), (24, 1), (24, 5), (24, 6),
            (34, 2), (34, 3), (35, 2), (35, 3),
        ],
    },
];

pub fn pattern_by_name(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

/// Place `pattern` with its top-left corner at `origin`. Cells falling
/// outside the grid are dropped.
pub fn pattern_cells(pattern: &Pattern, origin: Pos, color: Rgb, geometry: &Geometry) -> LiveCellSet {
    pattern
        .cells
        .iter()
        .map(|&(dx, dy)| origin.offset(dx, dy))
        .filter(|&pos| geometry.in_bounds(pos))
        .map(|pos| (pos, color))
        .collect()
}

/// Origin that centers `pattern` in the body, below the inner boxes.
pub fn body_center_origin(pattern: &Pattern, geometry: &Geometry) -> Pos {
    let below_boxes = geometry.inner_t.bottom().max(geometry.inner_b.bottom()).max(geometry.body_top());
    let free_height = geometry.grid_height - below_boxes;
    Pos::new(
        (geometry.grid_width - pattern.width()) / 2,
        below_boxes + (free_height - pattern.height()) / 2,
    )
}
