// geometry.rs - Grid-aligned UI regions and zone classification

use crate::cells::Pos;
use crate::grid::{
    snap_to_grid, to_cells, CENTERING_SLACK, CONFIRM_BOX_GAP, CONFIRM_BOX_WIDTH,
    HEADER_HEIGHT_RATIO, TEXT_BOX_HEIGHT_RATIO, TEXT_BOX_TOP_HEADERS, TEXT_BOX_WIDTH_RATIO,
};

/// Axis-aligned rectangle in grid units. Right and bottom edges are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// An empty rectangle contains nothing, whatever its origin.
    pub const fn contains(&self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x < self.right() && pos.y >= self.y && pos.y < self.bottom()
    }

    /// Intersection with `bounds`; disjoint rectangles collapse to zero size.
    pub fn clip(&self, bounds: &Rect) -> Rect {
        let x = self.x.max(bounds.x);
        let y = self.y.max(bounds.y);
        let right = self.right().min(bounds.right());
        let bottom = self.bottom().min(bounds.bottom());
        Rect::new(x, y, (right - x).max(0), (bottom - y).max(0))
    }
}

/// Which wrapping rule governs a cell. Never stored, always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Header,
    InnerT,
    InnerB,
    Body,
}

/// The grid and its three UI rectangles, all in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub header: Rect,
    /// Text entry box
    pub inner_t: Rect,
    /// Confirm box, right of the text box on the same rows
    pub inner_b: Rect,
    pub grid_width: i32,
    pub grid_height: i32,
    pub cell_size: u32,
}

impl Geometry {
    /// Build a geometry directly in grid units. The header spans the full
    /// width from row 0; inner boxes are clipped to the body area.
    pub fn new(
        grid_width: i32,
        grid_height: i32,
        header_rows: i32,
        inner_t: Rect,
        inner_b: Rect,
        cell_size: u32,
    ) -> Self {
        let grid_width = grid_width.max(0);
        let grid_height = grid_height.max(0);
        let header = Rect::new(0, 0, grid_width, header_rows.clamp(0, grid_height));
        let body = Rect::new(0, header.bottom(), grid_width, grid_height - header.bottom());
        Self {
            header,
            inner_t: inner_t.clip(&body),
            inner_b: inner_b.clip(&body),
            grid_width,
            grid_height,
            cell_size,
        }
    }

    /// First row of the body zone.
    pub const fn body_top(&self) -> i32 {
        self.header.bottom()
    }

    pub const fn body_height(&self) -> i32 {
        self.grid_height - self.body_top()
    }

    pub const fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.grid_width, self.grid_height)
    }

    pub const fn in_bounds(&self, pos: Pos) -> bool {
        self.bounds().contains(pos)
    }

    pub fn zone_of(&self, pos: Pos) -> Zone {
        classify_zone(pos, self)
    }
}

/// Lay out the header and both inner boxes for a viewport given in pixels.
///
/// The header is the top tenth of the viewport. The text box is half the
/// viewport wide and 8% tall, sitting two header heights down, centered
/// together with the fixed-width confirm box that follows it 10px to the
/// right. Every edge is floored to the cell grid before conversion.
pub fn compute_geometry(viewport_width: f32, viewport_height: f32, cell_size: u32) -> Geometry {
    let cell_size = cell_size.max(1);
    let snap = |v: f32| snap_to_grid(v, cell_size);
    let cells = |v: f32| to_cells(v, cell_size);

    let header_px = viewport_height * HEADER_HEIGHT_RATIO;

    let text_width_px = viewport_width * TEXT_BOX_WIDTH_RATIO;
    let text_height_px = viewport_height * TEXT_BOX_HEIGHT_RATIO;
    let text_x_px = (viewport_width - text_width_px - CONFIRM_BOX_WIDTH - CENTERING_SLACK) / 2.0;

    let inner_t_px = [
        snap(text_x_px),
        snap(header_px * TEXT_BOX_TOP_HEADERS),
        snap(text_width_px),
        snap(text_height_px),
    ];
    let inner_b_px = [
        snap(inner_t_px[0] + inner_t_px[2] + CONFIRM_BOX_GAP),
        inner_t_px[1],
        snap(CONFIRM_BOX_WIDTH),
        inner_t_px[3],
    ];
    let to_rect = |[x, y, w, h]: [f32; 4]| Rect::new(cells(x), cells(y), cells(w), cells(h));

    Geometry::new(
        cells(viewport_width),
        cells(viewport_height),
        cells(snap(header_px)),
        to_rect(inner_t_px),
        to_rect(inner_b_px),
        cell_size,
    )
}

/// Header wins over everything, then the text box, then the confirm box.
pub fn classify_zone(pos: Pos, geometry: &Geometry) -> Zone {
    if pos.y < geometry.header.bottom() {
        Zone::Header
    } else if geometry.inner_t.contains(pos) {
        Zone::InnerT
    } else if geometry.inner_b.contains(pos) {
        Zone::InnerB
    } else {
        Zone::Body
    }
}
