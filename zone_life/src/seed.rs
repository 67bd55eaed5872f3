// seed.rs - Initial generations: random fill, text and the pre-run scene
//
// Everything here produces a `LiveCellSet` clipped to the grid; nothing
// touches the engine directly.

use rand::Rng;

use crate::cells::{merge, LiveCellSet, Pos, Rgb};
use crate::font::{rasterize, text_height, text_width, GLYPH_HEIGHT};
use crate::geometry::{Geometry, Rect};
use crate::grid::CLOCK_BAND_PX;

pub const DEFAULT_DENSITY: f64 = 0.15;

/// Rows under the header that random seeding leaves free for the clock.
pub fn clock_band_rows(geometry: &Geometry) -> i32 {
    CLOCK_BAND_PX.div_ceil(geometry.cell_size.max(1)) as i32
}

/// Scatter randomly colored cells over the open body: not in either inner
/// box, and not in the clock band just below the header.
pub fn random_fill<R: Rng>(geometry: &Geometry, density: f64, rng: &mut R) -> LiveCellSet {
    let band_end = geometry.body_top() + clock_band_rows(geometry);
    let mut cells = LiveCellSet::new();
    for y in band_end..geometry.grid_height {
        for x in 0..geometry.grid_width {
            let pos = Pos::new(x, y);
            if geometry.inner_t.contains(pos) || geometry.inner_b.contains(pos) {
                continue;
            }
            if rng.random::<f64>() < density {
                cells.insert(pos, Rgb::new(rng.random(), rng.random(), rng.random()));
            }
        }
    }
    cells
}

/// How text cells are colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextPaint {
    Solid(Rgb),
    /// Hue sweeps 0..360 degrees left to right, pastel lightness.
    Rainbow,
}

impl TextPaint {
    fn color_at(self, progress: f32) -> Rgb {
        match self {
            TextPaint::Solid(color) => color,
            TextPaint::Rainbow => Rgb::from_hsl(progress * 360.0, 1.0, 0.7),
        }
    }
}

/// Rasterize `text` with its top-left corner at `origin`.
pub fn text_cells(text: &str, origin: Pos, scale: i32, paint: TextPaint) -> LiveCellSet {
    let width = text_width(text, scale).max(1) as f32;
    rasterize(text, scale)
        .into_iter()
        .map(|(x, y)| (origin.offset(x, y), paint.color_at(x as f32 / width)))
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub enum Align {
    Center,
    /// Left aligned, indented by this many cells.
    Left(i32),
}

/// Text sized to `fill` of the region height (shrunk to fit its width),
/// vertically centered and clipped to the region.
pub fn text_in_region(text: &str, region: &Rect, fill: f32, align: Align, paint: TextPaint) -> LiveCellSet {
    if region.is_empty() || text.is_empty() {
        return LiveCellSet::new();
    }
    let indent = match align {
        Align::Center => 0,
        Align::Left(indent) => indent,
    };
    let mut scale = ((region.height as f32 * fill) / GLYPH_HEIGHT as f32).floor().max(1.0) as i32;
    while scale > 1 && text_width(text, scale) > region.width - indent {
        scale -= 1;
    }

    let x = match align {
        Align::Center => region.x + (region.width - text_width(text, scale)) / 2,
        Align::Left(indent) => region.x + indent,
    };
    let y = region.y + (region.height - text_height(scale)) / 2;

    let mut cells = text_cells(text, Pos::new(x, y), scale, paint);
    cells.retain(|&pos, _| region.contains(pos));
    cells
}

/// What the pre-run frame shows.
#[derive(Debug, Clone, Copy)]
pub struct SetupScene<'a> {
    pub title: &'a str,
    pub clock: &'a str,
    pub user_text: &'a str,
    pub confirm_label: &'a str,
}

/// Compose the pre-run frame: rainbow title in the header, the clock
/// between header and text box, the user's text in the text box and the
/// confirm label in the confirm box.
pub fn setup_scene(geometry: &Geometry, scene: &SetupScene<'_>) -> LiveCellSet {
    let ink = TextPaint::Solid(Rgb::BLACK);
    let clock_region = Rect::new(
        0,
        geometry.body_top(),
        geometry.grid_width,
        geometry.inner_t.y - geometry.body_top(),
    );
    // 10px left padding inside the text box
    let text_indent = (10 / geometry.cell_size.max(1)) as i32;

    let mut cells = text_in_region(scene.title, &geometry.header, 0.6, Align::Center, TextPaint::Rainbow);
    merge(&mut cells, text_in_region(scene.clock, &clock_region, 0.6, Align::Center, ink));
    merge(
        &mut cells,
        text_in_region(scene.user_text, &geometry.inner_t, 0.75, Align::Left(text_indent), ink),
    );
    merge(&mut cells, text_in_region(scene.confirm_label, &geometry.inner_b, 0.6, Align::Center, ink));
    cells.retain(|&pos, _| geometry.in_bounds(pos));
    cells
}
