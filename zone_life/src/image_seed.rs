// image_seed.rs - Live cells sampled from a picture
//
// The picture is fitted into 80% x 60% of the viewport, centered
// horizontally and placed 20px below the text box. One cell per grid
// square keeps the sampled color unless the pixel is mostly transparent
// or close to white.

use std::path::Path;

use image::imageops::FilterType;
use image::RgbaImage;

use crate::cells::{LiveCellSet, Pos, Rgb};
use crate::error::ImageSeedError;
use crate::geometry::Geometry;
use crate::grid::{snap_to_grid, to_cells};

pub const IMAGE_WIDTH_RATIO: f32 = 0.8;
pub const IMAGE_HEIGHT_RATIO: f32 = 0.6;
/// Pixel gap between the text box and the top of the picture
pub const IMAGE_GAP_PX: f32 = 20.0;
/// Pixels at or below this alpha stay dead
pub const ALPHA_THRESHOLD: u8 = 128;
/// Pixels with every channel above this count as background
pub const WHITE_THRESHOLD: u8 = 240;

/// Decode a picture file once so it can be resampled for other layouts.
pub fn load_picture(path: impl AsRef<Path>) -> Result<RgbaImage, ImageSeedError> {
    let path = path.as_ref();
    let picture = image::open(path).map_err(|source| ImageSeedError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(picture.to_rgba8())
}

pub fn image_cells_from_path(path: impl AsRef<Path>, geometry: &Geometry) -> Result<LiveCellSet, ImageSeedError> {
    Ok(rgba_cells(&load_picture(path)?, geometry))
}

pub fn image_cells_from_bytes(bytes: &[u8], geometry: &Geometry) -> Result<LiveCellSet, ImageSeedError> {
    let picture = image::load_from_memory(bytes)?;
    Ok(rgba_cells(&picture.to_rgba8(), geometry))
}

/// Sample an already decoded picture onto the grid.
pub fn rgba_cells(picture: &RgbaImage, geometry: &Geometry) -> LiveCellSet {
    let mut cells = LiveCellSet::new();
    let (width, height) = picture.dimensions();
    if width == 0 || height == 0 {
        return cells;
    }

    let cell_size = geometry.cell_size.max(1);
    let cell = cell_size as f32;
    let view_width = geometry.grid_width as f32 * cell;
    let view_height = geometry.grid_height as f32 * cell;

    let ratio = (view_width * IMAGE_WIDTH_RATIO / width as f32)
        .min(view_height * IMAGE_HEIGHT_RATIO / height as f32);
    let draw_width = width as f32 * ratio;
    let draw_height = height as f32 * ratio;
    let cols = (draw_width / cell).floor() as u32;
    let rows = (draw_height / cell).floor() as u32;
    if cols == 0 || rows == 0 {
        return cells;
    }

    let top_px = geometry.inner_t.bottom().max(geometry.body_top()) as f32 * cell + IMAGE_GAP_PX;
    let left = to_cells(snap_to_grid((view_width - draw_width) / 2.0, cell_size), cell_size);
    let top = to_cells(snap_to_grid(top_px, cell_size), cell_size);

    let sampled = image::imageops::resize(picture, cols, rows, FilterType::Triangle);
    for (x, y, pixel) in sampled.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let background = r > WHITE_THRESHOLD && g > WHITE_THRESHOLD && b > WHITE_THRESHOLD;
        if a <= ALPHA_THRESHOLD || background {
            continue;
        }
        let pos = Pos::new(left + x as i32, top + y as i32);
        if geometry.in_bounds(pos) {
            cells.insert(pos, Rgb::new(r, g, b));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::compute_geometry;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn desktop() -> Geometry {
        compute_geometry(1200.0, 800.0, 3)
    }

    #[test]
    fn opaque_picture_fills_its_box_below_the_text_box() {
        let g = desktop();
        let red = RgbaImage::from_pixel(10, 5, Rgba([255, 0, 0, 255]));
        let cells = rgba_cells(&red, &g);

        assert!(!cells.is_empty());
        assert!(cells.keys().all(|&pos| g.in_bounds(pos) && pos.y > g.inner_t.bottom()));
        assert!(cells.values().all(|c| c.r >= 250 && c.g <= 5 && c.b <= 5));

        let min_x = cells.keys().map(|p| p.x).min().unwrap();
        let max_x = cells.keys().map(|p| p.x).max().unwrap();
        assert!((min_x + max_x + 1 - g.grid_width).abs() <= 2);
    }

    #[test]
    fn white_and_transparent_pixels_stay_dead() {
        let g = desktop();
        let white = RgbaImage::from_pixel(8, 8, Rgba([250, 250, 250, 255]));
        assert!(rgba_cells(&white, &g).is_empty());
        let clear = RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 0]));
        assert!(rgba_cells(&clear, &g).is_empty());
        assert!(rgba_cells(&RgbaImage::new(0, 0), &g).is_empty());
    }

    #[test]
    fn transparent_half_is_skipped() {
        let g = desktop();
        let half = RgbaImage::from_fn(4, 2, |x, _| {
            if x < 2 { Rgba([200, 30, 30, 255]) } else { Rgba([0, 0, 0, 0]) }
        });
        let cells = rgba_cells(&half, &g);
        let min_x = cells.keys().map(|p| p.x).min().unwrap();
        let max_x = cells.keys().map(|p| p.x).max().unwrap();
        let full_width = rgba_cells(&RgbaImage::from_pixel(4, 2, Rgba([200, 30, 30, 255])), &g)
            .keys()
            .map(|p| p.x)
            .max()
            .unwrap()
            - min_x
            + 1;

        assert!(max_x - min_x + 1 < full_width * 3 / 4);
        assert!(cells.values().all(|c| c.r > c.g && c.r > c.b));
    }

    #[test]
    fn encoded_bytes_match_decoded_picture() {
        let g = desktop();
        let picture = RgbaImage::from_fn(6, 3, |x, y| Rgba([(x * 40) as u8, (y * 60) as u8, 90, 255]));
        let mut bytes = Vec::new();
        picture.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();

        let decoded = image_cells_from_bytes(&bytes, &g).unwrap();
        assert_eq!(decoded, rgba_cells(&picture, &g));
        assert!(matches!(image_cells_from_bytes(b"not an image", &g), Err(ImageSeedError::Decode(_))));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = image_cells_from_path("/nonexistent/seed.png", &desktop()).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/seed.png"));
    }
}
