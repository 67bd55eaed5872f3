// grid.rs - Grid constants for the zoned Game of Life

// Pixel edge of one grid cell; every geometry boundary is snapped to it
pub const CELL_SIZE: u32 = 3;

// Layout ratios, relative to the viewport
pub const HEADER_HEIGHT_RATIO: f32 = 0.1;             // Header strip height
pub const TEXT_BOX_WIDTH_RATIO: f32 = 0.5;            // Text box width
pub const TEXT_BOX_HEIGHT_RATIO: f32 = 0.08;          // Text box height (shared by the confirm box)
pub const TEXT_BOX_TOP_HEADERS: f32 = 2.0;            // Text box top, in header heights

// Fixed pixel sizes
pub const CONFIRM_BOX_WIDTH: f32 = 150.0;             // Confirm box width
pub const CONFIRM_BOX_GAP: f32 = 10.0;                // Gap between text box and confirm box
pub const CENTERING_SLACK: f32 = 5.0;                 // Extra slack used when centering the pair

// Rows kept clear of random seeding under the header (the clock band)
pub const CLOCK_BAND_PX: u32 = 60;

/// Snap a pixel value down to the cell grid, still in pixels.
pub fn snap_to_grid(value: f32, cell_size: u32) -> f32 {
    let cell = cell_size as f32;
    (value / cell).floor() * cell
}

/// Convert a snapped pixel value to whole grid units.
pub fn to_cells(value: f32, cell_size: u32) -> i32 {
    (value / cell_size as f32).floor() as i32
}
