// cells.rs - Positions, colors and the live cell set

use std::collections::BTreeMap;
use std::fmt;

/// A cell position in grid units (not pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

impl From<(i32, i32)> for Pos {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Opaque cell color. The engine only copies it around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hue in degrees, saturation and lightness in `0.0..=1.0`.
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;
        let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// One color per live position. Ordered so that a generation can be
/// replayed exactly under a seeded random source.
pub type LiveCellSet = BTreeMap<Pos, Rgb>;

/// Copy every cell of `from` into `into`; `from` wins on shared positions.
pub fn merge(into: &mut LiveCellSet, from: LiveCellSet) {
    into.extend(from);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hsl_primaries() {
        assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hsl(120.0, 1.0, 0.5), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hsl(240.0, 1.0, 0.5), Rgb::new(0, 0, 255));
        assert_eq!(Rgb::from_hsl(360.0, 1.0, 0.5), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hsl(42.0, 0.0, 1.0), Rgb::WHITE);
    }

    #[test]
    fn pastel_lightness_stays_bright() {
        let c = Rgb::from_hsl(200.0, 1.0, 0.7);
        assert!(c.r >= 100 && c.g >= 100 && c.b == 255);
    }

    #[test]
    fn merge_overwrites_shared_keys() {
        let mut base = LiveCellSet::new();
        base.insert(Pos::new(1, 1), Rgb::BLACK);
        base.insert(Pos::new(2, 2), Rgb::BLACK);
        let mut top = LiveCellSet::new();
        top.insert(Pos::new(2, 2), Rgb::WHITE);

        merge(&mut base, top);
        assert_eq!(base.len(), 2);
        assert_eq!(base[&Pos::new(2, 2)], Rgb::WHITE);
    }

    #[test]
    fn display_matches_css_form() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "rgb(1,2,3)");
    }
}
