use crate::raycast::{Hit, RayHit, Side, sanitize_dist};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packs into the `0RGB` layout softbuffer expects.
    #[inline]
    pub fn pack(self) -> u32 {
        (self.b as u32) | ((self.g as u32) << 8) | ((self.r as u32) << 16)
    }
}

/// Where column pixels go. Presentation and window handling live behind it.
pub trait Surface {
    fn set_color(&mut self, color: Rgb);
    fn draw_point(&mut self, x: usize, y: usize);

    /// Draws the inclusive run `y0..=y1` in column `x`.
    fn vertical_line(&mut self, x: usize, y0: usize, y1: usize) {
        for y in y0..=y1 {
            self.draw_point(x, y);
        }
    }

    /// Resets the surface to the background before a new frame.
    fn clear(&mut self);
}

/// Wall material picked from a tile code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Red,
    Green,
    Blue,
    White,
    Yellow,
}

impl Material {
    pub fn from_hit(hit: Hit) -> Self {
        match hit {
            Hit::Wall(1) => Material::Red,
            Hit::Wall(2) => Material::Green,
            Hit::Wall(3) => Material::Blue,
            Hit::Wall(4) => Material::White,
            Hit::Wall(_) | Hit::Boundary => Material::Yellow,
        }
    }

    /// Base colour for x-side faces, darker variant for y-side faces.
    pub fn color(self, side: Side) -> Rgb {
        PALETTE[self as usize][(side == Side::Y) as usize]
    }
}

const LIT: u8 = 255;
const DIM: u8 = 130;

const PALETTE: [[Rgb; 2]; 5] = [
    [Rgb::new(LIT, 0, 0), Rgb::new(DIM, 0, 0)],
    [Rgb::new(0, LIT, 0), Rgb::new(0, DIM, 0)],
    [Rgb::new(0, 0, LIT), Rgb::new(0, 0, DIM)],
    [Rgb::new(LIT, LIT, LIT), Rgb::new(DIM, DIM, DIM)],
    [Rgb::new(LIT, LIT, 0), Rgb::new(DIM, DIM, 0)],
];

/// Screen rows covered by one wall stripe, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub line_height: i64,
    pub start: usize,
    pub end: usize,
}

/// Projects a perpendicular wall distance to a vertical span centred on the horizon.
pub fn column_span(perp_dist: f64, viewport_height: usize) -> ColumnSpan {
    let h = viewport_height as i64;
    let max_row = (h - 1).max(0);
    // float -> int saturates, and the distance is already clamped away from zero
    let line_height = (h as f64 / sanitize_dist(perp_dist)).floor() as i64;

    let start = (-line_height / 2 + h / 2).clamp(0, max_row);
    let end = (line_height / 2 + h / 2).clamp(0, max_row);

    ColumnSpan {
        line_height,
        start: start as usize,
        end: end as usize,
    }
}

/// Wall colour for a hit, shaded by the face it struck.
pub fn wall_color(hit: &RayHit) -> Rgb {
    Material::from_hit(hit.hit).color(hit.side)
}

/// Draws the stripe for one ray. A stripe whose span collapses still draws its
/// single clamped row.
pub fn render_column<S: Surface + ?Sized>(
    surface: &mut S,
    hit: &RayHit,
    column: usize,
    viewport_height: usize,
) {
    if viewport_height == 0 {
        return;
    }
    let span = column_span(hit.perp_dist, viewport_height);
    surface.set_color(wall_color(hit));
    surface.vertical_line(column, span.start, span.end);
}

const BACKGROUND_BANDS: usize = 9;
const BACKGROUND_BASE: [i32; 3] = [60, 40, 0];
const BACKGROUND_STEP: i32 = 5;

/// Background colour for row `y`: horizontal bands that darken towards the
/// middle of the screen and brighten again below it.
pub fn background_color(y: usize, viewport_height: usize) -> Rgb {
    let band_rows = (viewport_height / BACKGROUND_BANDS).max(1);
    let band = (y / band_rows).min(BACKGROUND_BANDS) as i32;
    let turn = (BACKGROUND_BANDS / 2) as i32;

    let offset = if band <= turn {
        -BACKGROUND_STEP * band
    } else {
        -BACKGROUND_STEP * turn + BACKGROUND_STEP * (band - turn)
    };

    let ch = |base: i32| (base + offset).clamp(0, 255) as u8;
    Rgb::new(
        ch(BACKGROUND_BASE[0]),
        ch(BACKGROUND_BASE[1]),
        ch(BACKGROUND_BASE[2]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_tile_codes() {
        let red = Material::from_hit(Hit::Wall(1));
        assert_eq!(red.color(Side::X), Rgb::new(255, 0, 0));
        assert_eq!(red.color(Side::Y), Rgb::new(130, 0, 0));
        assert_eq!(Material::from_hit(Hit::Wall(4)), Material::White);
        assert_eq!(Material::from_hit(Hit::Wall(9)), Material::Yellow);
        assert_eq!(Material::from_hit(Hit::Boundary), Material::Yellow);
    }

    #[test]
    fn y_side_is_darker_for_every_material() {
        for m in [
            Material::Red,
            Material::Green,
            Material::Blue,
            Material::White,
            Material::Yellow,
        ] {
            let lit = m.color(Side::X);
            let dim = m.color(Side::Y);
            assert!(dim.r <= lit.r && dim.g <= lit.g && dim.b <= lit.b);
            assert_ne!(lit, dim);
        }
    }

    #[test]
    fn span_for_unit_distance_fills_screen() {
        let span = column_span(1.0, 480);
        assert_eq!(span.line_height, 480);
        assert_eq!((span.start, span.end), (0, 479));
    }

    #[test]
    fn far_wall_collapses_to_horizon() {
        let span = column_span(1e6, 480);
        assert_eq!(span.line_height, 0);
        assert_eq!((span.start, span.end), (240, 240));
    }

    #[test]
    fn background_darkens_then_brightens() {
        let h = 100;
        assert_eq!(background_color(0, h), Rgb::new(60, 40, 0));
        assert_eq!(background_color(44, h), Rgb::new(40, 20, 0));
        assert_eq!(background_color(99, h), Rgb::new(65, 45, 5));
    }

    #[test]
    fn pack_is_0rgb() {
        assert_eq!(Rgb::new(0x12, 0x34, 0x56).pack(), 0x0012_3456);
    }
}
