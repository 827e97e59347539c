use crate::renderer::{Rgb, Surface, background_color};

/// Software surface the frame is rendered into before presentation.
pub struct Framebuffer {
    pixels: Vec<u32>,
    width: usize,
    height: usize,
    color: u32,
    // One packed background colour per row
    background: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let background = (0..height)
            .map(|y| background_color(y, height).pack())
            .collect();
        let mut fb = Self {
            pixels: vec![0; width * height],
            width,
            height,
            color: 0,
            background,
        };
        fb.clear();
        fb
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

impl Surface for Framebuffer {
    fn set_color(&mut self, color: Rgb) {
        self.color = color.pack();
    }

    fn draw_point(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = self.color;
        }
    }

    fn vertical_line(&mut self, x: usize, y0: usize, y1: usize) {
        if x >= self.width || self.height == 0 || y0 >= self.height {
            return;
        }
        let y1 = y1.min(self.height - 1);
        let mut idx = y0 * self.width + x;
        for _y in y0..=y1 {
            self.pixels[idx] = self.color;
            idx += self.width;
        }
    }

    fn clear(&mut self) {
        for (row, &bg) in self
            .pixels
            .chunks_exact_mut(self.width.max(1))
            .zip(&self.background)
        {
            row.fill(bg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_line_is_inclusive_and_clipped() {
        let mut fb = Framebuffer::new(4, 6);
        let red = Rgb::new(255, 0, 0);
        fb.set_color(red);
        fb.vertical_line(2, 1, 99);
        for y in 1..6 {
            assert_eq!(fb.pixel(2, y), Some(red.pack()));
        }
        assert_ne!(fb.pixel(2, 0), Some(red.pack()));
        assert_ne!(fb.pixel(1, 3), Some(red.pack()));
    }

    #[test]
    fn clear_restores_background() {
        let mut fb = Framebuffer::new(3, 20);
        assert_eq!((fb.width(), fb.height()), (3, 20));
        fb.set_color(Rgb::new(1, 2, 3));
        fb.draw_point(0, 0);
        fb.draw_point(99, 99);
        fb.clear();
        assert_eq!(fb.pixel(0, 0), Some(background_color(0, 20).pack()));
        assert_eq!(fb.pixel(2, 19), Some(background_color(19, 20).pack()));
    }
}
