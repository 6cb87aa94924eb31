use image::{imageops, Rgba, RgbaImage};
use itertools::Itertools;

/// Offscreen RGBA mask bitmap. A pixel counts as erased once its alpha is 0;
/// everything else is covered by the mask color.
pub struct ScratchSurface {
    image: RgbaImage,
}

impl ScratchSurface {
    pub fn new(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, color),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn total_pixels(&self) -> usize {
        self.image.width() as usize * self.image.height() as usize
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Clears alpha to 0 within the filled circle around `(cx, cy)`, leaving
    /// the surrounding mask and all color channels intact.
    pub fn erase_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 || radius <= 0.0 {
            return;
        }
        let ys = ((cy - radius).floor() as i64).max(0)..=((cy + radius).ceil() as i64)
            .min(height as i64 - 1);
        let xs = ((cx - radius).floor() as i64).max(0)..=((cx + radius).ceil() as i64)
            .min(width as i64 - 1);
        let radius_sq = radius * radius;
        for (y, x) in ys.cartesian_product(xs) {
            // Distance measured from the pixel center
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= radius_sq {
                self.image.get_pixel_mut(x as u32, y as u32).0[3] = 0;
            }
        }
    }

    pub fn erased_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] == 0).count()
    }

    pub fn erased_fraction(&self) -> f32 {
        match self.total_pixels() {
            0 => 0.0,
            total => self.erased_pixels() as f32 / total as f32,
        }
    }

    /// True once the erased pixel count reaches `floor(total * ratio)`.
    pub fn meets_ratio(&self, ratio: f32) -> bool {
        self.erased_pixels() >= (self.total_pixels() as f32 * ratio).floor() as usize
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        (x < self.image.width() && y < self.image.height()).then(|| self.image.get_pixel(x, y).0[3])
    }

    /// Makes the whole surface transparent.
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// A copy stretched to the new dimensions, preserving erase progress up to
    /// resampling artifacts at the hole edges.
    pub fn resampled(&self, width: u32, height: u32) -> Self {
        Self {
            image: imageops::resize(&self.image, width, height, imageops::FilterType::Triangle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAY: Rgba<u8> = Rgba([0xbb, 0xbb, 0xbb, 0xff]);

    fn erase_pixel(surface: &mut ScratchSurface, x: u32, y: u32) {
        surface.erase_circle(x as f32 + 0.5, y as f32 + 0.5, 0.5);
    }

    #[test]
    fn new_surface_is_fully_masked() {
        let surface = ScratchSurface::new(8, 6, GRAY);
        assert_eq!(surface.dimensions(), (8, 6));
        assert_eq!(surface.total_pixels(), 48);
        assert_eq!(surface.erased_pixels(), 0);
    }

    #[test]
    fn erase_circle_clears_alpha_inside_only() {
        let mut surface = ScratchSurface::new(9, 9, GRAY);
        surface.erase_circle(4.5, 4.5, 3.0);

        assert_eq!(surface.alpha_at(4, 4), Some(0));
        assert_eq!(surface.alpha_at(7, 4), Some(0));
        assert_eq!(surface.alpha_at(8, 4), Some(0xff));
        assert_eq!(surface.alpha_at(0, 0), Some(0xff));
        // Color channels of untouched pixels are unchanged
        assert_eq!(*surface.image().get_pixel(0, 0), GRAY);
    }

    #[test]
    fn erase_circle_outside_bounds_is_harmless() {
        let mut surface = ScratchSurface::new(4, 4, GRAY);
        surface.erase_circle(-20.0, -20.0, 3.0);
        assert_eq!(surface.erased_pixels(), 0);
        surface.erase_circle(3.5, -1.0, 2.0);
        assert!(surface.erased_pixels() > 0);
    }

    #[test]
    fn ratio_threshold_uses_floor() {
        // 3x5 = 15 pixels, floor(15 * 0.5) = 7
        let mut surface = ScratchSurface::new(3, 5, GRAY);
        for i in 0..6 {
            erase_pixel(&mut surface, i % 3, i / 3);
        }
        assert!(!surface.meets_ratio(0.5));
        erase_pixel(&mut surface, 0, 2);
        assert_eq!(surface.erased_pixels(), 7);
        assert!(surface.meets_ratio(0.5));
    }

    #[test]
    fn clear_erases_everything() {
        let mut surface = ScratchSurface::new(4, 4, GRAY);
        surface.clear();
        assert_eq!(surface.erased_pixels(), 16);
        assert!(surface.meets_ratio(1.0));
    }

    #[test]
    fn resampling_roughly_preserves_erased_fraction() {
        let mut surface = ScratchSurface::new(8, 8, GRAY);
        for y in 0..8 {
            for x in 0..4 {
                erase_pixel(&mut surface, x, y);
            }
        }
        assert_eq!(surface.erased_fraction(), 0.5);

        let grown = surface.resampled(16, 16);
        assert_eq!(grown.dimensions(), (16, 16));
        assert!((grown.erased_fraction() - 0.5).abs() < 0.15);

        let shrunk = surface.resampled(4, 4);
        assert!((shrunk.erased_fraction() - 0.5).abs() < 0.15);
    }
}
