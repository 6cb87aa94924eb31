use eframe::egui::{Color32, ColorImage};
use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Converts a surface buffer into an egui texture image.
pub(crate) fn color_image(image: &RgbaImage) -> ColorImage {
    ColorImage {
        size: [image.width() as usize, image.height() as usize],
        pixels: image
            .pixels()
            .map(|&Rgba([r, g, b, a])| Color32::from_rgba_unmultiplied(r, g, b, a))
            .collect(),
    }
}

pub(crate) fn load_image(bytes: &[u8]) -> std::io::Result<image::DynamicImage> {
    image::load_from_memory(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

/// Placeholder prize shown when no image is configured.
pub(crate) fn checkerboard(width: u32, height: u32) -> image::DynamicImage {
    let square_size = (width / 8).max(1);
    let image = RgbImage::from_fn(width, height, |x, y| {
        let square_x = x / square_size;
        let square_y = y / square_size;
        if (square_x + square_y) % 2 == 0 {
            Rgb([235, 235, 235])
        } else {
            Rgb([90, 90, 90])
        }
    });
    image::DynamicImage::ImageRgb8(image)
}
