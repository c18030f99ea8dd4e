use image::{DynamicImage, GenericImageView, RgbaImage};

/// One 8-bit RGBA sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl From<image::Rgba<u8>> for Pixel {
    fn from(pixel: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = pixel.0;
        Self { r, g, b, a }
    }
}

/// Read-only view of a decoded bitmap.
///
/// Callers must keep `x < width()` and `y < height()`.
pub trait RasterImage {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel(&self, x: u32, y: u32) -> Pixel;
}

impl RasterImage for RgbaImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        Pixel::from(*self.get_pixel(x, y))
    }
}

impl RasterImage for DynamicImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        Pixel::from(self.get_pixel(x, y))
    }
}

/// In-memory row-major raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
        assert_eq!(width as usize * height as usize, pixels.len());
        Self { width, height, pixels }
    }

    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        Self::new(width, height, vec![pixel; width as usize * height as usize])
    }

    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let index = self.index(x, y);
        self.pixels[index] = pixel;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }
}

impl RasterImage for PixelGrid {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        self.pixels[self.index(x, y)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_image_reads_through_trait() {
        let mut image = RgbaImage::new(2, 3);
        image.put_pixel(1, 2, image::Rgba([0x12, 0x34, 0x56, 0x78]));

        assert_eq!(RasterImage::width(&image), 2);
        assert_eq!(RasterImage::height(&image), 3);
        assert_eq!(image.pixel(1, 2), Pixel::new(0x12, 0x34, 0x56, 0x78));
        assert_eq!(image.pixel(0, 0), Pixel::default());
    }

    #[test]
    fn dynamic_image_converts_to_rgba() {
        let mut rgb = image::RgbImage::new(1, 1);
        rgb.put_pixel(0, 0, image::Rgb([9, 8, 7]));
        let image = DynamicImage::ImageRgb8(rgb);

        assert_eq!(image.pixel(0, 0), Pixel::new(9, 8, 7, 255));
    }

    #[test]
    fn pixel_grid_is_row_major() {
        let pixels = (0..6).map(|v| Pixel::new(v, 0, 0, 255)).collect();
        let grid = PixelGrid::new(3, 2, pixels);

        assert_eq!(grid.pixel(2, 0).r, 2);
        assert_eq!(grid.pixel(0, 1).r, 3);
    }
}
