use log::warn;

use crate::raster::pixel::{Pixel, RasterImage};

/// Word emitted for fully transparent pixels.
pub const TRANSPARENT_SENTINEL: u32 = 0xFFFF_FFFF;

/// Row-major `0x00RRGGBB` words, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedIconArray {
    width: u32,
    height: u32,
    words: Vec<u32>,
}

impl PackedIconArray {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        // chunks() rejects a zero size; a zero-width icon has no words anyway.
        self.words.chunks(self.width.max(1) as usize)
    }

    pub fn descriptor(&self) -> IconDescriptor<'_> {
        IconDescriptor { width: self.width, height: self.height, data: self }
    }
}

/// Dimensions paired with the pixel data they describe.
#[derive(Clone, Copy, Debug)]
pub struct IconDescriptor<'a> {
    pub width: u32,
    pub height: u32,
    pub data: &'a PackedIconArray,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct IconEncoder;

impl IconEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode<R: RasterImage>(&self, image: &R) -> PackedIconArray {
        let (width, height) = (image.width(), image.height());
        let mut words = Vec::with_capacity(width as usize * height as usize);
        let mut collapsed = 0usize;

        for y in 0..height {
            for x in 0..width {
                let pixel = image.pixel(x, y);
                if !pixel.is_transparent() && !pixel.is_opaque() {
                    collapsed += 1;
                }
                words.push(pack_pixel(pixel));
            }
        }

        if collapsed > 0 {
            warn!("{collapsed} partially transparent pixels were encoded as opaque");
        }

        PackedIconArray { width, height, words }
    }
}

/// Alpha only selects between the color and the transparency sentinel.
pub fn pack_pixel(pixel: Pixel) -> u32 {
    if pixel.is_transparent() {
        return TRANSPARENT_SENTINEL;
    }
    u32::from(pixel.b) | (u32::from(pixel.g) << 8) | (u32::from(pixel.r) << 16)
}
