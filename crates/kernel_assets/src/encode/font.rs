use log::warn;

use crate::raster::pixel::RasterImage;
use crate::AssetError;

/// Glyph cells per side of a font sheet.
pub const GRID_SIZE: u32 = 16;
pub const GLYPH_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

/// Widest cell whose rows still fit in one byte.
const MAX_PACKED_WIDTH: u32 = u8::BITS;

/// 16x16 arrangement of equally sized glyph cells over a font sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphGrid {
    cell_width: u8,
    cell_height: u8,
}

impl GlyphGrid {
    pub fn new(width: u32, height: u32) -> Result<Self, AssetError> {
        let invalid = AssetError::GridDimensions { width, height };
        if width % GRID_SIZE != 0 || height % GRID_SIZE != 0 {
            return Err(invalid);
        }

        let cell_width = u8::try_from(width / GRID_SIZE).ok().filter(|&w| w > 0);
        let cell_height = u8::try_from(height / GRID_SIZE).ok().filter(|&h| h > 0);
        match (cell_width, cell_height) {
            (Some(cell_width), Some(cell_height)) => Ok(Self { cell_width, cell_height }),
            _ => Err(invalid),
        }
    }

    pub fn over<R: RasterImage>(image: &R) -> Result<Self, AssetError> {
        Self::new(image.width(), image.height())
    }

    pub fn cell_width(&self) -> u8 {
        self.cell_width
    }

    pub fn cell_height(&self) -> u8 {
        self.cell_height
    }

    /// Top-left pixel of glyph `index`.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        (
            (index % GRID_SIZE) * u32::from(self.cell_width),
            (index / GRID_SIZE) * u32::from(self.cell_height),
        )
    }
}

/// Advance width of every glyph, indexed like the glyph cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphLengths([u8; GLYPH_COUNT]);

impl GlyphLengths {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let Some(head) = bytes.get(..GLYPH_COUNT) else {
            return Err(AssetError::GlyphLengths { found: bytes.len() });
        };
        if bytes.len() > GLYPH_COUNT {
            warn!("ignoring {} trailing length bytes", bytes.len() - GLYPH_COUNT);
        }

        let mut lengths = [0; GLYPH_COUNT];
        lengths.copy_from_slice(head);
        Ok(Self(lengths))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for GlyphLengths {
    type Error = AssetError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

/// Encoded font: cell dimensions, one byte per glyph row, then the lengths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedFontArray {
    grid: GlyphGrid,
    rows: Vec<u8>,
    lengths: GlyphLengths,
}

impl PackedFontArray {
    pub fn cell_width(&self) -> u8 {
        self.grid.cell_width
    }

    pub fn cell_height(&self) -> u8 {
        self.grid.cell_height
    }

    /// Row bytes of glyph `index`, top row first.
    pub fn glyph(&self, index: usize) -> &[u8] {
        let height = usize::from(self.grid.cell_height);
        &self.rows[index * height..(index + 1) * height]
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.rows.chunks(usize::from(self.grid.cell_height))
    }

    pub fn lengths(&self) -> &GlyphLengths {
        &self.lengths
    }

    pub fn len(&self) -> usize {
        2 + self.rows.len() + GLYPH_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// The array exactly as the kernel reads it.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.push(self.grid.cell_width);
        bytes.push(self.grid.cell_height);
        bytes.extend_from_slice(&self.rows);
        bytes.extend_from_slice(self.lengths.as_bytes());
        bytes
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct FontEncoder;

impl FontEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode<R: RasterImage>(
        &self,
        image: &R,
        lengths: &GlyphLengths,
    ) -> Result<PackedFontArray, AssetError> {
        let grid = GlyphGrid::over(image)?;
        if u32::from(grid.cell_width) > MAX_PACKED_WIDTH {
            warn!(
                "glyph cells are {} pixels wide, only the rightmost {} columns are kept",
                grid.cell_width, MAX_PACKED_WIDTH
            );
        }

        let mut rows = Vec::with_capacity(GLYPH_COUNT * usize::from(grid.cell_height));
        for index in 0..GLYPH_COUNT {
            let (cx, cy) = grid.cell_origin(index);
            for j in 0..u32::from(grid.cell_height) {
                rows.push(pack_row(image, cx, cy + j, grid.cell_width));
            }
        }

        Ok(PackedFontArray { grid, rows, lengths: lengths.clone() })
    }
}

/// Opaque pixels set bits MSB-first; columns past the eighth bit from the right are lost.
fn pack_row<R: RasterImage>(image: &R, x: u32, y: u32, cell_width: u8) -> u8 {
    let cell_width = u32::from(cell_width);
    let mut byte = 0u8;
    for k in 0..cell_width {
        let bit = cell_width - 1 - k;
        if bit < MAX_PACKED_WIDTH && image.pixel(x + k, y).is_opaque() {
            byte |= 1 << bit;
        }
    }
    byte
}
