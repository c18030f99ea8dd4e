mod encode;
mod header;
mod raster;

use std::path::{Path, PathBuf};

use log::debug;

pub use encode::{
    font::{FontEncoder, GlyphGrid, GlyphLengths, PackedFontArray, GLYPH_COUNT, GRID_SIZE},
    icon::{IconDescriptor, IconEncoder, PackedIconArray, TRANSPARENT_SENTINEL},
};
pub use header::{
    date::CalendarDate,
    format::{AssetKind, BannerInfo, HeaderFormatter, SourceFile},
    naming::{symbol_name, OutputNaming, SymbolName},
};
pub use raster::{
    loader::{load_raster, modified_date, read_glyph_lengths},
    pixel::{Pixel, PixelGrid, RasterImage},
};

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("font sheet is {width}x{height}, expected both sides to be non-zero multiples of 16 with cells of at most 255 pixels")]
    GridDimensions { width: u32, height: u32 },
    #[error("length data holds {found} bytes, expected 256")]
    GlyphLengths { found: usize },
    #[error("cannot derive a symbol name from {0:?}")]
    SymbolName(String),
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub banner: BannerInfo,
    pub naming: OutputNaming,
    /// Date written into the banner as the conversion date.
    pub today: CalendarDate,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            banner: BannerInfo::default(),
            naming: OutputNaming::default(),
            today: CalendarDate::today(),
        }
    }
}

/// Generated header text together with where it should be written.
#[derive(Clone, Debug)]
pub struct ConvertedAsset {
    pub destination: PathBuf,
    pub symbol: SymbolName,
    pub text: String,
}

#[derive(Clone, Debug, Default)]
pub struct AssetConverter {
    options: ConvertOptions,
}

impl AssetConverter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn convert_font_path<P, Q>(
        &self,
        bitmap: P,
        lengths: Q,
        output: &str,
    ) -> Result<ConvertedAsset, AssetError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let bitmap = bitmap.as_ref();
        let lengths = read_glyph_lengths(lengths)?;
        let image = load_raster(bitmap)?;
        self.convert_font(&image, &lengths, &bitmap.display().to_string(), output)
    }

    pub fn convert_font<R: RasterImage>(
        &self,
        image: &R,
        lengths: &GlyphLengths,
        source_name: &str,
        output: &str,
    ) -> Result<ConvertedAsset, AssetError> {
        let destination = self.options.naming.destination(output);
        let symbol = symbol_name(&destination.to_string_lossy())?;

        let font = FontEncoder::new().encode(image, lengths)?;
        debug!(
            "encoded {}x{} glyph cells into {} bytes",
            font.cell_width(),
            font.cell_height(),
            font.len()
        );

        let source = SourceFile::new(source_name);
        let text = self.formatter().font(&symbol, &source, &font).to_string();
        Ok(ConvertedAsset { destination, symbol, text })
    }

    pub fn convert_icon_path<P: AsRef<Path>>(
        &self,
        bitmap: P,
        output: &str,
    ) -> Result<ConvertedAsset, AssetError> {
        let bitmap = bitmap.as_ref();
        let image = load_raster(bitmap)?;
        let modified = modified_date(bitmap);
        self.convert_icon(&image, &bitmap.display().to_string(), modified, output)
    }

    pub fn convert_icon<R: RasterImage>(
        &self,
        image: &R,
        source_name: &str,
        source_modified: Option<CalendarDate>,
        output: &str,
    ) -> Result<ConvertedAsset, AssetError> {
        let destination = self.options.naming.destination(output);
        let symbol = symbol_name(&destination.to_string_lossy())?;

        let icon = IconEncoder::new().encode(image);
        debug!("encoded {}x{} icon into {} words", icon.width(), icon.height(), icon.len());

        let source = SourceFile::new(source_name).with_modified(source_modified);
        let text = self.formatter().icon(&symbol, &source, icon.descriptor()).to_string();
        Ok(ConvertedAsset { destination, symbol, text })
    }

    fn formatter(&self) -> HeaderFormatter {
        HeaderFormatter::new(self.options.banner.clone(), self.options.today)
    }
}
