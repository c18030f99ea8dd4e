use std::fs;
use std::path::Path;

use image::RgbaImage;
use log::debug;

use crate::encode::font::GlyphLengths;
use crate::header::date::CalendarDate;
use crate::AssetError;

pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<RgbaImage, AssetError> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|source| AssetError::Image { path: path.to_path_buf(), source })?
        .into_rgba8();
    debug!("loaded {}x{} bitmap from {}", image.width(), image.height(), path.display());
    Ok(image)
}

pub fn read_glyph_lengths<P: AsRef<Path>>(path: P) -> Result<GlyphLengths, AssetError> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|source| AssetError::Io { path: path.to_path_buf(), source })?;
    debug!("read {} length bytes from {}", bytes.len(), path.display());
    GlyphLengths::from_bytes(&bytes)
}

/// Last modification date of `path`, if the platform reports one.
pub fn modified_date<P: AsRef<Path>>(path: P) -> Option<CalendarDate> {
    let path = path.as_ref();
    match fs::metadata(path).and_then(|meta| meta.modified()) {
        Ok(time) => Some(CalendarDate::from_system_time(time)),
        Err(err) => {
            debug!("no modification time for {}: {err}", path.display());
            None
        },
    }
}
