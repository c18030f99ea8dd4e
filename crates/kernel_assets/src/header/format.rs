use std::fmt::{self, Write};

use super::date::CalendarDate;
use super::naming::SymbolName;
use crate::encode::{font::PackedFontArray, icon::IconDescriptor};

const RULE: &str = "*****************************************";
const LENGTHS_PER_LINE: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Font,
    Icon,
}

impl AssetKind {
    pub fn element_type(&self) -> &'static str {
        match self {
            AssetKind::Font => "unsigned char",
            AssetKind::Icon => "uint32_t",
        }
    }

    fn subtitle(&self) -> [&'static str; 2] {
        match self {
            AssetKind::Font => ["This is a converted asset to embed into", "the kernel image."],
            AssetKind::Icon => ["This is a converted icon to embed into", "the kernel image."],
        }
    }
}

/// Product and copyright lines at the top of the banner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannerInfo {
    pub product: String,
    pub copyright: String,
}

impl Default for BannerInfo {
    fn default() -> Self {
        Self {
            product: "NanoShell Operating System".into(),
            copyright: "(c) 2022 iProgramInCpp".into(),
        }
    }
}

/// The input a header was generated from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub modified: Option<CalendarDate>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), modified: None }
    }

    pub fn with_modified(mut self, modified: Option<CalendarDate>) -> Self {
        self.modified = modified;
        self
    }
}

#[derive(Clone, Debug)]
pub struct HeaderFormatter {
    banner: BannerInfo,
    today: CalendarDate,
}

impl HeaderFormatter {
    pub fn new(banner: BannerInfo, today: CalendarDate) -> Self {
        Self { banner, today }
    }

    pub fn font<'a>(
        &'a self,
        name: &'a SymbolName,
        source: &'a SourceFile,
        font: &'a PackedFontArray,
    ) -> FontHeader<'a> {
        FontHeader { formatter: self, name, source, font }
    }

    pub fn icon<'a>(
        &'a self,
        name: &'a SymbolName,
        source: &'a SourceFile,
        icon: IconDescriptor<'a>,
    ) -> IconHeader<'a> {
        IconHeader { formatter: self, name, source, icon }
    }

    fn write_banner(
        &self,
        f: &mut fmt::Formatter<'_>,
        kind: AssetKind,
        source: &SourceFile,
    ) -> fmt::Result {
        writeln!(f, "/{RULE}")?;
        writeln!(f, "{}", centered(&self.banner.product))?;
        writeln!(f, "{}", centered(&self.banner.copyright))?;
        writeln!(f)?;
        for line in kind.subtitle() {
            writeln!(f, "{}", centered(line))?;
        }
        writeln!(f, " * Converted File: {}", source.name)?;
        writeln!(f, " * Converted Date: {}", self.today)?;
        if kind == AssetKind::Icon {
            match source.modified {
                Some(date) => writeln!(f, " * Icon Last Mod:  {date}")?,
                None => writeln!(f, " * Icon Last Mod:  unknown")?,
            }
        }
        writeln!(f, "{RULE}/")?;
        writeln!(f)
    }
}

fn centered(text: &str) -> String {
    let pad = RULE.len().saturating_sub(text.chars().count()) / 2;
    let mut line = " ".repeat(pad);
    line.push_str(text);
    line
}

fn byte_literal(out: &mut impl Write, value: u8) -> fmt::Result {
    write!(out, "0x{value:02X},")
}

fn word_literal(out: &mut impl Write, value: u32) -> fmt::Result {
    write!(out, "0x{value:08X},")
}

/// Font header text; render with `to_string()`.
pub struct FontHeader<'a> {
    formatter: &'a HeaderFormatter,
    name: &'a SymbolName,
    source: &'a SourceFile,
    font: &'a PackedFontArray,
}

impl fmt::Display for FontHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = AssetKind::Font;
        self.formatter.write_banner(f, kind, self.source)?;

        writeln!(f, "const {} g_{}_data[] = {{", kind.element_type(), self.name)?;
        f.write_char('\t')?;
        byte_literal(f, self.font.cell_width())?;
        f.write_char(' ')?;
        byte_literal(f, self.font.cell_height())?;
        f.write_char('\n')?;

        writeln!(f, "\t//character data:")?;
        for glyph in self.font.glyphs() {
            f.write_char('\t')?;
            for &row in glyph {
                byte_literal(f, row)?;
            }
            f.write_char('\n')?;
        }

        writeln!(f, "\t//length data:")?;
        for line in self.font.lengths().as_bytes().chunks(LENGTHS_PER_LINE) {
            f.write_char('\t')?;
            for &length in line {
                byte_literal(f, length)?;
            }
            f.write_char('\n')?;
        }
        writeln!(f, "}};")
    }
}

/// Icon header text; render with `to_string()`.
pub struct IconHeader<'a> {
    formatter: &'a HeaderFormatter,
    name: &'a SymbolName,
    source: &'a SourceFile,
    icon: IconDescriptor<'a>,
}

impl fmt::Display for IconHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = AssetKind::Icon;
        self.formatter.write_banner(f, kind, self.source)?;

        writeln!(f, "const {} g_{}_data[] = {{", kind.element_type(), self.name)?;
        for row in self.icon.data.rows() {
            f.write_char('\t')?;
            for &word in row {
                word_literal(f, word)?;
            }
            f.write_char('\n')?;
        }
        writeln!(f, "}};")?;
        writeln!(f)?;

        writeln!(f, "Image g_{}_icon = {{", self.name)?;
        writeln!(f, "\t{}, {}, g_{}_data", self.icon.width, self.icon.height, self.name)?;
        writeln!(f, "}};")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::font::{FontEncoder, GlyphLengths};
    use crate::encode::icon::IconEncoder;
    use crate::header::naming::symbol_name;
    use crate::raster::pixel::{Pixel, PixelGrid};

    fn formatter() -> HeaderFormatter {
        HeaderFormatter::new(BannerInfo::default(), CalendarDate::new(2022, 3, 14))
    }

    fn array_body(text: &str) -> &str {
        let start = text.find("[] = {\n").unwrap() + "[] = {\n".len();
        let end = text[start..].find("};").unwrap();
        &text[start..start + end]
    }

    #[test]
    fn banner_carries_source_and_dates() {
        let image = PixelGrid::filled(2, 1, Pixel::new(0, 0, 0, 0));
        let icon = IconEncoder::new().encode(&image);
        let name = symbol_name("folder.h").unwrap();
        let source = SourceFile::new("icons/folder.png")
            .with_modified(Some(CalendarDate::new(2021, 12, 1)));
        let text = formatter().icon(&name, &source, icon.descriptor()).to_string();

        assert!(text.starts_with("/*****************************************\n"));
        assert!(text.contains("NanoShell Operating System\n"));
        assert!(text.contains("This is a converted icon to embed into\n"));
        assert!(text.contains(" * Converted File: icons/folder.png\n"));
        assert!(text.contains(" * Converted Date: 2022-03-14\n"));
        assert!(text.contains(" * Icon Last Mod:  2021-12-01\n"));
        assert!(text.contains("*****************************************/\n\n"));
    }

    #[test]
    fn font_banner_omits_modification_date() {
        let image = PixelGrid::filled(16, 16, Pixel::new(0, 0, 0, 0));
        let lengths = GlyphLengths::from_bytes(&[0; 256]).unwrap();
        let font = FontEncoder::new().encode(&image, &lengths).unwrap();
        let name = symbol_name("font").unwrap();
        let text = formatter().font(&name, &SourceFile::new("font.png"), &font).to_string();

        assert!(text.contains("This is a converted asset to embed into\n"));
        assert!(!text.contains("Icon Last Mod"));
    }

    #[test]
    fn font_array_lists_every_byte_as_hex() {
        let mut image = PixelGrid::filled(128, 32, Pixel::new(0, 0, 0, 0));
        image.set(0, 0, Pixel::new(0, 0, 0, 255));
        let lengths: Vec<u8> = (0..=255).collect();
        let lengths = GlyphLengths::from_bytes(&lengths).unwrap();
        let font = FontEncoder::new().encode(&image, &lengths).unwrap();
        let name = symbol_name("fonts/system.h").unwrap();
        let text = formatter().font(&name, &SourceFile::new("font.png"), &font).to_string();

        assert!(text.contains("const unsigned char g_system_data[] = {\n\t0x08, 0x02,\n"));
        assert!(text.contains("\t//character data:\n\t0x80,0x00,\n\t0x00,0x00,\n"));
        assert!(text.contains("\t//length data:\n\t0x00,0x01,"));
        assert!(text.ends_with("0xFE,0xFF,\n};\n"));

        let values: Vec<u8> = array_body(&text)
            .lines()
            .filter(|line| !line.trim_start().starts_with("//"))
            .flat_map(|line| line.split(','))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(|token| u8::from_str_radix(token.strip_prefix("0x").unwrap(), 16).unwrap())
            .collect();
        assert_eq!(values, font.to_bytes());
    }

    #[test]
    fn icon_array_uses_padded_uppercase_words() {
        let pixels = vec![
            Pixel::new(0x12, 0x34, 0x56, 255),
            Pixel::new(0xAB, 0xCD, 0xEF, 0),
            Pixel::new(0, 0, 0, 255),
            Pixel::new(0xAB, 0xCD, 0xEF, 128),
        ];
        let icon = IconEncoder::new().encode(&PixelGrid::new(2, 2, pixels));
        let name = symbol_name("icons/ok").unwrap();
        let text = formatter().icon(&name, &SourceFile::new("ok.png"), icon.descriptor()).to_string();

        assert!(text.contains(
            "const uint32_t g_ok_data[] = {\n\t0x00123456,0xFFFFFFFF,\n\t0x00000000,0x00ABCDEF,\n};\n\n"
        ));
        assert!(text.ends_with("Image g_ok_icon = {\n\t2, 2, g_ok_data\n};\n"));
        assert!(text.contains(" * Icon Last Mod:  unknown\n"));
    }
}
