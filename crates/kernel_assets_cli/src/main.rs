use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use kernel_assets::{
    AssetConverter, BannerInfo, CalendarDate, ConvertOptions, ConvertedAsset, OutputNaming,
};
use log::{info, LevelFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert font sheets and icons into C headers for the kernel image")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    settings: HeaderSettings,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a 16x16 glyph sheet and its advance widths into a font header
    Font(FontArgs),
    /// Convert a bitmap into an icon header
    Icon(IconArgs),
}

#[derive(Parser, Debug)]
struct FontArgs {
    /// Glyph sheet image, 16x16 cells
    bitmapfile: PathBuf,
    /// Raw file holding one advance width byte per glyph
    lengthfile: PathBuf,
    /// Output name; also names the generated symbols
    output_name: String,
}

#[derive(Parser, Debug)]
struct IconArgs {
    /// Icon image
    bitmapfile: PathBuf,
    /// Output name; also names the generated symbols
    output_name: String,
}

#[derive(Parser, Debug, Clone)]
struct HeaderSettings {
    /// How the output name maps to the written file
    #[arg(long, global = true, value_enum, default_value = "ensure-extension")]
    naming: NamingChoice,
    /// Product line of the comment banner
    #[arg(long, global = true)]
    product: Option<String>,
    /// Copyright line of the comment banner
    #[arg(long, global = true)]
    copyright: Option<String>,
    /// Conversion date written into the banner (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    date: Option<CalendarDate>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum NamingChoice {
    /// Append .h unless the output name already ends with it
    EnsureExtension,
    /// Write to the output name exactly as given
    Verbatim,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let converter = AssetConverter::new(cli.settings.to_options());
    let asset = match cli.command {
        Commands::Font(args) => font(&converter, args)?,
        Commands::Icon(args) => icon(&converter, args)?,
    };
    write_asset(&asset)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new().filter_level(level).format_timestamp(None).init();
}

fn font(converter: &AssetConverter, args: FontArgs) -> Result<ConvertedAsset> {
    converter
        .convert_font_path(&args.bitmapfile, &args.lengthfile, &args.output_name)
        .with_context(|| format!("failed to convert font {:?}", args.bitmapfile))
}

fn icon(converter: &AssetConverter, args: IconArgs) -> Result<ConvertedAsset> {
    converter
        .convert_icon_path(&args.bitmapfile, &args.output_name)
        .with_context(|| format!("failed to convert icon {:?}", args.bitmapfile))
}

fn write_asset(asset: &ConvertedAsset) -> Result<()> {
    fs::write(&asset.destination, &asset.text)
        .with_context(|| format!("failed to write {:?}", asset.destination))?;
    info!("wrote g_{}_data to {}", asset.symbol, asset.destination.display());
    Ok(())
}

impl HeaderSettings {
    fn to_options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::default();
        let defaults = BannerInfo::default();
        options.banner = BannerInfo {
            product: self.product.clone().unwrap_or(defaults.product),
            copyright: self.copyright.clone().unwrap_or(defaults.copyright),
        };
        options.naming = self.naming.to_naming();
        if let Some(date) = self.date {
            options.today = date;
        }
        options
    }
}

impl NamingChoice {
    fn to_naming(self) -> OutputNaming {
        match self {
            NamingChoice::EnsureExtension => OutputNaming::EnsureExtension,
            NamingChoice::Verbatim => OutputNaming::Verbatim,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::*;

    #[test]
    fn font_requires_three_positionals() {
        let err = Cli::try_parse_from(["assetconv", "font", "font.png", "font.len"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn icon_requires_two_positionals() {
        let err = Cli::try_parse_from(["assetconv", "icon", "icon.png"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn settings_map_onto_options() {
        let cli = Cli::try_parse_from([
            "assetconv",
            "icon",
            "close.png",
            "close",
            "--naming",
            "verbatim",
            "--date",
            "2022-03-14",
            "--product",
            "Test OS",
        ])
        .unwrap();
        let options = cli.settings.to_options();

        assert_eq!(options.naming, OutputNaming::Verbatim);
        assert_eq!(options.today, CalendarDate::new(2022, 3, 14));
        assert_eq!(options.banner.product, "Test OS");
        assert_eq!(options.banner.copyright, BannerInfo::default().copyright);
    }

    #[test]
    fn rejects_malformed_date() {
        let err = Cli::try_parse_from(["assetconv", "--date", "2022-02-30", "icon", "a.png", "a"])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
