use std::fmt;
use std::path::PathBuf;

use crate::AssetError;

pub const HEADER_EXTENSION: &str = ".h";

/// How a requested output name becomes the file that gets written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputNaming {
    /// Append `.h` unless the name already ends with it.
    #[default]
    EnsureExtension,
    /// Write to the requested name unchanged.
    Verbatim,
}

impl OutputNaming {
    pub fn destination(&self, output: &str) -> PathBuf {
        match self {
            OutputNaming::EnsureExtension if !output.ends_with(HEADER_EXTENSION) => {
                PathBuf::from(format!("{output}{HEADER_EXTENSION}"))
            },
            _ => PathBuf::from(output),
        }
    }
}

/// C identifier fragment used in `g_<name>_data`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolName(String);

impl SymbolName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SymbolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive the symbol from a destination path: last component, minus `.h`.
pub fn symbol_name(destination: &str) -> Result<SymbolName, AssetError> {
    let file = destination.rsplit(['/', '\\']).next().unwrap_or(destination);
    let stem = file.strip_suffix(HEADER_EXTENSION).unwrap_or(file);

    let mut name: String = stem
        .chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '_' { ch } else { '_' })
        .collect();
    if name.is_empty() {
        return Err(AssetError::SymbolName(destination.to_owned()));
    }
    if name.starts_with(|ch: char| ch.is_ascii_digit()) {
        name.insert(0, '_');
    }

    Ok(SymbolName(name))
}
