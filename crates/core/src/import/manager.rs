use std::path::Path;

use log::info;

use crate::decoders::registry::DecoderRegistry;
use crate::errors::CoreError;
use crate::models::holding::Holding;
use crate::models::settings::Settings;

use super::builder::build_holdings;
use super::header;
use super::section;
use super::tokenizer::read_record;

/// High-level import: brokerage statement bytes → raw holdings.
///
/// Flow: bytes → text (first encoding showing the section marker)
/// → holdings section → header columns (CSV records) → validated rows
pub struct CsvImporter {
    settings: Settings,
    decoders: DecoderRegistry,
}

impl CsvImporter {
    /// Build an importer for a statement format. Fails on an unknown
    /// encoding label.
    pub fn new(settings: Settings) -> Result<Self, CoreError> {
        let decoders = DecoderRegistry::from_labels(&settings.encodings)?;
        Ok(Self { settings, decoders })
    }

    /// Use a custom decoder chain instead of the configured labels.
    pub fn with_decoders(settings: Settings, decoders: DecoderRegistry) -> Self {
        Self { settings, decoders }
    }

    /// Parse one statement. `source` names it in holding ids.
    ///
    /// An empty result is not an error here; rows that fail validation are
    /// skipped.
    pub fn parse(&self, bytes: &[u8], source: &str) -> Result<Vec<Holding>, CoreError> {
        let marker = self.settings.section_marker.as_str();

        // 1. Decode
        let text = self.decoders.decode_statement(bytes, marker)?;

        // 2. Locate the holdings section
        let section = section::extract(&text, marker, &self.settings.footer_prefix)?;

        // 3. Resolve the required columns
        let headers = read_record(section.header)?;
        let columns = header::resolve(&headers, &self.settings.columns)?;

        // 4. Build holdings
        let holdings = build_holdings(&section.rows, &columns, source);
        info!(
            "{source}: read {} holdings from {} section lines",
            holdings.len(),
            section.rows.len()
        );
        Ok(holdings)
    }

    /// Read and parse a statement file (native only). Only `.csv` files are
    /// accepted; the file name is used as the id source.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn parse_file(&self, path: &Path) -> Result<Vec<Holding>, CoreError> {
        let file_name = file_name(path);
        if !is_csv(path) {
            return Err(CoreError::NotCsvFile(file_name));
        }
        let bytes = std::fs::read(path)?;
        self.parse(&bytes, &file_name)
    }
}

impl Default for CsvImporter {
    fn default() -> Self {
        Self::with_decoders(Settings::default(), DecoderRegistry::default())
    }
}

/// Display name of a statement path (its final component).
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Whether the path has a `.csv` extension (any case).
pub fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}
