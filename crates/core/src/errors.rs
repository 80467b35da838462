use thiserror::Error;

/// Unified error type for the entire asset-palette-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Decoding ────────────────────────────────────────────────────
    #[error("No supported encoding produced the '{marker}' section; not a supported holdings statement")]
    UnsupportedEncoding { marker: String },

    // ── Statement format ────────────────────────────────────────────
    #[error("Section '{marker}' not found; the statement format may have changed")]
    SectionNotFound { marker: String },

    #[error("Header row not found after the holdings section marker")]
    HeaderNotFound,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("CSV read error: {0}")]
    Csv(String),

    #[error("No holdings could be read from '{file}'")]
    EmptyResult { file: String },

    // ── Batch import ────────────────────────────────────────────────
    #[error("Error ({file}): {source}")]
    Import {
        file: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Not a CSV file: {0}")]
    NotCsvFile(String),

    #[error("No CSV files were given")]
    NoFiles,

    // ── File I/O (native only) ──────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Portfolio not found at index {0}")]
    PortfolioNotFound(usize),

    #[error("Holding not found: {0}")]
    HoldingNotFound(String),
}

impl CoreError {
    /// True for structural problems found after a successful decode
    /// (section, header row or required columns missing).
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            CoreError::SectionNotFound { .. }
                | CoreError::HeaderNotFound
                | CoreError::MissingColumns(_)
        )
    }

    /// Name of the file a batch failure is attributed to, if any.
    pub fn file(&self) -> Option<&str> {
        match self {
            CoreError::Import { file, .. } | CoreError::EmptyResult { file } => Some(file),
            _ => None,
        }
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<csv::Error> for CoreError {
    fn from(e: csv::Error) -> Self {
        CoreError::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
