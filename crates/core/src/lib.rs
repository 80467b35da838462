pub mod decoders;
pub mod errors;
pub mod import;
pub mod models;
pub mod services;

use std::path::PathBuf;

use log::{info, warn};
use serde::Serialize;

use errors::CoreError;
use import::manager::{self, CsvImporter};
use models::{
    holding::{Holding, NewHolding},
    portfolio::{NamedPortfolioData, PortfolioData},
    settings::Settings,
};
use services::{aggregation_service::AggregationService, portfolio_service::PortfolioService};

/// Title of the combined view.
pub const COMBINED_PORTFOLIO_NAME: &str = "合算ポートフォリオ";

/// Main entry point for the Asset Palette core library.
///
/// Owns every named portfolio (and through it, each portfolio's raw
/// holdings) plus the combined view derived from all of them. The combined
/// view is read-only: edits go to one named portfolio, after which the
/// combined view is rebuilt.
#[must_use]
pub struct AssetPalette {
    settings: Settings,
    importer: CsvImporter,
    aggregation: AggregationService,
    portfolio_service: PortfolioService,
    portfolios: Vec<NamedPortfolioData>,
    combined: PortfolioData,
}

impl std::fmt::Debug for AssetPalette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetPalette")
            .field("portfolios", &self.portfolios.len())
            .field("holdings", &self.combined.holdings.len())
            .field("total_value", &self.combined.total_value)
            .finish()
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    portfolios: &'a [NamedPortfolioData],
    combined: &'a PortfolioData,
}

impl AssetPalette {
    /// Create an empty workspace for the default statement format.
    pub fn new() -> Self {
        Self::build(Settings::default(), CsvImporter::default())
    }

    /// Create an empty workspace for a custom statement format.
    /// Fails if the settings name an unknown text encoding.
    pub fn with_settings(settings: Settings) -> Result<Self, CoreError> {
        let importer = CsvImporter::new(settings.clone())?;
        Ok(Self::build(settings, importer))
    }

    fn build(settings: Settings, importer: CsvImporter) -> Self {
        Self {
            aggregation: AggregationService::new(&settings),
            portfolio_service: PortfolioService::new(&settings),
            settings,
            importer,
            portfolios: Vec::new(),
            combined: PortfolioData::default(),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Import ──────────────────────────────────────────────────────

    /// Import one statement from memory as a new named portfolio.
    /// Returns the index of the new portfolio.
    ///
    /// `file_name` identifies the statement in ids and error messages.
    /// Without a `name`, the portfolio is called `ポートフォリオ {n}`.
    pub fn import_bytes(
        &mut self,
        name: Option<&str>,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<usize, CoreError> {
        let name = name
            .map(str::to_string)
            .unwrap_or_else(|| default_portfolio_name(self.portfolios.len()));
        let portfolio = self
            .import_one(name, file_name, || self.importer.parse(bytes, file_name))?;
        self.portfolios.push(portfolio);
        self.refresh_combined();
        Ok(self.portfolios.len() - 1)
    }

    /// Import several statement files, one at a time, in order.
    ///
    /// All-or-nothing: the first failing file aborts the batch, the error
    /// names that file, and none of the batch is added. Portfolios from
    /// earlier imports are untouched. Returns the indexes of the new
    /// portfolios.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn import_files(
        &mut self,
        files: &[(Option<String>, PathBuf)],
    ) -> Result<Vec<usize>, CoreError> {
        if files.is_empty() {
            return Err(CoreError::NoFiles);
        }

        let first_index = self.portfolios.len();
        let mut staged = Vec::with_capacity(files.len());
        for (offset, (name, path)) in files.iter().enumerate() {
            let file_name = manager::file_name(path);
            let name = name
                .clone()
                .unwrap_or_else(|| default_portfolio_name(first_index + offset));
            staged.push(self.import_one(name, &file_name, || self.importer.parse_file(path))?);
        }

        self.portfolios.extend(staged);
        self.refresh_combined();
        Ok((first_index..self.portfolios.len()).collect())
    }

    fn import_one(
        &self,
        name: String,
        file_name: &str,
        parse: impl FnOnce() -> Result<Vec<Holding>, CoreError>,
    ) -> Result<NamedPortfolioData, CoreError> {
        let attribute = |source: CoreError| {
            warn!("import of {file_name} failed: {source}");
            CoreError::Import {
                file: file_name.to_string(),
                source: Box::new(source),
            }
        };

        let holdings = parse().map_err(&attribute)?;
        if holdings.is_empty() {
            return Err(attribute(CoreError::EmptyResult {
                file: file_name.to_string(),
            }));
        }

        info!("imported {} holdings from {file_name} as '{name}'", holdings.len());
        Ok(NamedPortfolioData::new(name, self.aggregation.aggregate(&holdings)))
    }

    // ── Portfolios ──────────────────────────────────────────────────

    #[must_use]
    pub fn portfolios(&self) -> &[NamedPortfolioData] {
        &self.portfolios
    }

    #[must_use]
    pub fn portfolio(&self, index: usize) -> Option<&NamedPortfolioData> {
        self.portfolios.get(index)
    }

    #[must_use]
    pub fn portfolio_count(&self) -> usize {
        self.portfolios.len()
    }

    /// The combined view over every named portfolio.
    #[must_use]
    pub fn combined(&self) -> &PortfolioData {
        &self.combined
    }

    /// Rename a portfolio.
    pub fn rename_portfolio(&mut self, index: usize, name: impl Into<String>) -> Result<(), CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Portfolio name must not be empty".into(),
            ));
        }
        self.portfolio_mut(index)?.name = name;
        Ok(())
    }

    /// Remove a portfolio and return it. Later indexes shift down by one.
    pub fn remove_portfolio(&mut self, index: usize) -> Result<NamedPortfolioData, CoreError> {
        if index >= self.portfolios.len() {
            return Err(CoreError::PortfolioNotFound(index));
        }
        let removed = self.portfolios.remove(index);
        self.refresh_combined();
        Ok(removed)
    }

    /// Drop every portfolio.
    pub fn reset(&mut self) {
        self.portfolios.clear();
        self.refresh_combined();
    }

    // ── Holdings ────────────────────────────────────────────────────

    /// Look up a raw holding of one portfolio by id.
    #[must_use]
    pub fn find_holding(&self, index: usize, holding_id: &str) -> Option<&Holding> {
        self.portfolios.get(index)?.data.find_holding(holding_id)
    }

    /// Add a manually entered holding to a portfolio. Returns its id.
    pub fn add_manual_holding(&mut self, index: usize, new: NewHolding) -> Result<String, CoreError> {
        let portfolio = self
            .portfolios
            .get_mut(index)
            .ok_or(CoreError::PortfolioNotFound(index))?;
        let id = self.portfolio_service.add_holding(portfolio, new)?;
        self.refresh_combined();
        Ok(id)
    }

    /// Replace a holding (matched by id) in a portfolio.
    pub fn update_holding(&mut self, index: usize, holding: Holding) -> Result<(), CoreError> {
        let portfolio = self
            .portfolios
            .get_mut(index)
            .ok_or(CoreError::PortfolioNotFound(index))?;
        self.portfolio_service.update_holding(portfolio, holding)?;
        self.refresh_combined();
        Ok(())
    }

    /// Delete a holding from a portfolio. Returns the removed holding.
    pub fn delete_holding(&mut self, index: usize, holding_id: &str) -> Result<Holding, CoreError> {
        let portfolio = self
            .portfolios
            .get_mut(index)
            .ok_or(CoreError::PortfolioNotFound(index))?;
        let removed = self.portfolio_service.delete_holding(portfolio, holding_id)?;
        self.refresh_combined();
        Ok(removed)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Every named portfolio plus the combined view as pretty JSON, for
    /// display layers.
    pub fn to_json(&self) -> Result<String, CoreError> {
        let snapshot = Snapshot {
            portfolios: &self.portfolios,
            combined: &self.combined,
        };
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize portfolios: {e}")))
    }

    fn portfolio_mut(&mut self, index: usize) -> Result<&mut NamedPortfolioData, CoreError> {
        self.portfolios
            .get_mut(index)
            .ok_or(CoreError::PortfolioNotFound(index))
    }

    fn refresh_combined(&mut self) {
        self.combined = self.aggregation.combine(&self.portfolios);
    }
}

impl Default for AssetPalette {
    fn default() -> Self {
        Self::new()
    }
}

/// Name given to the portfolio at `index` when the user supplies none.
pub fn default_portfolio_name(index: usize) -> String {
    format!("ポートフォリオ {}", index + 1)
}
