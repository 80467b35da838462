use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::holding::{Holding, NewHolding};
use crate::models::portfolio::NamedPortfolioData;
use crate::models::settings::Settings;
use crate::services::aggregation_service::AggregationService;

/// Add / edit / delete holdings of one named portfolio.
///
/// Pure business logic, no I/O. Every successful mutation recomputes the
/// portfolio's `data` in full from its raw holdings; a failed one leaves
/// the portfolio untouched.
pub struct PortfolioService {
    aggregation: AggregationService,
    manual_account: String,
}

impl PortfolioService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            aggregation: AggregationService::new(settings),
            manual_account: settings.manual_account.clone(),
        }
    }

    /// Add a manually entered holding. Returns its new id.
    pub fn add_holding(
        &self,
        portfolio: &mut NamedPortfolioData,
        new: NewHolding,
    ) -> Result<String, CoreError> {
        Self::validate(&new.asset_type, &new.name)?;

        let holding = Holding::new(
            format!("manual_{}", Uuid::new_v4()),
            new.asset_type.trim(),
            new.name.trim(),
            self.manual_account.as_str(),
            new.value,
            new.gain_loss,
        );
        let id = holding.id.clone();

        let mut holdings = portfolio.data.holdings.clone();
        holdings.push(holding);
        self.replace_holdings(portfolio, holdings);
        Ok(id)
    }

    /// Replace the holding with the same id.
    pub fn update_holding(
        &self,
        portfolio: &mut NamedPortfolioData,
        updated: Holding,
    ) -> Result<(), CoreError> {
        Self::validate(&updated.asset_type, &updated.name)?;
        if updated.account.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Holding account must not be empty".into(),
            ));
        }

        let idx = Self::position(portfolio, &updated.id)?;
        let mut holdings = portfolio.data.holdings.clone();
        holdings[idx] = Holding {
            asset_type: updated.asset_type.trim().to_string(),
            name: updated.name.trim().to_string(),
            account: updated.account.trim().to_string(),
            ..updated
        };
        self.replace_holdings(portfolio, holdings);
        Ok(())
    }

    /// Remove a holding by id. Returns the removed holding.
    pub fn delete_holding(
        &self,
        portfolio: &mut NamedPortfolioData,
        holding_id: &str,
    ) -> Result<Holding, CoreError> {
        let idx = Self::position(portfolio, holding_id)?;
        let mut holdings = portfolio.data.holdings.clone();
        let removed = holdings.remove(idx);
        self.replace_holdings(portfolio, holdings);
        Ok(removed)
    }

    /// Recompute the snapshot from a new raw list and swap it in.
    pub fn replace_holdings(&self, portfolio: &mut NamedPortfolioData, holdings: Vec<Holding>) {
        portfolio.data = self.aggregation.aggregate(&holdings);
    }

    fn position(portfolio: &NamedPortfolioData, holding_id: &str) -> Result<usize, CoreError> {
        portfolio
            .data
            .holdings
            .iter()
            .position(|h| h.id == holding_id)
            .ok_or_else(|| CoreError::HoldingNotFound(holding_id.to_string()))
    }

    /// Rules:
    /// - Asset type must not be blank
    /// - Name must not be blank
    fn validate(asset_type: &str, name: &str) -> Result<(), CoreError> {
        if asset_type.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Holding type must not be empty".into(),
            ));
        }
        if name.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Holding name must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl Default for PortfolioService {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}
