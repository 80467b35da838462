use serde::{Deserialize, Serialize};

use super::holding::Holding;

/// All holdings sharing one instrument name, summed, with the per-account
/// detail kept in `sub_holdings` (encounter order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedHolding {
    pub name: String,

    /// Taken from the first holding seen with this name
    #[serde(rename = "type")]
    pub asset_type: String,

    pub total_value: i64,
    pub total_gain_loss: i64,
    pub sub_holdings: Vec<Holding>,
}

/// One `{name, value}` slice of a breakdown (by holding, asset class or account).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub name: String,
    pub value: i64,
}

impl Allocation {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One portfolio snapshot. Always derived in full from `holdings`;
/// never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub total_value: i64,
    pub total_gain_loss: i64,

    /// Sorted by asset-type rank, then total value descending
    pub aggregated_holdings: Vec<AggregatedHolding>,

    /// Value per account; manual entries are bucketed by their type
    pub by_account: Vec<Allocation>,

    /// Value per raw asset type
    pub by_asset_class: Vec<Allocation>,

    /// Value per aggregated holding, long tail collapsed
    pub by_holding: Vec<Allocation>,

    /// Raw holdings in input order
    pub holdings: Vec<Holding>,
}

impl PortfolioData {
    /// Look up a raw holding by id.
    pub fn find_holding(&self, id: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

/// A user-labelled portfolio. Owns its holdings exclusively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedPortfolioData {
    pub name: String,
    pub data: PortfolioData,
}

impl NamedPortfolioData {
    pub fn new(name: impl Into<String>, data: PortfolioData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}
