use std::collections::HashMap;

use crate::models::holding::Holding;
use crate::models::portfolio::{AggregatedHolding, Allocation, NamedPortfolioData, PortfolioData};
use crate::models::settings::Settings;

/// Rank of any asset type missing from the priority table.
pub const UNRANKED_ASSET_TYPE: u32 = 90;

/// Maximum number of entries in the by-holding breakdown.
pub const MAX_HOLDING_SLICES: usize = 10;

/// Name of the slice the by-holding long tail is collapsed into.
pub const OTHER_HOLDINGS_LABEL: &str = "その他";

/// Turns raw holdings into a `PortfolioData` snapshot.
///
/// Pure: the same input sequence always yields the same output, including
/// every ordering. Nothing user-visible depends on hash iteration order;
/// maps are only used as indexes into insertion-ordered vectors.
pub struct AggregationService {
    ranks: HashMap<String, u32>,
    manual_account: String,
}

impl AggregationService {
    pub fn new(settings: &Settings) -> Self {
        let mut ranks = HashMap::new();
        for entry in &settings.asset_type_ranks {
            // First entry wins if the table lists a type twice
            ranks.entry(entry.asset_type.clone()).or_insert(entry.rank);
        }
        Self {
            ranks,
            manual_account: settings.manual_account.clone(),
        }
    }

    /// Display priority of an asset type (lower sorts first).
    pub fn rank_of(&self, asset_type: &str) -> u32 {
        self.ranks
            .get(asset_type)
            .copied()
            .unwrap_or(UNRANKED_ASSET_TYPE)
    }

    /// Compute the full snapshot for a holdings list. Never fails; empty
    /// input gives zero totals and empty breakdowns. Sums saturate at the
    /// `i64` bounds.
    pub fn aggregate(&self, holdings: &[Holding]) -> PortfolioData {
        let total_value = saturating_sum(holdings.iter().map(|h| h.value));
        let total_gain_loss = saturating_sum(holdings.iter().map(|h| h.gain_loss));

        let aggregated_holdings = self.group_by_name(holdings);
        let by_holding = collapse_long_tail(
            aggregated_holdings
                .iter()
                .map(|g| Allocation::new(g.name.as_str(), g.total_value))
                .collect(),
        );
        let by_asset_class = sum_by_key(holdings, |h| h.asset_type.as_str());
        let by_account = sum_by_key(holdings, |h| {
            if h.is_manual(&self.manual_account) {
                h.asset_type.as_str()
            } else {
                h.account.as_str()
            }
        });

        PortfolioData {
            total_value,
            total_gain_loss,
            aggregated_holdings,
            by_account,
            by_asset_class,
            by_holding,
            holdings: holdings.to_vec(),
        }
    }

    /// Aggregate the concatenation of several portfolios' holdings, in list
    /// order and then each portfolio's own holding order.
    pub fn combine(&self, portfolios: &[NamedPortfolioData]) -> PortfolioData {
        let holdings: Vec<Holding> = portfolios
            .iter()
            .flat_map(|p| p.data.holdings.iter().cloned())
            .collect();
        self.aggregate(&holdings)
    }

    /// Group by exact name, first-seen order, then stable-sort by type rank
    /// and total value descending.
    fn group_by_name(&self, holdings: &[Holding]) -> Vec<AggregatedHolding> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<AggregatedHolding> = Vec::new();

        for holding in holdings {
            let pos = *index.entry(holding.name.as_str()).or_insert_with(|| {
                groups.push(AggregatedHolding {
                    name: holding.name.clone(),
                    asset_type: holding.asset_type.clone(),
                    total_value: 0,
                    total_gain_loss: 0,
                    sub_holdings: Vec::new(),
                });
                groups.len() - 1
            });
            let group = &mut groups[pos];
            group.total_value = group.total_value.saturating_add(holding.value);
            group.total_gain_loss = group.total_gain_loss.saturating_add(holding.gain_loss);
            group.sub_holdings.push(holding.clone());
        }

        groups.sort_by(|a, b| {
            self.rank_of(&a.asset_type)
                .cmp(&self.rank_of(&b.asset_type))
                .then_with(|| b.total_value.cmp(&a.total_value))
        });
        groups
    }
}

impl Default for AggregationService {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

/// Keep the first `MAX_HOLDING_SLICES - 1` entries and fold the rest into
/// one `その他` slice, when there are more than `MAX_HOLDING_SLICES`.
fn collapse_long_tail(mut slices: Vec<Allocation>) -> Vec<Allocation> {
    if slices.len() <= MAX_HOLDING_SLICES {
        return slices;
    }
    let tail = slices.split_off(MAX_HOLDING_SLICES - 1);
    let other = saturating_sum(tail.iter().map(|s| s.value));
    slices.push(Allocation::new(OTHER_HOLDINGS_LABEL, other));
    slices
}

/// Sum `value` per key, then stable-sort by value descending (ties keep
/// first-appearance order).
fn sum_by_key<'a>(holdings: &'a [Holding], key: impl Fn(&'a Holding) -> &'a str) -> Vec<Allocation> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut sums: Vec<Allocation> = Vec::new();

    for holding in holdings {
        let name = key(holding);
        let pos = *index.entry(name).or_insert_with(|| {
            sums.push(Allocation::new(name, 0));
            sums.len() - 1
        });
        sums[pos].value = sums[pos].value.saturating_add(holding.value);
    }

    sums.sort_by(|a, b| b.value.cmp(&a.value));
    sums
}

fn saturating_sum(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0, i64::saturating_add)
}
