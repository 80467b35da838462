use serde::Serialize;

use crate::models::portfolio::{AggregatedHolding, Allocation};

/// One line of a breakdown table: name, value and share of the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRow {
    pub name: String,
    pub value: i64,
    pub share_pct: f64,
}

/// One line of the holdings table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRow {
    pub name: String,
    pub asset_type: String,
    pub value: i64,
    pub gain_loss: i64,
    pub gain_loss_rate: f64,
    /// Set when the group is a single manual entry
    pub editable_id: Option<String>,
    /// Per-account detail; empty unless the group has several holdings
    pub accounts: Vec<AccountRow>,
}

/// Per-account detail under a holdings table line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRow {
    pub id: String,
    pub account: String,
    pub value: i64,
    pub gain_loss: i64,
    pub gain_loss_rate: f64,
    pub editable: bool,
}

/// Display-side figures derived from a `PortfolioData`: percentages,
/// gain/loss rates and yen formatting.
pub struct ReportService {
    manual_account: String,
}

impl ReportService {
    pub fn new(manual_account: impl Into<String>) -> Self {
        Self {
            manual_account: manual_account.into(),
        }
    }

    /// Breakdown rows with each slice's share of `total`.
    pub fn allocation_rows(&self, slices: &[Allocation], total: i64) -> Vec<AllocationRow> {
        slices
            .iter()
            .map(|s| AllocationRow {
                name: s.name.clone(),
                value: s.value,
                share_pct: share_pct(s.value, total),
            })
            .collect()
    }

    /// Holdings table rows, in aggregate order.
    pub fn holding_rows(&self, groups: &[AggregatedHolding]) -> Vec<HoldingRow> {
        groups
            .iter()
            .map(|group| {
                let single_manual = match group.sub_holdings.as_slice() {
                    [only] if only.is_manual(&self.manual_account) => Some(only.id.clone()),
                    _ => None,
                };
                let accounts = if group.sub_holdings.len() > 1 {
                    group
                        .sub_holdings
                        .iter()
                        .map(|h| AccountRow {
                            id: h.id.clone(),
                            account: h.account.clone(),
                            value: h.value,
                            gain_loss: h.gain_loss,
                            gain_loss_rate: gain_loss_rate(h.value, h.gain_loss),
                            editable: h.is_manual(&self.manual_account),
                        })
                        .collect()
                } else {
                    Vec::new()
                };

                HoldingRow {
                    name: group.name.clone(),
                    asset_type: group.asset_type.clone(),
                    value: group.total_value,
                    gain_loss: group.total_gain_loss,
                    gain_loss_rate: gain_loss_rate(group.total_value, group.total_gain_loss),
                    editable_id: single_manual,
                    accounts,
                }
            })
            .collect()
    }
}

/// Gain/loss as a percentage of the principal (`value - gain_loss`).
/// A zero principal reads as 100% when in profit, otherwise 0%.
pub fn gain_loss_rate(value: i64, gain_loss: i64) -> f64 {
    let principal = value.saturating_sub(gain_loss);
    if principal == 0 {
        return if gain_loss > 0 { 100.0 } else { 0.0 };
    }
    gain_loss as f64 / principal as f64 * 100.0
}

/// Share of `total` in percent; 0 when the total is not positive.
pub fn share_pct(value: i64, total: i64) -> f64 {
    if total > 0 {
        value as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// `1234567` → `1,234,567円`
pub fn format_yen(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "" };
    format!("{sign}{}円", group_thousands(value.unsigned_abs()))
}

/// `1234` → `+1,234円`, `-5` → `-5円`, `0` → `+0円`
pub fn format_signed_yen(value: i64) -> String {
    let sign = if value < 0 { "-" } else { "+" };
    format!("{sign}{}円", group_thousands(value.unsigned_abs()))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
