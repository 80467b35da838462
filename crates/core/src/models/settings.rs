use serde::{Deserialize, Serialize};

/// Format description of the brokerage holdings statement.
///
/// Everything here is data, not logic: the defaults describe the current
/// export format, and a JSON file can override any field when the broker
/// renames a column or adds an asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Substring that identifies the holdings section (and validates a decode)
    pub section_marker: String,

    /// A data line starting with this text ends the section
    pub footer_prefix: String,

    /// Account label given to holdings entered by hand
    pub manual_account: String,

    /// Candidate text encodings, tried in order (WHATWG labels)
    pub encodings: Vec<String>,

    /// Accepted header names per required column
    pub columns: ColumnAliases,

    /// Display priority of known asset types (lower sorts first)
    pub asset_type_ranks: Vec<AssetTypeRank>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            section_marker: "保有商品詳細".to_string(),
            footer_prefix: "■".to_string(),
            manual_account: "手入力".to_string(),
            encodings: vec![
                "utf-8".to_string(),
                "shift_jis".to_string(),
                "euc-jp".to_string(),
            ],
            columns: ColumnAliases::default(),
            asset_type_ranks: default_asset_type_ranks(),
        }
    }
}

/// Ordered alias lists for the five required logical columns.
/// The first alias present in the header row wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnAliases {
    pub asset_type: Vec<String>,
    pub name: Vec<String>,
    pub account: Vec<String>,
    pub value: Vec<String>,
    pub gain_loss: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            asset_type: strings(&["種別"]),
            name: strings(&["銘柄名", "銘柄"]),
            account: strings(&["口座"]),
            value: strings(&["評価額", "時価評価額[円]"]),
            gain_loss: strings(&["評価損益[円]"]),
        }
    }
}

/// One row of the asset-type priority table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTypeRank {
    pub asset_type: String,
    pub rank: u32,
}

impl AssetTypeRank {
    pub fn new(asset_type: impl Into<String>, rank: u32) -> Self {
        Self {
            asset_type: asset_type.into(),
            rank,
        }
    }
}

fn default_asset_type_ranks() -> Vec<AssetTypeRank> {
    [
        ("国内株式", 1),
        ("米国株式", 2),
        ("中国株式", 3),
        ("アセアン株式", 4),
        ("投資信託", 5),
        ("金・プラチナ", 6),
        ("国内債券", 7),
        ("外国債券", 8),
        // Cash and crypto always trail the unranked (90) types
        ("現金", 98),
        ("仮想通貨", 99),
    ]
    .into_iter()
    .map(|(asset_type, rank)| AssetTypeRank::new(asset_type, rank))
    .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
