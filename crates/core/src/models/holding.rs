use serde::{Deserialize, Serialize};

/// One raw row of evaluated position data, either read from a statement
/// or entered by hand.
///
/// `value` and `gain_loss` are whole currency units. A row whose numbers
/// cannot be read is never turned into a `Holding`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    /// Unique within its source, stable for the session (`csv_…` or `manual_…`)
    pub id: String,

    /// Asset class label as written in the statement (e.g. "国内株式")
    #[serde(rename = "type")]
    pub asset_type: String,

    /// Security / instrument name
    pub name: String,

    /// Account label, or the manual-entry sentinel
    pub account: String,

    /// Evaluation amount
    pub value: i64,

    /// Signed evaluation gain/loss
    pub gain_loss: i64,
}

impl Holding {
    pub fn new(
        id: impl Into<String>,
        asset_type: impl Into<String>,
        name: impl Into<String>,
        account: impl Into<String>,
        value: i64,
        gain_loss: i64,
    ) -> Self {
        Self {
            id: id.into(),
            asset_type: asset_type.into(),
            name: name.into(),
            account: account.into(),
            value,
            gain_loss,
        }
    }

    /// Whether this holding was entered by hand rather than imported.
    pub fn is_manual(&self, manual_account: &str) -> bool {
        self.account == manual_account
    }
}

/// A holding entered by hand. The account and id are assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHolding {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub name: String,
    pub value: i64,
    pub gain_loss: i64,
}

impl NewHolding {
    pub fn new(
        asset_type: impl Into<String>,
        name: impl Into<String>,
        value: i64,
        gain_loss: i64,
    ) -> Self {
        Self {
            asset_type: asset_type.into(),
            name: name.into(),
            value,
            gain_loss,
        }
    }
}
