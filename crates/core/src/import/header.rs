use csv::StringRecord;

use crate::errors::CoreError;
use crate::models::settings::ColumnAliases;

/// Column positions of the required fields in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub asset_type: usize,
    pub name: usize,
    pub account: usize,
    pub value: usize,
    pub gain_loss: usize,
}

impl ColumnMap {
    /// Minimum number of fields a data row needs to cover every column.
    pub fn min_fields(&self) -> usize {
        [
            self.asset_type,
            self.name,
            self.account,
            self.value,
            self.gain_loss,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
            + 1
    }
}

/// Index of the first alias (in alias order) present in `headers`.
pub fn find_column(headers: &StringRecord, aliases: &[String]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias))
}

/// Resolve all required columns from the header record.
///
/// Every unresolved column is reported at once, as its aliases joined
/// by `/`.
pub fn resolve(headers: &StringRecord, aliases: &ColumnAliases) -> Result<ColumnMap, CoreError> {
    let required = [
        &aliases.asset_type,
        &aliases.name,
        &aliases.account,
        &aliases.value,
        &aliases.gain_loss,
    ];

    if let [Some(asset_type), Some(name), Some(account), Some(value), Some(gain_loss)] =
        required.map(|names| find_column(headers, names))
    {
        return Ok(ColumnMap {
            asset_type,
            name,
            account,
            value,
            gain_loss,
        });
    }

    let missing = required
        .iter()
        .filter(|names| find_column(headers, names).is_none())
        .map(|names| names.join("/"))
        .collect();
    Err(CoreError::MissingColumns(missing))
}
