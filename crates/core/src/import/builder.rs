use log::debug;

use crate::models::holding::Holding;

use super::header::ColumnMap;
use super::section::SectionLine;
use super::tokenizer::read_record;

/// Largest amount magnitude accepted from a statement cell (1,000兆円).
/// Larger cells skip the row, so portfolio sums stay within `i64`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Turn section data lines into holdings, silently skipping rows that are
/// too short, have an empty type/name/account, or carry unreadable amounts.
///
/// Ids are `csv_{source}_{line index}`, unique per source for the session.
pub fn build_holdings(rows: &[SectionLine<'_>], columns: &ColumnMap, source: &str) -> Vec<Holding> {
    let min_fields = columns.min_fields();

    rows.iter()
        .filter_map(|row| {
            let record = match read_record(row.text) {
                Ok(record) => record,
                Err(e) => {
                    debug!("skipping line {} of {source}: {e}", row.index);
                    return None;
                }
            };
            if record.len() < min_fields {
                debug!("skipping line {} of {source}: {} fields, need {min_fields}", row.index, record.len());
                return None;
            }

            let field = |index: usize| record.get(index).unwrap_or("");

            let (Some(value), Some(gain_loss)) = (
                parse_amount(field(columns.value)),
                parse_amount(field(columns.gain_loss)),
            ) else {
                debug!("skipping line {} of {source}: unreadable amount", row.index);
                return None;
            };

            let asset_type = field(columns.asset_type);
            let name = field(columns.name);
            let account = field(columns.account);
            if asset_type.is_empty() || name.is_empty() || account.is_empty() {
                debug!("skipping line {} of {source}: empty type, name or account", row.index);
                return None;
            }

            Some(Holding::new(
                format!("csv_{source}_{}", row.index),
                asset_type,
                name,
                account,
                value,
                gain_loss,
            ))
        })
        .collect()
}

/// Read a whole-unit amount such as `1,234,567`, `+12,345` or `-980`.
///
/// Thousands separators are dropped, then the leading integer is taken
/// (`1234.56` reads as 1234). An empty cell reads as zero. Anything without
/// a leading digit (`N/A`, `-`, a lone `,`) or beyond `MAX_AMOUNT` is `None`.
pub fn parse_amount(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0);
    }

    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let (negative, unsigned) = match cleaned.as_bytes().first()? {
        b'-' => (true, &cleaned[1..]),
        b'+' => (false, &cleaned[1..]),
        _ => (false, cleaned.as_str()),
    };
    let digits_end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude: i64 = unsigned[..digits_end].parse().ok()?;
    if magnitude > MAX_AMOUNT {
        return None;
    }
    Some(if negative { -magnitude } else { magnitude })
}
