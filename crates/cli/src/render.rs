use std::fmt::{self, Write};

use asset_palette_core::models::portfolio::{Allocation, PortfolioData};
use asset_palette_core::services::report_service::{
    format_signed_yen, format_yen, ReportService,
};
use asset_palette_core::{AssetPalette, COMBINED_PORTFOLIO_NAME};

use crate::View;

/// Combined view first, then every named portfolio.
pub fn render_text(palette: &AssetPalette, view: View) -> Result<String, fmt::Error> {
    let report = ReportService::new(palette.settings().manual_account.as_str());
    let mut out = String::new();

    render_portfolio(&mut out, &report, COMBINED_PORTFOLIO_NAME, palette.combined(), view)?;
    for portfolio in palette.portfolios() {
        render_portfolio(&mut out, &report, &portfolio.name, &portfolio.data, view)?;
    }
    Ok(out)
}

fn render_portfolio(
    out: &mut String,
    report: &ReportService,
    title: &str,
    data: &PortfolioData,
    view: View,
) -> fmt::Result {
    writeln!(out, "== {title} ==")?;
    writeln!(out, "総資産額 {}  ({})", format_yen(data.total_value), format_signed_yen(data.total_gain_loss))?;

    match view {
        View::AssetClass => render_allocations(out, report, "資産クラス", &data.by_asset_class, data.total_value)?,
        View::Account => render_allocations(out, report, "口座", &data.by_account, data.total_value)?,
        View::Holdings => {
            writeln!(out, "銘柄名\t種別\t評価額\t評価損益\t評価損益率(%)")?;
            for row in report.holding_rows(&data.aggregated_holdings) {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{:.2}%",
                    row.name,
                    row.asset_type,
                    format_yen(row.value),
                    format_signed_yen(row.gain_loss),
                    row.gain_loss_rate
                )?;
                for account in &row.accounts {
                    writeln!(
                        out,
                        "  {}\t\t{}\t{}\t{:.2}%",
                        account.account,
                        format_yen(account.value),
                        format_signed_yen(account.gain_loss),
                        account.gain_loss_rate
                    )?;
                }
            }
        }
    }
    writeln!(out)
}

fn render_allocations(
    out: &mut String,
    report: &ReportService,
    heading: &str,
    slices: &[Allocation],
    total: i64,
) -> fmt::Result {
    writeln!(out, "{heading}\t評価額\t構成比")?;
    for row in report.allocation_rows(slices, total) {
        writeln!(out, "{}\t{}\t{:.2}%", row.name, format_yen(row.value), row.share_pct)?;
    }
    Ok(())
}
