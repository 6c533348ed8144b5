use super::{Context, ui};
use crate::core::format::format_percent;
use crate::core::models::{Holding, InvestmentPerformance};
use crate::core::source::InvestmentSource;
use anyhow::{Context as _, Result};
use comfy_table::Cell;

pub async fn run(ctx: &Context) -> Result<()> {
    let investments = ctx.investments();
    let (holdings, performance) = futures::try_join!(investments.holdings(), investments.performance())
        .context("Failed to fetch investments")?;

    println!("{}\n", ui::style_text("Holdings", ui::StyleType::Title));
    println!("{}", display_holdings(&holdings, ctx));

    ui::print_separator();
    println!("{}", display_performance(&performance, ctx));
    Ok(())
}

fn display_holdings(holdings: &[Holding], ctx: &Context) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Ticker"),
        ui::header_cell("Shares"),
        ui::header_cell("Cost Basis"),
        ui::header_cell("Added"),
    ]);
    for holding in holdings {
        table.add_row(vec![
            Cell::new(&holding.ticker_symbol),
            ui::right_cell(&format!("{:.4}", holding.shares_owned)),
            ui::right_cell(&ctx.currency.format(holding.cost_basis)),
            Cell::new(holding.created_at.format("%Y-%m-%d").to_string()),
        ]);
    }
    table.to_string()
}

fn display_performance(performance: &InvestmentPerformance, ctx: &Context) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Metric"), ui::header_cell("Value")]);
    table.add_row(vec![
        Cell::new("Total value"),
        ui::right_cell(&ctx.currency.format(performance.total_value)),
    ]);
    table.add_row(vec![
        Cell::new("Cost basis"),
        ui::right_cell(&ctx.currency.format(performance.total_cost_basis)),
    ]);
    table.add_row(vec![
        Cell::new("Total return"),
        ui::right_cell(&format!(
            "{} ({})",
            ctx.currency.format(performance.total_return),
            format_percent(performance.total_return_percentage / 100.0)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Time-weighted return"),
        ui::right_cell(&format_percent(performance.time_weighted_return)),
    ]);
    table.add_row(vec![
        Cell::new("Sharpe ratio"),
        ui::format_optional_cell(performance.sharpe_ratio, |v| format!("{v:.2}")),
    ]);

    format!(
        "{}\n\n{}",
        ui::style_text("Performance", ui::StyleType::Title),
        table
    )
}
