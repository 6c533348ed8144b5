use super::transactions::transactions_table;
use super::{Context, ui};
use crate::core::format::format_percent;
use crate::core::view::{AllocationSlice, CategorySlice, ChartSeries, DashboardView, MetricCard};
use crate::core::{DashboardState, load_dashboard};
use anyhow::Result;
use comfy_table::{Attribute, Cell};

pub async fn run(ctx: &Context) -> Result<()> {
    let dashboard = ctx.dashboard();
    let transactions = ctx.transactions();
    let investments = ctx.investments();

    let pb = ui::new_spinner("Loading dashboard...");
    let state = load_dashboard(&dashboard, &transactions, &investments).await;
    pb.finish_and_clear();

    let data = match state {
        DashboardState::Loaded(data) => data,
        DashboardState::Failed(e) => {
            eprintln!(
                "{}",
                ui::style_text("Could not load the dashboard.", ui::StyleType::Error)
            );
            return Err(e.into());
        }
    };

    let view = DashboardView::build(&data, &ctx.currency);
    println!(
        "{}\n",
        ui::style_text("Financial Dashboard", ui::StyleType::Title)
    );
    println!("{}", display_cards(&view.cards));

    ui::print_separator();
    println!("{}", display_net_worth(&view.net_worth, ctx));

    ui::print_separator();
    println!("{}", display_expenses(&view.expenses, ctx));

    if !view.allocation.is_empty() {
        ui::print_separator();
        println!("{}", display_allocation(&view.allocation, ctx));
    }

    ui::print_separator();
    println!(
        "{}\n",
        ui::style_text("Recent Transactions", ui::StyleType::Title)
    );
    println!("{}", transactions_table(&view.transactions));
    Ok(())
}

fn display_cards(cards: &[MetricCard]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(cards.iter().map(|c| ui::header_cell(c.title)));
    table.add_row(
        cards
            .iter()
            .map(|c| Cell::new(&c.value).add_attribute(Attribute::Bold)),
    );
    table.add_row(
        cards
            .iter()
            .map(|c| Cell::new(ui::style_text(&c.caption, ui::StyleType::Subtle))),
    );
    table.to_string()
}

fn display_net_worth(series: &ChartSeries, ctx: &Context) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Month"), ui::header_cell("Net Worth")]);
    for point in &series.points {
        table.add_row(vec![
            Cell::new(&point.label),
            ui::right_cell(&ctx.currency.format(point.value)),
        ]);
    }

    let mut output = format!(
        "{}\n\n{}",
        ui::style_text("Net Worth Over Time", ui::StyleType::Title),
        table
    );
    if series.is_synthetic() {
        output.push_str(&format!(
            "\n{}",
            ui::style_text(
                "Illustrative only: extrapolated from current net worth, not recorded history.",
                ui::StyleType::Subtle
            )
        ));
    }
    output
}

fn display_expenses(slices: &[CategorySlice], ctx: &Context) -> String {
    let total: f64 = slices.iter().map(|s| s.value).sum();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Amount"),
        ui::header_cell("Share"),
    ]);
    for slice in slices {
        let share = (total > 0.0).then(|| slice.value / total);
        table.add_row(vec![
            ui::swatch_cell(&slice.name, slice.color),
            ui::right_cell(&ctx.currency.format(slice.value)),
            ui::format_optional_cell(share, format_percent),
        ]);
    }
    if slices.is_empty() {
        table.add_row(vec![Cell::new(ui::style_text(
            "No spending in the last 30 days",
            ui::StyleType::Subtle,
        ))]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Expense Distribution", ui::StyleType::Title),
        table
    )
}

fn display_allocation(slices: &[AllocationSlice], ctx: &Context) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Ticker"),
        ui::header_cell("Value"),
        ui::header_cell("Weight"),
    ]);
    for slice in slices {
        table.add_row(vec![
            ui::swatch_cell(&slice.name, slice.color),
            ui::right_cell(&ctx.currency.format(slice.value)),
            ui::right_cell(&format_percent(slice.percentage / 100.0)),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Asset Allocation", ui::StyleType::Title),
        table
    )
}
