//! Turns service payloads into chart and table ready structures.
//!
//! Everything here is pure and recomputed on every load.

use crate::core::dashboard::DashboardData;
use crate::core::format::{CurrencyFormat, format_percent};
use crate::core::models::{
    AllocationEntry, CategorySpend, DashboardSummary, InvestmentPerformance, Transaction,
};
use serde::Serialize;

pub const PALETTE: [&str; 5] = ["#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884d8"];

/// Colour for the slice at `index`, cycling through [`PALETTE`].
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

/// One slice per category, in the order the service ranked them.
pub fn category_slices(categories: &[CategorySpend]) -> Vec<CategorySlice> {
    categories
        .iter()
        .enumerate()
        .map(|(i, spend)| CategorySlice {
            name: capitalize(&spend.category),
            value: spend.amount,
            color: palette_color(i),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub name: String,
    pub value: f64,
    pub percentage: f64,
    pub color: &'static str,
}

pub fn allocation_slices(allocation: &[AllocationEntry]) -> Vec<AllocationSlice> {
    allocation
        .iter()
        .enumerate()
        .map(|(i, entry)| AllocationSlice {
            name: entry.ticker.clone(),
            value: entry.value,
            percentage: entry.percentage,
            color: palette_color(i),
        })
        .collect()
}

/// Where the points of a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeriesOrigin {
    Historical,
    /// Extrapolated from a single current value; not real history.
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub origin: SeriesOrigin,
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    pub fn is_synthetic(&self) -> bool {
        self.origin == SeriesOrigin::Synthetic
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Three illustrative points ending at the current net worth, scaled back to
/// 90% and 95%. Placeholder until the service exposes net-worth history.
pub fn synthesize_net_worth_series(net_worth: f64) -> ChartSeries {
    let points = [("Jan", 0.90), ("Feb", 0.95), ("Mar", 1.0)]
        .into_iter()
        .map(|(label, factor)| SeriesPoint {
            label: label.to_string(),
            value: net_worth * factor,
        })
        .collect();
    ChartSeries {
        origin: SeriesOrigin::Synthetic,
        points,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Inflow,
    Outflow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRow {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub direction: Direction,
}

pub fn transaction_rows(transactions: &[Transaction], currency: &CurrencyFormat) -> Vec<TransactionRow> {
    transactions
        .iter()
        .map(|tx| TransactionRow {
            date: tx.timestamp.format("%Y-%m-%d").to_string(),
            category: capitalize(&tx.category),
            description: tx
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or("-")
                .to_string(),
            amount: currency.format(tx.amount),
            direction: if tx.amount >= 0.0 {
                Direction::Inflow
            } else {
                Direction::Outflow
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
    pub caption: String,
}

pub fn headline_cards(
    summary: &DashboardSummary,
    performance: &InvestmentPerformance,
    currency: &CurrencyFormat,
) -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "Net Worth",
            value: currency.format(summary.net_worth),
            caption: format!("Assets: {}", currency.format(summary.total_assets)),
        },
        MetricCard {
            title: "Monthly Income",
            value: currency.format(summary.monthly_income),
            caption: "Last 30 days".to_string(),
        },
        MetricCard {
            title: "Monthly Expenses",
            value: currency.format(summary.monthly_expenses),
            caption: format!("Savings rate: {}", format_percent(summary.savings_rate)),
        },
        MetricCard {
            title: "Investment Return",
            // the service reports this one in percent, not as a fraction
            value: format_percent(performance.total_return_percentage / 100.0),
            caption: format!("{} total return", currency.format(performance.total_return)),
        },
    ]
}

/// Everything the dashboard screen shows, derived from one successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<MetricCard>,
    pub net_worth: ChartSeries,
    pub expenses: Vec<CategorySlice>,
    pub allocation: Vec<AllocationSlice>,
    pub transactions: Vec<TransactionRow>,
}

impl DashboardView {
    pub fn build(data: &DashboardData, currency: &CurrencyFormat) -> Self {
        Self {
            cards: headline_cards(&data.summary, &data.performance, currency),
            net_worth: synthesize_net_worth_series(data.summary.net_worth),
            expenses: category_slices(&data.summary.top_spending_categories),
            allocation: allocation_slices(&data.performance.asset_allocation),
            transactions: transaction_rows(&data.transactions, currency),
        }
    }
}
