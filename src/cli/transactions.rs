use super::{Context, ui};
use crate::core::source::{ListParams, TransactionSource};
use crate::core::view::{TransactionRow, transaction_rows};
use anyhow::{Context as _, Result};
use comfy_table::{Cell, Table};
use std::path::Path;
use tracing::info;

pub fn transactions_table(rows: &[TransactionRow]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Category"),
        ui::header_cell("Description"),
        ui::header_cell("Amount"),
    ]);

    if rows.is_empty() {
        table.add_row(vec![
            Cell::new(ui::style_text("No transactions found", ui::StyleType::Subtle)),
            Cell::new(""),
            Cell::new(""),
            Cell::new(""),
        ]);
        return table;
    }

    for row in rows {
        table.add_row(vec![
            Cell::new(&row.date),
            Cell::new(&row.category),
            Cell::new(&row.description),
            ui::amount_cell(&row.amount, row.direction),
        ]);
    }
    table
}

pub async fn list(ctx: &Context, params: ListParams) -> Result<()> {
    let transactions = ctx
        .transactions()
        .list(params)
        .await
        .context("Failed to fetch transactions")?;

    println!(
        "{}\n",
        ui::style_text("Recent Transactions", ui::StyleType::Title)
    );
    println!(
        "{}",
        transactions_table(&transaction_rows(&transactions, &ctx.currency))
    );
    Ok(())
}

pub async fn upload(ctx: &Context, path: &Path, account_id: Option<i64>) -> Result<()> {
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("transactions.csv");

    info!(file = %path.display(), bytes = contents.len(), "Uploading transactions");
    let created = ctx
        .transactions()
        .upload_csv(file_name, contents, account_id)
        .await
        .context("Upload failed")?;

    println!(
        "Imported {} transactions\n",
        ui::style_text(&created.len().to_string(), ui::StyleType::TotalValue)
    );
    let net: f64 = created.iter().map(|t| t.amount).sum();
    println!(
        "{} {}\n",
        ui::style_text("Net amount:", ui::StyleType::TotalLabel),
        ctx.currency.format(net)
    );
    println!(
        "{}",
        transactions_table(&transaction_rows(&created, &ctx.currency))
    );
    Ok(())
}
