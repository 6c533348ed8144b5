use super::{Context, ui};
use crate::core::models::{Account, AccountType};
use anyhow::{Context as _, Result};
use comfy_table::Cell;

pub async fn run(ctx: &Context) -> Result<()> {
    let accounts = ctx
        .accounts()
        .list()
        .await
        .context("Failed to fetch accounts")?;

    println!("{}\n", ui::style_text("Accounts", ui::StyleType::Title));
    println!("{}", display_accounts(&accounts, ctx));
    Ok(())
}

fn display_accounts(accounts: &[Account], ctx: &Context) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Institution"),
        ui::header_cell("Type"),
        ui::header_cell("Balance"),
    ]);

    for account in accounts {
        table.add_row(vec![
            Cell::new(account.id),
            Cell::new(&account.institution_name),
            Cell::new(account.account_type),
            ui::right_cell(&ctx.currency.format(account.balance)),
        ]);
    }

    // Loans count against the balance, as the service does for net worth
    let net: f64 = accounts
        .iter()
        .map(|a| match a.account_type {
            AccountType::Loan => -a.balance,
            _ => a.balance,
        })
        .sum();

    format!(
        "{}\n\n{}: {}",
        table,
        ui::style_text("Net balance", ui::StyleType::TotalLabel),
        ui::style_text(&ctx.currency.format(net), ui::StyleType::TotalValue)
    )
}
