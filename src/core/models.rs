//! Payloads exchanged with the finance service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuthToken {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
    pub currency_preference: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration<'a> {
    pub username: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_preference: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
}

/// Headline figures for the signed-in user. `net_worth` is computed by the
/// service as assets minus liabilities and is not re-checked here.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DashboardSummary {
    pub net_worth: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub savings_rate: f64,
    pub top_spending_categories: Vec<CategorySpend>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    /// Positive for inflows, negative for outflows.
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    pub account_id: i64,
    pub amount: f64,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AllocationEntry {
    pub ticker: String,
    pub value: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct InvestmentPerformance {
    pub total_value: f64,
    pub total_cost_basis: f64,
    pub total_return: f64,
    pub total_return_percentage: f64,
    pub time_weighted_return: f64,
    /// Absent when the service lacks enough history to compute it.
    #[serde(default)]
    pub sharpe_ratio: Option<f64>,
    pub asset_allocation: Vec<AllocationEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Brokerage,
    Loan,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                AccountType::Checking => "checking",
                AccountType::Savings => "savings",
                AccountType::Brokerage => "brokerage",
                AccountType::Loan => "loan",
            }
        )
    }
}

impl std::str::FromStr for AccountType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "checking" => Ok(AccountType::Checking),
            "savings" => Ok(AccountType::Savings),
            "brokerage" => Ok(AccountType::Brokerage),
            "loan" => Ok(AccountType::Loan),
            _ => Err(anyhow::anyhow!("Invalid account type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub institution_name: String,
    pub balance: f64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub institution_name: String,
    pub balance: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AccountUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Holding {
    pub id: i64,
    pub user_id: i64,
    pub ticker_symbol: String,
    pub shares_owned: f64,
    pub cost_basis: f64,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewHolding {
    pub ticker_symbol: String,
    pub shares_owned: f64,
    pub cost_basis: f64,
}

/// The service writes naive ISO-8601 date-times for UTC values, but may also
/// include an offset. Both are accepted.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("Invalid timestamp: {raw}")))
    }
}
