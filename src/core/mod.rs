//! Core types and pure logic, independent of transport and terminal output

pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod log;
pub mod models;
pub mod source;
pub mod view;

// Re-export main types for cleaner imports
pub use dashboard::{DashboardData, DashboardState, load_dashboard};
pub use error::ApiError;
pub use format::{CurrencyFormat, format_percent};
pub use source::{DashboardSource, InvestmentSource, ListParams, TransactionSource};
