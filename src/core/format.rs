//! Number formatting for display.

/// Currency rendering rules for a configured ISO currency code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    code: String,
}

impl CurrencyFormat {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.trim().to_uppercase(),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    fn symbol(&self) -> Option<&'static str> {
        match self.code.as_str() {
            "USD" | "CAD" | "AUD" => Some("$"),
            "EUR" => Some("€"),
            "GBP" => Some("£"),
            "INR" => Some("₹"),
            "JPY" => Some("¥"),
            _ => None,
        }
    }

    /// `-1234.5` in USD becomes `-$1,234.50`; unknown codes become
    /// `-1,234.50 XYZ`.
    pub fn format(&self, amount: f64) -> String {
        let cents = (amount * 100.0).round();
        // sign of the rounded value, so -0.004 prints as 0.00
        let sign = if cents < 0.0 { "-" } else { "" };
        let digits = group_thousands(cents.abs() / 100.0);
        match self.symbol() {
            Some(symbol) => format!("{sign}{symbol}{digits}"),
            None => format!("{sign}{digits} {}", self.code),
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::new("USD")
    }
}

fn group_thousands(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped}.{fraction}")
}

/// Renders a fraction as a percentage with one decimal, `0.125` → `12.5%`.
pub fn format_percent(fraction: f64) -> String {
    let value = fraction * 100.0;
    // avoid "-0.0%"
    let value = if value.abs() < 0.05 { 0.0 } else { value };
    format!("{value:.1}%")
}
