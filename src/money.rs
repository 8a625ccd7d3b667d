// src/money.rs
use once_cell::sync::Lazy;
use regex::Regex;

/// Leading float literal, the way a lenient float parse reads it.
static LEADING_FLOAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading float pattern should compile")
});

/// Parse a currency cell such as `€1,234.50` or `£12`.
///
/// Missing, empty or unparseable input is 0. Trailing junk after the number
/// is ignored (`12abc` is 12).
pub fn parse_amount(raw: Option<&str>) -> f64 {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return 0.0,
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '€' | '£' | ','))
        .collect();

    LEADING_FLOAT
        .find(cleaned.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// `€` amount with two decimals; negatives render as `-€12.34`.
pub fn format_amount(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}€{:.2}", sign, amount.abs())
}
