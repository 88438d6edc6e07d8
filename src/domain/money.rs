use std::fmt;

/// Amounts are plain decimal numbers, matching the JSON record shapes
/// (`{"amount": 100}`). No currency handling; a store never mixes units.
pub type Amount = f64;

/// Format an amount as a human-readable decimal string with two places.
/// Example: 50.0 -> "50.00", -12.345 -> "-12.35"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50.0, "12.5" -> 12.5, "100" -> 100.0
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let value: f64 = input
        .trim()
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)?;
    if !value.is_finite() {
        return Err(ParseAmountError::InvalidFormat);
    }
    Ok(value)
}

/// Division guarded against a zero denominator. Averages, hourly rates and
/// percentages all fall back to 0 instead of producing NaN or infinity.
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
