use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Money is an exact decimal amount, mirroring the backend's `BigDecimal`.
/// No rounding happens until an amount is formatted for display.
pub type Amount = Decimal;

/// Format an amount with two decimal places for display.
/// Example: 50 -> "50.00", 12.345 -> "12.35", -0.5 -> "-0.50"
pub fn format_amount(amount: Amount) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Parse a user-entered amount. Only strictly positive values are accepted.
/// Example: "50.00" -> 50.00, "12.5" -> 12.5, "100" -> 100
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::InvalidFormat);
    }

    // Decimal::from_str accepts "1_000"; a form field should not
    if input.contains('_') {
        return Err(ParseAmountError::InvalidFormat);
    }

    let amount = Decimal::from_str(input).map_err(|_| ParseAmountError::InvalidFormat)?;
    if amount <= Decimal::ZERO {
        return Err(ParseAmountError::NotPositive);
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    NotPositive,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid money format"),
            ParseAmountError::NotPositive => write!(f, "amount must be greater than zero"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

/// Currencies offered when creating an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Inr, Currency::Usd, Currency::Eur, Currency::Gbp];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::Inr => "Indian Rupee",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
        }
    }

    /// Selector-style label, e.g. "Indian Rupee (₹)".
    pub fn label(&self) -> String {
        format!("{} ({})", self.name(), self.symbol())
    }

    /// Every supported currency as "CODE - Name (symbol)", comma separated.
    pub fn describe_all() -> String {
        Self::ALL
            .iter()
            .map(|c| format!("{} - {}", c.code(), c.label()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "INR" => Some(Currency::Inr),
            "USD" => Some(Currency::Usd),
            "EUR" => Some(Currency::Eur),
            "GBP" => Some(Currency::Gbp),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Display symbol for a currency code coming from the backend.
/// Unknown codes fall back to "$".
pub fn currency_symbol(code: &str) -> &'static str {
    Currency::from_code(code)
        .map(|c| c.symbol())
        .unwrap_or("$")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Amount {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("50")), "50.00");
        assert_eq!(format_amount(dec("12.34")), "12.34");
        assert_eq!(format_amount(dec("0.01")), "0.01");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(dec("12.345")), "12.35");
        assert_eq!(format_amount(dec("33.333333")), "33.33");
        assert_eq!(format_amount(dec("-0.5")), "-0.50");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("50.00"), Ok(dec("50.00")));
        assert_eq!(parse_amount("50"), Ok(dec("50")));
        assert_eq!(parse_amount(" 12.5 "), Ok(dec("12.5")));
        assert_eq!(parse_amount("0.01"), Ok(dec("0.01")));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount("abc"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount(""), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("12.34.56"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("1_000"), Err(ParseAmountError::InvalidFormat));
    }

    #[test]
    fn test_parse_amount_rejects_non_positive() {
        assert_eq!(parse_amount("0"), Err(ParseAmountError::NotPositive));
        assert_eq!(parse_amount("-5"), Err(ParseAmountError::NotPositive));
    }

    #[test]
    fn test_currency_roundtrip() {
        for currency in Currency::ALL {
            assert_eq!(Currency::from_code(currency.code()), Some(currency));
        }
        assert_eq!(Currency::from_code("eur"), Some(Currency::Eur));
        assert_eq!(Currency::from_code("JPY"), None);
    }

    #[test]
    fn test_currency_labels() {
        assert_eq!(Currency::Inr.label(), "Indian Rupee (₹)");
        assert_eq!(
            Currency::describe_all(),
            "INR - Indian Rupee (₹), USD - US Dollar ($), EUR - Euro (€), GBP - British Pound (£)"
        );
    }

    #[test]
    fn test_currency_symbol_fallback() {
        assert_eq!(currency_symbol("INR"), "₹");
        assert_eq!(currency_symbol("GBP"), "£");
        assert_eq!(currency_symbol("JPY"), "$");
        assert_eq!(currency_symbol(""), "$");
    }
}
