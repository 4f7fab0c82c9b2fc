//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices and cart totals are `Decimal` amounts in the currency's
//! standard unit (dollars, not cents). [`Price`] pairs an amount with its
//! currency for display.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the storefront's default currency.
    #[must_use]
    pub fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }
}

impl fmt::Display for Price {
    /// Formats as symbol plus two decimals, e.g. `$49.99`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        match self.currency_code.symbol() {
            Some(symbol) => write!(f, "{symbol}{rounded:.2}"),
            None => write!(f, "{rounded:.2} {}", self.currency_code.code()),
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    NOK,
    SEK,
    DKK,
}

impl CurrencyCode {
    /// Prefix symbol, if the currency is conventionally written with one.
    #[must_use]
    pub const fn symbol(self) -> Option<&'static str> {
        match self {
            Self::USD => Some("$"),
            Self::EUR => Some("€"),
            Self::NOK | Self::SEK | Self::DKK => None,
        }
    }

    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::NOK => "NOK",
            Self::SEK => "SEK",
            Self::DKK => "DKK",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_symbol() {
        assert_eq!(Price::usd(Decimal::new(4999, 2)).to_string(), "$49.99");
        assert_eq!(Price::usd(Decimal::from(75)).to_string(), "$75.00");
    }

    #[test]
    fn test_display_rounds_half_up() {
        assert_eq!(Price::usd(Decimal::new(10005, 3)).to_string(), "$10.01");
    }

    #[test]
    fn test_display_without_symbol() {
        let price = Price::new(Decimal::from(499), CurrencyCode::NOK);
        assert_eq!(price.to_string(), "499.00 NOK");
    }
}
