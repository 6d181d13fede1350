//! Type-safe price representation using decimal arithmetic.
//!
//! The platform's cart endpoints report money in the smallest currency unit
//! (cents). Prices are converted once at the boundary and carried as
//! `Decimal` from there on, so view code never does float math.

use rust_decimal::Decimal;
use thiserror::Error;

/// Error parsing a currency code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("unsupported currency code: {0}")]
    Unsupported(String),
}

/// ISO 4217 currency, limited to the currencies the shop sells in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
}

impl Currency {
    /// Parse an ISO 4217 code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `CurrencyError::Unsupported` for codes the shop does not sell in.
    pub fn from_iso_code(code: &str) -> Result<Self, CurrencyError> {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "CAD" => Ok(Self::Cad),
            "AUD" => Ok(Self::Aud),
            other => Err(CurrencyError::Unsupported(other.to_string())),
        }
    }

    /// The ISO 4217 code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Cad => "CAD",
            Self::Aud => "AUD",
        }
    }

    /// The display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Usd | Self::Cad | Self::Aud => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary amount in a specific currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    /// Amount in major units (e.g., 19.99 for $19.99).
    amount: Decimal,
    /// Currency of the amount.
    currency: Currency,
}

impl Price {
    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub fn from_cents(cents: i64, currency: Currency) -> Self {
        Self {
            amount: Decimal::new(cents, 2),
            currency,
        }
    }

    /// The decimal amount in major units.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency of the amount.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Format for display, e.g. "€285.00".
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency.symbol(), self.amount)
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_from_iso_code() {
        assert_eq!(Currency::from_iso_code("EUR").unwrap(), Currency::Eur);
        assert_eq!(Currency::from_iso_code("usd").unwrap(), Currency::Usd);
        assert_eq!(
            Currency::from_iso_code("JPY"),
            Err(CurrencyError::Unsupported("JPY".to_string()))
        );
    }

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(28_500, Currency::Eur);
        assert_eq!(price.display(), "€285.00");

        let price = Price::from_cents(1_999, Currency::Usd);
        assert_eq!(price.display(), "$19.99");
    }

    #[test]
    fn test_zero_and_single_digit_cents() {
        assert_eq!(Price::from_cents(0, Currency::Usd).display(), "$0.00");
        assert_eq!(Price::from_cents(5, Currency::Gbp).display(), "£0.05");
    }

    #[test]
    fn test_display_matches_display_trait() {
        let price = Price::from_cents(24_000, Currency::Eur);
        assert_eq!(format!("{price}"), price.display());
    }
}
