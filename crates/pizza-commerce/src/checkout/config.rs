//! Checkout settings.

use crate::money::Money;
use chrono::{Datelike, Utc};
use std::ops::RangeInclusive;
use std::time::Duration;

/// Card expiration years accepted by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardYears {
    /// The year of each check and the `span` years after it.
    Rolling { span: i32 },
    /// A fixed inclusive range.
    Fixed(RangeInclusive<i32>),
}

impl CardYears {
    /// Accepted years as of `current_year`.
    pub fn range_in(&self, current_year: i32) -> RangeInclusive<i32> {
        match self {
            CardYears::Rolling { span } => current_year..=current_year.saturating_add(*span),
            CardYears::Fixed(range) => range.clone(),
        }
    }

    /// Whether `year` is accepted today.
    pub fn accepts(&self, year: i32) -> bool {
        self.range_in(Utc::now().year()).contains(&year)
    }
}

impl Default for CardYears {
    fn default() -> Self {
        CardYears::Rolling { span: 10 }
    }
}

impl From<RangeInclusive<i32>> for CardYears {
    fn from(range: RangeInclusive<i32>) -> Self {
        CardYears::Fixed(range)
    }
}

/// Knobs for the checkout orchestrator.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Flat price charged per cart item, independent of menu prices.
    pub unit_price: Money,
    pub accepted_years: CardYears,
    /// Subject line of the receipt email.
    pub receipt_subject: String,
    /// Upper bound on each provider call.
    pub provider_timeout: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            unit_price: Money::usd(50),
            accepted_years: CardYears::default(),
            receipt_subject: "Pizza order receipt".to_string(),
            provider_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_years_follow_the_calendar() {
        let years = CardYears::default();
        assert_eq!(years.range_in(2025), 2025..=2035);
        assert_eq!(years.range_in(2026), 2026..=2036);
        assert!(years.accepts(Utc::now().year()));
        assert!(!years.accepts(Utc::now().year() - 1));
    }

    #[test]
    fn test_fixed_years_ignore_the_calendar() {
        let years = CardYears::from(2019..=2020);
        assert_eq!(years.range_in(2030), 2019..=2020);
        assert!(years.accepts(2019));
        assert!(!years.accepts(2021));
    }
}
