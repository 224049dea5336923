//! Money type

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::Deserialize;
use serde::Serialize;

/// A monetary value in US dollars, represented as a decimal.
///
/// # Example
///
/// ```
/// use policydesk_lib::model::types::Money;
/// use rust_decimal::Decimal;
///
/// let premium = Money::new(Decimal::new(12345, 1)); // 1234.5
/// assert_eq!(premium.to_usd(), "$1,234.50");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    /// Creates a new Money value.
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the inner decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Creates a Money value from an integer (whole dollars).
    pub fn from_int(value: i64) -> Self {
        Self(Decimal::new(value, 0))
    }

    /// Creates a Money value from a float, if it is finite.
    pub fn from_f64(value: f64) -> Option<Self> {
        Decimal::from_f64_retain(value).map(Self)
    }

    /// Adds two amounts, or `None` if the sum leaves the decimal range.
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Adds two amounts, clamping to the decimal range.
    pub fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// Formats as an en-US currency string: `$1,234.50`, `-$5.00`.
    ///
    /// Rounds half away from zero to cents.
    pub fn to_usd(&self) -> String {
        let mut cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);

        let negative = cents.is_sign_negative() && !cents.is_zero();
        let text = cents.abs().to_string();
        let (whole, frac) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        format!(
            "{}${}.{}",
            if negative { "-" } else { "" },
            group_thousands(whole),
            frac
        )
    }
}

/// Inserts `,` between groups of three digits: `1234567` -> `1,234,567`.
pub(crate) fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

/// Saturates at the decimal range instead of overflowing.
impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        self.saturating_add(rhs)
    }
}

/// Saturating, like `Add`.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::default(), Money::saturating_add)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_usd())
    }
}
