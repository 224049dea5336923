//! Dashboard metric cards.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use serde::Deserialize;
use serde::Serialize;

use crate::model::types::Money;
use crate::model::types::group_thousands;

/// How a metric's value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricFormat {
    /// `$1,234.50`
    Currency,
    /// `12.5%`
    Percentage,
    /// `1,234`, at most three decimals.
    #[default]
    Number,
}

impl MetricFormat {
    pub fn format(&self, value: Decimal) -> String {
        match self {
            Self::Currency => Money::new(value).to_usd(),
            Self::Percentage => format!("{}%", value.normalize()),
            Self::Number => format_number(value),
        }
    }
}

/// Direction of a metric's change since the last period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// A dashboard metric card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub value: Decimal,
    /// Change text as shown, e.g. `"+12%"`.
    #[serde(default)]
    pub change: Option<String>,
    #[serde(default)]
    pub change_type: ChangeType,
    #[serde(rename = "type", default)]
    pub format: MetricFormat,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Metric {
    pub fn new(title: impl Into<String>, value: Decimal, format: MetricFormat) -> Self {
        Self {
            id: 0,
            title: title.into(),
            value,
            change: None,
            change_type: ChangeType::Neutral,
            format,
            icon: None,
            color: None,
        }
    }

    pub fn with_change(mut self, change: impl Into<String>, change_type: ChangeType) -> Self {
        self.change = Some(change.into());
        self.change_type = change_type;
        self
    }

    /// The value as displayed on the card.
    pub fn formatted_value(&self) -> String {
        self.format.format(self.value)
    }
}

/// Parses a JSON array of metric cards.
pub fn parse_metrics(json: &str) -> Result<Vec<Metric>, serde_json::Error> {
    serde_json::from_str(json)
}

fn format_number(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = rounded.abs().to_string();
    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    out
}
