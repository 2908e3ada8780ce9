//! Canonical amount formatting shared by every dashboard number.

use once_cell::sync::Lazy;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::{DashboardError, DashboardResult};

/// Glyph used for the dashboard's single currency.
pub const RUPEE: &str = "₹";

/// Digit grouping convention for the integer part.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupingStyle {
    /// Lakh/crore: the last three digits, then groups of two (12,34,567).
    #[default]
    Indian,
    /// Thousands: groups of three (1,234,567).
    Western,
}

/// Locale-aware separators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub grouping_separator: char,
    #[serde(default)]
    pub grouping: GroupingStyle,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
            grouping: GroupingStyle::Indian,
        }
    }
}

/// Explicit sign to render in front of the glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    None,
    Plus,
    Minus,
}

impl Sign {
    fn prefix(&self) -> &'static str {
        match self {
            Sign::None => "",
            Sign::Plus => "+",
            Sign::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormatter {
    symbol: String,
    locale: LocaleConfig,
    decimal_places: u32,
}

static DEFAULT_FORMATTER: Lazy<CurrencyFormatter> = Lazy::new(CurrencyFormatter::default);

/// Shared formatter with the dashboard defaults.
pub fn default_formatter() -> &'static CurrencyFormatter {
    &DEFAULT_FORMATTER
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new(RUPEE, LocaleConfig::default(), 2)
    }
}

impl CurrencyFormatter {
    pub fn new(symbol: impl Into<String>, locale: LocaleConfig, decimal_places: u32) -> Self {
        Self {
            symbol: symbol.into(),
            locale,
            decimal_places,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    /// Renders a non-negative amount, e.g. `₹12,34,567` or `+₹1,000.5`.
    ///
    /// Negative input is a data anomaly: it is logged and rendered as zero.
    pub fn format(&self, amount: Decimal, signed: bool) -> String {
        let sign = if signed { Sign::Plus } else { Sign::None };
        self.format_with_sign(amount, sign)
    }

    /// Like [`format`](Self::format) but for float inputs; `NaN` and
    /// infinities are treated as zero.
    pub fn format_f64(&self, amount: f64, signed: bool) -> String {
        let value = match Decimal::from_f64(amount) {
            Some(value) if amount.is_finite() => value,
            _ => {
                tracing::warn!(amount, "non-finite amount passed to formatter; rendering zero");
                Decimal::ZERO
            }
        };
        self.format(value, signed)
    }

    pub fn format_with_sign(&self, amount: Decimal, sign: Sign) -> String {
        let magnitude = if amount < Decimal::ZERO {
            tracing::warn!(%amount, "negative amount passed to formatter; rendering zero");
            Decimal::ZERO
        } else {
            amount
        };
        format!(
            "{}{}{}",
            sign.prefix(),
            self.symbol,
            self.format_number(magnitude)
        )
    }

    /// Groups and rounds a non-negative number without the glyph. Halves
    /// round away from zero, like goal progress.
    pub fn format_number(&self, value: Decimal) -> String {
        let rounded = value
            .round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let body = rounded.to_string();
        let (int_part, fraction) = match body.split_once('.') {
            Some((int_part, fraction)) => (int_part, Some(fraction)),
            None => (body.as_str(), None),
        };
        let mut grouped = group_digits(int_part, self.locale.grouping_separator, self.locale.grouping);
        if let Some(fraction) = fraction {
            grouped.push(self.locale.decimal_separator);
            grouped.push_str(fraction);
        }
        grouped
    }

    /// Parses text produced by [`format`](Self::format), tolerating a missing
    /// glyph, missing separators, and `+`/`-`/`−` signs.
    pub fn parse(&self, text: &str) -> DashboardResult<Decimal> {
        let trimmed = text.trim();
        let (negative, rest) = if let Some(rest) = trimmed.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('\u{2212}') {
            (true, rest)
        } else if let Some(rest) = trimmed.strip_prefix('+') {
            (false, rest)
        } else {
            (false, trimmed)
        };
        let rest = rest.trim_start();
        let rest = rest.strip_prefix(self.symbol.as_str()).unwrap_or(rest).trim();
        if rest.is_empty() {
            return Err(DashboardError::Parse(text.to_string()));
        }

        let mut normalized = String::with_capacity(rest.len());
        for ch in rest.chars() {
            if ch == self.locale.grouping_separator {
                continue;
            }
            if ch == self.locale.decimal_separator {
                normalized.push('.');
            } else if ch.is_ascii_digit() {
                normalized.push(ch);
            } else {
                return Err(DashboardError::Parse(text.to_string()));
            }
        }
        let value = normalized
            .parse::<Decimal>()
            .map_err(|_| DashboardError::Parse(text.to_string()))?;
        Ok(if negative { -value } else { value })
    }

    /// Month-over-month growth with one decimal, `+` when not negative.
    pub fn format_growth(&self, percent: f64) -> String {
        let value = if percent.is_finite() {
            percent
        } else {
            tracing::warn!(percent, "non-finite growth passed to formatter; rendering zero");
            0.0
        };
        let sign = if value >= 0.0 { "+" } else { "" };
        let mut body = format!("{:.1}", value);
        if self.locale.decimal_separator != '.' {
            body = body.replace('.', &self.locale.decimal_separator.to_string());
        }
        format!("{}{}%", sign, body)
    }
}

fn group_digits(digits: &str, separator: char, style: GroupingStyle) -> String {
    let chars: Vec<char> = digits.chars().collect();
    if chars.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = chars.split_at(chars.len() - 3);
    let group = match style {
        GroupingStyle::Indian => 2,
        GroupingStyle::Western => 3,
    };
    let mut grouped = String::new();
    let lead = head.len() % group;
    for (idx, ch) in head.iter().enumerate() {
        if idx != 0 && (idx + group - lead) % group == 0 {
            grouped.push(separator);
        }
        grouped.push(*ch);
    }
    grouped.push(separator);
    grouped.extend(tail);
    grouped
}
