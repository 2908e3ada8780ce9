use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::time::MonthKey;
use crate::errors::{DashboardError, DashboardResult};

/// Half-open aggregation window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DashboardResult<Self> {
        if end <= start {
            return Err(DashboardError::InvalidInput(
                "window end must be after start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// `count` whole calendar months starting at `first`.
    pub fn months(first: MonthKey, count: u32) -> Self {
        let last = first.shift(count.max(1) as i32);
        Self {
            start: first.start(),
            end: last.start(),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    /// Cuts the window so nothing dated after `as_of` falls inside it.
    /// A window that starts after `as_of` becomes empty.
    pub fn up_to(self, as_of: DateTime<Utc>) -> Self {
        let cutoff = as_of
            .checked_add_signed(Duration::nanoseconds(1))
            .unwrap_or(as_of);
        Self {
            start: self.start,
            end: self.end.min(cutoff).max(self.start),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Period choices offered by the spending breakdown widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownPeriod {
    #[default]
    ThisMonth,
    LastMonth,
    LastThreeMonths,
}

impl BreakdownPeriod {
    /// Whole calendar months relative to `now`, never reaching past `now`.
    pub fn window(&self, now: DateTime<Utc>) -> DateWindow {
        let current = MonthKey::of(now);
        let months = match self {
            BreakdownPeriod::ThisMonth => DateWindow::months(current, 1),
            BreakdownPeriod::LastMonth => DateWindow::months(current.previous(), 1),
            BreakdownPeriod::LastThreeMonths => DateWindow::months(current.shift(-2), 3),
        };
        months.up_to(now)
    }
}
