//! Invalid-input observations. Calculators clamp instead of failing; what
//! they clamped is logged and returned alongside the summary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// Transaction amount was zero or negative; counted as zero.
    NonPositiveAmount { transaction_id: i64 },
    /// Expense without a category; left out of breakdown and trend.
    UncategorizedExpense { transaction_id: i64 },
    /// Goal target was zero or negative; progress reads as zero.
    InvalidGoalTarget { goal_id: i64 },
    /// Goal balance was negative; read as zero.
    NegativeGoalBalance { goal_id: i64 },
    /// Adding the amount would overflow a running total; left out of it.
    AmountOverflow { transaction_id: i64 },
}

impl Anomaly {
    /// Emits the anomaly on the tracing pipeline and hands it back.
    pub fn report(self) -> Self {
        match self {
            Anomaly::NonPositiveAmount { transaction_id } => {
                tracing::warn!(transaction_id, "non-positive transaction amount treated as zero")
            }
            Anomaly::UncategorizedExpense { transaction_id } => {
                tracing::warn!(transaction_id, "expense without category excluded from breakdown")
            }
            Anomaly::InvalidGoalTarget { goal_id } => {
                tracing::warn!(goal_id, "goal target must be positive; progress reads as zero")
            }
            Anomaly::NegativeGoalBalance { goal_id } => {
                tracing::warn!(goal_id, "negative goal balance treated as zero")
            }
            Anomaly::AmountOverflow { transaction_id } => {
                tracing::warn!(transaction_id, "amount overflows running total; skipped")
            }
        }
        self
    }
}
