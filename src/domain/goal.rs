//! Savings goals and their balance helpers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// A target the user is saving towards. `current_amount` is owned by the
/// backend; this crate never re-derives it from goal-funding deposits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    #[serde(default)]
    pub current_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

impl SavingsGoal {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        target_amount: Decimal,
        current_amount: Decimal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            target_amount,
            current_amount,
            deadline: None,
            icon: String::new(),
            color: String::new(),
        }
    }

    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_style(mut self, icon: impl Into<String>, color: impl Into<String>) -> Self {
        self.icon = icon.into();
        self.color = color.into();
        self
    }

    pub fn has_valid_target(&self) -> bool {
        self.target_amount > Decimal::ZERO
    }

    /// Saved amount with negative balances read as zero.
    pub fn saved(&self) -> Decimal {
        self.current_amount.max(Decimal::ZERO)
    }

    /// Amount still needed to reach the target, never negative.
    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.saved()).max(Decimal::ZERO)
    }

    pub fn is_complete(&self) -> bool {
        self.has_valid_target() && self.saved() >= self.target_amount
    }
}

impl Identifiable for SavingsGoal {
    fn id(&self) -> i64 {
        self.id
    }
}

impl NamedEntity for SavingsGoal {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Decorated for SavingsGoal {
    fn icon(&self) -> &str {
        &self.icon
    }

    fn color(&self) -> &str {
        &self.color
    }
}

impl Displayable for SavingsGoal {
    fn display_label(&self) -> String {
        format!("goal:{} {}", self.id, self.name)
    }
}
