//! Shape of the deposit/transfer requests handed to the mutation sink.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::transaction::TransactionKind;
use crate::errors::{DashboardError, DashboardResult};

/// What the user asked for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MutationKind {
    /// General deposit into the ledger.
    Deposit,
    /// Deposit earmarked for a savings goal.
    GoalTransfer,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MutationRequest {
    pub amount: Decimal,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<i64>,
}

impl MutationRequest {
    /// A general deposit. No category is implied.
    pub fn deposit(amount: Decimal, date: DateTime<Utc>) -> Self {
        Self {
            amount,
            description: "General deposit".into(),
            kind: TransactionKind::Deposit,
            date,
            category_id: None,
            goal_id: None,
        }
    }

    pub fn goal_transfer(
        amount: Decimal,
        goal_id: i64,
        goal_name: &str,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            amount,
            description: format!("Transfer to {}", goal_name),
            kind: TransactionKind::Deposit,
            date,
            category_id: None,
            goal_id: Some(goal_id),
        }
    }

    pub fn mutation_kind(&self) -> MutationKind {
        if self.goal_id.is_some() {
            MutationKind::GoalTransfer
        } else {
            MutationKind::Deposit
        }
    }

    /// Rejects requests the backend would refuse anyway.
    pub fn validate(&self) -> DashboardResult<()> {
        if self.amount <= Decimal::ZERO {
            return Err(DashboardError::InvalidRequest(
                "amount must be positive".into(),
            ));
        }
        if self.kind == TransactionKind::Expense && self.category_id.is_none() {
            return Err(DashboardError::InvalidRequest(
                "expense requires a category".into(),
            ));
        }
        if self.goal_id.is_some() && self.kind != TransactionKind::Deposit {
            return Err(DashboardError::InvalidRequest(
                "only deposits can fund a goal".into(),
            ));
        }
        Ok(())
    }
}
