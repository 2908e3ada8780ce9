use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Identifiable};

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
    Expense,
}

impl TransactionKind {
    /// Money leaving the ledger.
    pub fn is_outflow(&self) -> bool {
        !matches!(self, TransactionKind::Deposit)
    }

    /// Label shown in the recent activity list.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Savings",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

/// One immutable entry of the ledger, as returned by the data source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<i64>,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    pub fn new(id: i64, kind: TransactionKind, amount: Decimal, date: DateTime<Utc>) -> Self {
        Self {
            id,
            amount,
            date,
            kind,
            category_id: None,
            goal_id: None,
            description: String::new(),
        }
    }

    pub fn deposit(id: i64, amount: Decimal, date: DateTime<Utc>) -> Self {
        Self::new(id, TransactionKind::Deposit, amount, date)
    }

    pub fn withdrawal(id: i64, amount: Decimal, date: DateTime<Utc>) -> Self {
        Self::new(id, TransactionKind::Withdrawal, amount, date)
    }

    pub fn expense(id: i64, category_id: i64, amount: Decimal, date: DateTime<Utc>) -> Self {
        Self::new(id, TransactionKind::Expense, amount, date).with_category(category_id)
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_goal(mut self, goal_id: i64) -> Self {
        self.goal_id = Some(goal_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// A deposit tagged with a goal. Its balance effect on the goal is applied
    /// by the backend; here it only counts towards the ledger total.
    pub fn is_goal_funding(&self) -> bool {
        self.kind == TransactionKind::Deposit && self.goal_id.is_some()
    }

    /// Whether the amount satisfies the `amount > 0` record invariant.
    pub fn has_valid_amount(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Amount used by every calculator: invalid amounts count as zero.
    pub fn effective_amount(&self) -> Decimal {
        if self.has_valid_amount() {
            self.amount
        } else {
            Decimal::ZERO
        }
    }

    /// Effective amount signed by direction: deposits add, everything else subtracts.
    pub fn signed_amount(&self) -> Decimal {
        if self.kind.is_outflow() {
            -self.effective_amount()
        } else {
            self.effective_amount()
        }
    }

    /// Category the expense is attributed to, if it is a categorised expense.
    pub fn expense_category(&self) -> Option<i64> {
        match self.kind {
            TransactionKind::Expense => self.category_id,
            _ => None,
        }
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("txn:{} [{}]", self.id, self.kind)
    }
}
