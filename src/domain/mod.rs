pub mod category;
pub mod common;
pub mod goal;
pub mod insight;
pub mod mutation;
pub mod transaction;

pub use category::Category;
pub use common::{Decorated, Displayable, Identifiable, NamedEntity};
pub use goal::SavingsGoal;
pub use insight::{Insight, InsightKind};
pub use mutation::{MutationKind, MutationRequest};
pub use transaction::{Transaction, TransactionKind};

/// A read-only copy of everything the data source returned for one refresh.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Snapshot {
    pub fn new(
        transactions: Vec<Transaction>,
        goals: Vec<SavingsGoal>,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            transactions,
            goals,
            categories,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.goals.is_empty() && self.categories.is_empty()
    }
}
