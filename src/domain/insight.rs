//! Advice records produced by the external insight generator.

use serde::{Deserialize, Serialize};

use crate::domain::common::Identifiable;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Savings,
    Investment,
    Expense,
}

impl InsightKind {
    pub fn default_title(&self) -> &'static str {
        match self {
            InsightKind::Savings => "Smart Saving Tip",
            InsightKind::Investment => "Investment Opportunity",
            InsightKind::Expense => "Expense Management",
        }
    }
}

/// Already-computed advice text. Carried through without aggregation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insight {
    pub id: i64,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: InsightKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Insight {
    /// Explicit title, or the generic heading for its kind.
    pub fn heading(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| self.kind.default_title())
    }
}

impl Identifiable for Insight {
    fn id(&self) -> i64 {
        self.id
    }
}
