use std::collections::{BTreeMap, HashMap};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::anomaly::Anomaly;
use crate::core::window::DateWindow;
use crate::domain::{Category, Transaction};

/// Spend attributed to one category inside a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpend {
    pub category_id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub amount: Decimal,
    /// Unrounded share of the window's expense total.
    pub percentage: f64,
}

pub struct CategoryService;

impl CategoryService {
    /// Expense totals per category, largest first.
    ///
    /// Ties order by name, then id, so identical input always yields
    /// identical output. Uncategorised or non-positive expenses are skipped.
    pub fn breakdown(
        transactions: &[Transaction],
        categories: &[Category],
        window: DateWindow,
    ) -> Vec<CategorySpend> {
        let mut per_category: BTreeMap<i64, Decimal> = BTreeMap::new();
        let mut basis = Decimal::ZERO;
        for txn in transactions {
            if !window.contains(txn.date) || !txn.has_valid_amount() {
                continue;
            }
            let Some(category_id) = txn.expense_category() else {
                continue;
            };
            let slot = per_category.entry(category_id).or_insert(Decimal::ZERO);
            match (slot.checked_add(txn.amount), basis.checked_add(txn.amount)) {
                (Some(sum), Some(next_basis)) => {
                    *slot = sum;
                    basis = next_basis;
                }
                _ => {
                    Anomaly::AmountOverflow { transaction_id: txn.id }.report();
                }
            }
        }
        per_category.retain(|_, amount| !amount.is_zero());
        if basis.is_zero() {
            return Vec::new();
        }

        let lookup: HashMap<i64, &Category> = categories.iter().map(|c| (c.id, c)).collect();
        let mut rows: Vec<CategorySpend> = per_category
            .into_iter()
            .map(|(category_id, amount)| {
                let (name, icon, color) = match lookup.get(&category_id) {
                    Some(category) => (
                        category.name.clone(),
                        category.icon.clone(),
                        category.color.clone(),
                    ),
                    None => {
                        tracing::debug!(category_id, "expense references unknown category");
                        (format!("Category #{}", category_id), String::new(), String::new())
                    }
                };
                CategorySpend {
                    category_id,
                    name,
                    icon,
                    color,
                    amount,
                    percentage: share_percent(amount, basis),
                }
            })
            .collect();

        rows.sort_by(|a, b| {
            b.amount
                .cmp(&a.amount)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.category_id.cmp(&b.category_id))
        });
        rows
    }

    /// Sum of the amounts in a breakdown.
    pub fn total_spend(rows: &[CategorySpend]) -> Decimal {
        rows.iter().map(|row| row.amount).sum()
    }
}

fn share_percent(amount: Decimal, basis: Decimal) -> f64 {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(basis))
        .and_then(|percent| percent.to_f64())
        .unwrap_or(0.0)
}
