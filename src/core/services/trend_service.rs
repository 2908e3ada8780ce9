use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::anomaly::Anomaly;
use crate::core::time::MonthKey;
use crate::domain::Transaction;

/// Expense totals for one calendar month. Categories with no spend that
/// month are absent from the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendBucket {
    pub month: MonthKey,
    pub period_label: String,
    pub per_category_amount: BTreeMap<i64, Decimal>,
}

impl TrendBucket {
    fn empty(month: MonthKey) -> Self {
        Self {
            month,
            period_label: month.label(),
            per_category_amount: BTreeMap::new(),
        }
    }

    /// Category ids by descending amount, ties by id.
    fn ranked_categories(&self) -> Vec<i64> {
        let mut entries: Vec<(i64, Decimal)> = self
            .per_category_amount
            .iter()
            .map(|(id, amount)| (*id, *amount))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries.into_iter().map(|(id, _)| id).collect()
    }
}

/// Oldest-first month buckets plus the category order used for chart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSeries {
    pub buckets: Vec<TrendBucket>,
    /// Union of categories across buckets in first-appearance order.
    pub categories: Vec<i64>,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The first `limit` categories, i.e. the ones that get a chart line.
    pub fn series_categories(&self, limit: usize) -> &[i64] {
        &self.categories[..self.categories.len().min(limit)]
    }

    /// Buckets with every series category present, missing ones as zero.
    pub fn dense(&self) -> Vec<BTreeMap<i64, Decimal>> {
        self.buckets
            .iter()
            .map(|bucket| {
                self.categories
                    .iter()
                    .map(|id| {
                        let amount = bucket
                            .per_category_amount
                            .get(id)
                            .copied()
                            .unwrap_or(Decimal::ZERO);
                        (*id, amount)
                    })
                    .collect()
            })
            .collect()
    }
}

/// Longest trend the builder produces; larger requests are clamped.
pub const MAX_TREND_MONTHS: u32 = 120;

pub struct TrendService;

impl TrendService {
    /// Buckets categorised expenses into the `month_count` calendar months
    /// ending with the month of `as_of`.
    pub fn build_trend(
        transactions: &[Transaction],
        month_count: u32,
        as_of: DateTime<Utc>,
    ) -> TrendSeries {
        if month_count == 0 {
            return TrendSeries::default();
        }
        if month_count > MAX_TREND_MONTHS {
            tracing::warn!(month_count, max = MAX_TREND_MONTHS, "trend length clamped");
        }
        let month_count = month_count.min(MAX_TREND_MONTHS) as i32;
        let last = MonthKey::of(as_of);
        let first = last.shift(1 - month_count);
        let mut buckets: Vec<TrendBucket> = (0..month_count)
            .map(|offset| TrendBucket::empty(first.shift(offset)))
            .collect();

        for txn in transactions {
            if txn.date > as_of || !txn.has_valid_amount() {
                continue;
            }
            let Some(category_id) = txn.expense_category() else {
                continue;
            };
            let month = MonthKey::of(txn.date);
            if month < first {
                continue;
            }
            if let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.month == month) {
                let slot = bucket
                    .per_category_amount
                    .entry(category_id)
                    .or_insert(Decimal::ZERO);
                match slot.checked_add(txn.amount) {
                    Some(sum) => *slot = sum,
                    None => {
                        Anomaly::AmountOverflow { transaction_id: txn.id }.report();
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        let mut categories = Vec::new();
        for bucket in &buckets {
            for id in bucket.ranked_categories() {
                if seen.insert(id) {
                    categories.push(id);
                }
            }
        }

        TrendSeries {
            buckets,
            categories,
        }
    }
}
