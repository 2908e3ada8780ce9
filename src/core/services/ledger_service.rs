use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::anomaly::Anomaly;
use crate::core::time::MonthKey;
use crate::currency::{CurrencyFormatter, Sign};
use crate::domain::{Transaction, TransactionKind};

/// Ledger-wide figures shown on the savings card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub total_savings: Decimal,
    pub monthly_growth_percent: f64,
    pub last_deposit: Option<Transaction>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<Anomaly>,
}

/// One row of the recent activity list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTransaction {
    pub id: i64,
    pub description: String,
    pub kind: TransactionKind,
    pub label: String,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub display_amount: String,
}

pub struct LedgerService;

impl LedgerService {
    /// Totals over every transaction dated at or before `as_of`.
    ///
    /// Goal-funding deposits count like any other deposit; goal balances are
    /// tracked on the goals themselves.
    pub fn aggregate(transactions: &[Transaction], as_of: DateTime<Utc>) -> LedgerTotals {
        let current_month = MonthKey::of(as_of);
        let previous_month = current_month.previous();

        let mut total = Decimal::ZERO;
        let mut current_net = Decimal::ZERO;
        let mut previous_net = Decimal::ZERO;
        let mut last_deposit: Option<&Transaction> = None;
        let mut anomalies = Vec::new();

        for txn in transactions {
            if !txn.has_valid_amount() {
                anomalies.push(Anomaly::NonPositiveAmount { transaction_id: txn.id }.report());
            }
            if txn.kind == TransactionKind::Expense && txn.category_id.is_none() {
                anomalies.push(Anomaly::UncategorizedExpense { transaction_id: txn.id }.report());
            }
            if txn.date > as_of {
                continue;
            }

            let signed = txn.signed_amount();
            let month = MonthKey::of(txn.date);
            let month_net = if month == current_month {
                Some(&mut current_net)
            } else if month == previous_month {
                Some(&mut previous_net)
            } else {
                None
            };
            let next_total = total.checked_add(signed);
            let next_net = month_net.as_deref().map(|net| net.checked_add(signed));
            match (next_total, next_net) {
                (Some(sum), None) => total = sum,
                (Some(sum), Some(Some(net_sum))) => {
                    total = sum;
                    if let Some(net) = month_net {
                        *net = net_sum;
                    }
                }
                _ => {
                    anomalies.push(Anomaly::AmountOverflow { transaction_id: txn.id }.report());
                    continue;
                }
            }

            if txn.kind == TransactionKind::Deposit && txn.has_valid_amount() {
                let newer = match last_deposit {
                    Some(best) => (txn.date, txn.id) > (best.date, best.id),
                    None => true,
                };
                if newer {
                    last_deposit = Some(txn);
                }
            }
        }

        LedgerTotals {
            total_savings: total,
            monthly_growth_percent: growth_percent(current_net, previous_net),
            last_deposit: last_deposit.cloned(),
            anomalies,
        }
    }

    /// Newest-first activity dated at or before `as_of`, capped at `limit` rows.
    pub fn recent(
        transactions: &[Transaction],
        limit: usize,
        as_of: DateTime<Utc>,
        formatter: &CurrencyFormatter,
    ) -> Vec<RecentTransaction> {
        let mut ordered: Vec<&Transaction> = transactions
            .iter()
            .filter(|txn| txn.date <= as_of)
            .collect();
        ordered.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
        ordered
            .into_iter()
            .take(limit)
            .map(|txn| RecentTransaction {
                id: txn.id,
                description: txn.description.clone(),
                kind: txn.kind,
                label: txn.kind.label().to_string(),
                date: txn.date,
                amount: txn.effective_amount(),
                display_amount: Self::display_amount(txn, formatter),
            })
            .collect()
    }

    /// `+₹…` for deposits, `-₹…` for withdrawals and expenses.
    pub fn display_amount(txn: &Transaction, formatter: &CurrencyFormatter) -> String {
        let sign = if txn.kind.is_outflow() {
            Sign::Minus
        } else {
            Sign::Plus
        };
        formatter.format_with_sign(txn.effective_amount(), sign)
    }
}

/// Month-over-month change of the net flow. A zero baseline yields 0 when
/// nothing moved this month, otherwise ±100 following the current sign.
pub fn growth_percent(current_net: Decimal, previous_net: Decimal) -> f64 {
    if previous_net.is_zero() {
        return if current_net.is_zero() {
            0.0
        } else if current_net > Decimal::ZERO {
            100.0
        } else {
            -100.0
        };
    }
    current_net
        .checked_sub(previous_net)
        .and_then(|delta| delta.checked_div(previous_net.abs()))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|percent| percent.to_f64())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
    }

    #[test]
    fn total_is_deposits_minus_outflows() {
        let txns = vec![
            Transaction::deposit(1, Decimal::from(1000), day(2024, 3, 2)),
            Transaction::expense(2, 1, Decimal::from(300), day(2024, 3, 5)),
        ];
        let totals = LedgerService::aggregate(&txns, day(2024, 3, 31));
        assert_eq!(totals.total_savings, Decimal::from(700));
    }

    #[test]
    fn goal_funded_outflows_still_reduce_total() {
        let txns = vec![
            Transaction::deposit(1, Decimal::from(500), day(2024, 3, 2)).with_goal(9),
            Transaction::withdrawal(2, Decimal::from(120), day(2024, 3, 3)).with_goal(9),
            Transaction::expense(3, 2, Decimal::from(80), day(2024, 3, 4)),
        ];
        let totals = LedgerService::aggregate(&txns, day(2024, 3, 31));
        assert_eq!(totals.total_savings, Decimal::from(300));
    }

    #[test]
    fn ignores_transactions_after_as_of() {
        let txns = vec![
            Transaction::deposit(1, Decimal::from(100), day(2024, 3, 2)),
            Transaction::deposit(2, Decimal::from(900), day(2024, 4, 2)),
        ];
        let totals = LedgerService::aggregate(&txns, day(2024, 3, 31));
        assert_eq!(totals.total_savings, Decimal::from(100));
        assert_eq!(totals.last_deposit.map(|t| t.id), Some(1));
    }

    #[test]
    fn growth_with_zero_baseline() {
        assert_eq!(growth_percent(Decimal::ZERO, Decimal::ZERO), 0.0);
        assert_eq!(growth_percent(Decimal::from(500), Decimal::ZERO), 100.0);
        assert_eq!(growth_percent(Decimal::from(-40), Decimal::ZERO), -100.0);
    }

    #[test]
    fn growth_uses_absolute_baseline() {
        assert_eq!(growth_percent(Decimal::from(150), Decimal::from(100)), 50.0);
        assert_eq!(growth_percent(Decimal::from(50), Decimal::from(-100)), 150.0);
        assert_eq!(growth_percent(Decimal::from(-200), Decimal::from(-100)), -100.0);
    }

    #[test]
    fn growth_compares_calendar_months() {
        let txns = vec![
            Transaction::deposit(1, Decimal::from(400), day(2024, 2, 10)),
            Transaction::deposit(2, Decimal::from(600), day(2024, 3, 10)),
            Transaction::expense(3, 1, Decimal::from(100), day(2024, 1, 10)),
        ];
        let totals = LedgerService::aggregate(&txns, day(2024, 3, 20));
        assert_eq!(totals.monthly_growth_percent, 50.0);
    }

    #[test]
    fn last_deposit_ties_break_on_highest_id() {
        let when = day(2024, 3, 2);
        let txns = vec![
            Transaction::deposit(4, Decimal::from(10), when),
            Transaction::deposit(7, Decimal::from(20), when),
            Transaction::deposit(5, Decimal::from(30), when),
            Transaction::withdrawal(9, Decimal::from(5), day(2024, 3, 9)),
        ];
        let totals = LedgerService::aggregate(&txns, day(2024, 3, 31));
        assert_eq!(totals.last_deposit.map(|t| t.id), Some(7));
    }

    #[test]
    fn no_deposits_means_no_last_deposit() {
        let txns = vec![Transaction::expense(1, 1, Decimal::from(10), day(2024, 3, 2))];
        let totals = LedgerService::aggregate(&txns, day(2024, 3, 31));
        assert!(totals.last_deposit.is_none());
        assert_eq!(totals.total_savings, Decimal::from(-10));
    }

    #[test]
    fn invalid_amounts_are_clamped_and_reported() {
        let txns = vec![
            Transaction::deposit(1, Decimal::from(-250), day(2024, 3, 2)),
            Transaction::deposit(2, Decimal::from(100), day(2024, 3, 3)),
            Transaction::new(3, TransactionKind::Expense, Decimal::from(40), day(2024, 3, 4)),
        ];
        let totals = LedgerService::aggregate(&txns, day(2024, 3, 31));
        assert_eq!(totals.total_savings, Decimal::from(60));
        assert_eq!(
            totals.anomalies,
            vec![
                Anomaly::NonPositiveAmount { transaction_id: 1 },
                Anomaly::UncategorizedExpense { transaction_id: 3 },
            ]
        );
    }

    #[test]
    fn recent_lists_newest_first_with_signed_amounts() {
        let formatter = CurrencyFormatter::default();
        let txns = vec![
            Transaction::deposit(1, Decimal::from(1500), day(2024, 3, 2)),
            Transaction::expense(2, 1, Decimal::from(250), day(2024, 3, 6)),
            Transaction::withdrawal(3, Decimal::from(100), day(2024, 3, 4)),
        ];
        let rows = LedgerService::recent(&txns, 2, day(2024, 3, 31), &formatter);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 2);
        assert_eq!(rows[0].display_amount, "-₹250");
        assert_eq!(rows[0].label, "Expense");
        assert_eq!(rows[1].id, 3);
        assert_eq!(
            LedgerService::display_amount(&txns[0], &formatter),
            "+₹1,500"
        );
    }

    #[test]
    fn recent_skips_rows_after_as_of() {
        let formatter = CurrencyFormatter::default();
        let txns = vec![
            Transaction::deposit(1, Decimal::from(100), day(2024, 3, 2)),
            Transaction::deposit(2, Decimal::from(200), day(2024, 3, 25)),
        ];
        let rows = LedgerService::recent(&txns, 5, day(2024, 3, 20), &formatter);
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn overflowing_amount_is_left_out_of_totals() {
        let txns = vec![
            Transaction::deposit(1, Decimal::MAX, day(2024, 3, 1)),
            Transaction::deposit(2, Decimal::MAX, day(2024, 3, 2)),
            Transaction::withdrawal(3, Decimal::from(5), day(2024, 3, 3)),
        ];
        let totals = LedgerService::aggregate(&txns, day(2024, 3, 20));
        assert_eq!(totals.total_savings, Decimal::MAX - Decimal::from(5));
        assert_eq!(
            totals.anomalies,
            vec![Anomaly::AmountOverflow { transaction_id: 2 }]
        );
    }

    #[test]
    fn growth_with_extreme_nets_does_not_panic() {
        let growth = growth_percent(Decimal::MAX, Decimal::MIN);
        assert_eq!(growth, 0.0);
    }
}
