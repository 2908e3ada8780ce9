use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DashboardConfig;
use crate::core::anomaly::Anomaly;
use crate::core::window::{BreakdownPeriod, DateWindow};
use crate::currency::CurrencyFormatter;
use crate::domain::{Category, SavingsGoal, Snapshot, Transaction};

use super::{
    CategoryService, CategorySpend, GoalPreview, GoalService, LedgerService, RecentTransaction,
    TrendSeries, TrendService,
};

/// Knobs the widgets pick; everything else is derived from the input.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryOptions {
    pub trend_months: u32,
    pub breakdown_period: BreakdownPeriod,
    pub recent_limit: usize,
    pub trend_series_limit: usize,
    pub goal_preview_limit: usize,
    pub formatter: CurrencyFormatter,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for SummaryOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            trend_months: config.trend_months,
            breakdown_period: config.breakdown_period,
            recent_limit: config.recent_limit,
            trend_series_limit: config.trend_series_limit,
            goal_preview_limit: config.goal_preview_limit,
            formatter: config.formatter(),
        }
    }
}

/// The single immutable object every dashboard widget renders from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedSummary {
    pub generated_at: DateTime<Utc>,
    pub total_savings: Decimal,
    pub monthly_growth_percent: f64,
    pub last_deposit: Option<Transaction>,
    pub next_goal: Option<SavingsGoal>,
    pub next_goal_progress: Option<u8>,
    pub breakdown_window: DateWindow,
    pub category_breakdown: Vec<CategorySpend>,
    pub trend_series: TrendSeries,
    /// Categories that get a chart line, in line-identity order.
    pub chart_categories: Vec<i64>,
    pub goal_previews: Vec<GoalPreview>,
    pub recent_transactions: Vec<RecentTransaction>,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
}

impl DerivedSummary {
    pub fn total_savings_display(&self, formatter: &CurrencyFormatter) -> String {
        formatter.format(self.total_savings.max(Decimal::ZERO), false)
    }

    pub fn growth_display(&self, formatter: &CurrencyFormatter) -> String {
        formatter.format_growth(self.monthly_growth_percent)
    }

    pub fn total_spend(&self) -> Decimal {
        CategoryService::total_spend(&self.category_breakdown)
    }
}

pub struct SummaryService;

impl SummaryService {
    /// Summary with the default dashboard options.
    pub fn summarize(
        transactions: &[Transaction],
        goals: &[SavingsGoal],
        categories: &[Category],
        now: DateTime<Utc>,
    ) -> DerivedSummary {
        Self::summarize_with(&SummaryOptions::default(), transactions, goals, categories, now)
    }

    pub fn summarize_snapshot(
        options: &SummaryOptions,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
    ) -> DerivedSummary {
        Self::summarize_with(
            options,
            &snapshot.transactions,
            &snapshot.goals,
            &snapshot.categories,
            now,
        )
    }

    /// Pure composition of the calculators. `now` is the only notion of
    /// time; identical input produces an identical summary.
    pub fn summarize_with(
        options: &SummaryOptions,
        transactions: &[Transaction],
        goals: &[SavingsGoal],
        categories: &[Category],
        now: DateTime<Utc>,
    ) -> DerivedSummary {
        let totals = LedgerService::aggregate(transactions, now);
        let breakdown_window = options.breakdown_period.window(now);
        let category_breakdown =
            CategoryService::breakdown(transactions, categories, breakdown_window);
        let trend_series = TrendService::build_trend(transactions, options.trend_months, now);
        let chart_categories = trend_series
            .series_categories(options.trend_series_limit)
            .to_vec();
        let goals_overview = GoalService::overview(goals, options.goal_preview_limit);
        let recent_transactions = LedgerService::recent(
            transactions,
            options.recent_limit,
            now,
            &options.formatter,
        );

        let mut anomalies = totals.anomalies;
        anomalies.extend(goals_overview.anomalies);

        tracing::debug!(
            transactions = transactions.len(),
            goals = goals.len(),
            categories = categories.len(),
            anomalies = anomalies.len(),
            "dashboard summary computed"
        );

        let next_goal_progress = goals_overview.next_goal.as_ref().map(GoalService::progress);
        DerivedSummary {
            generated_at: now,
            total_savings: totals.total_savings,
            monthly_growth_percent: totals.monthly_growth_percent,
            last_deposit: totals.last_deposit,
            next_goal: goals_overview.next_goal,
            next_goal_progress,
            breakdown_window,
            category_breakdown,
            trend_series,
            chart_categories,
            goal_previews: goals_overview.previews,
            recent_transactions,
            anomalies,
        }
    }
}
