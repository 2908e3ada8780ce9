pub mod category_service;
pub mod goal_service;
pub mod ledger_service;
pub mod summary_service;
pub mod trend_service;

pub use category_service::{CategoryService, CategorySpend};
pub use goal_service::{GoalOverview, GoalPreview, GoalService};
pub use ledger_service::{LedgerService, LedgerTotals, RecentTransaction};
pub use summary_service::{DerivedSummary, SummaryOptions, SummaryService};
pub use trend_service::{TrendBucket, TrendSeries, TrendService, MAX_TREND_MONTHS};
