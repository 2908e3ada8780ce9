pub mod anomaly;
pub mod dashboard;
pub mod services;
pub mod time;
pub mod window;

pub use anomaly::Anomaly;
pub use dashboard::{
    DashboardState, DataSource, InsightSource, MutationOutcome, MutationSink, MutationTicket,
};
pub use time::{Clock, FixedClock, MonthKey, SystemClock};
pub use window::{BreakdownPeriod, DateWindow};
