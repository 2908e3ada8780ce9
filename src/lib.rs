#![doc(test(attr(deny(warnings))))]

//! PiggyBank Core turns raw ledger records (transactions, savings goals,
//! categories) into the display-ready metrics the dashboard widgets render:
//! totals and growth, category spend shares, monthly trend series and goal
//! progress.
//!
//! Every calculator is a pure function of its input and an explicit `now`.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod utils;

pub use crate::core::services::{DerivedSummary, SummaryOptions, SummaryService};
pub use crate::errors::{DashboardError, DashboardResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("PiggyBank Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
