use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::core::anomaly::Anomaly;
use crate::domain::SavingsGoal;

/// Goal card row: progress already clamped to `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPreview {
    pub goal_id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub progress: u8,
    pub current_amount: Decimal,
    pub target_amount: Decimal,
    pub remaining: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<DateTime<Utc>>,
}

impl GoalPreview {
    fn of(goal: &SavingsGoal) -> Self {
        Self {
            goal_id: goal.id,
            name: goal.name.clone(),
            icon: goal.icon.clone(),
            color: goal.color.clone(),
            progress: GoalService::progress(goal),
            current_amount: goal.saved(),
            target_amount: goal.target_amount,
            remaining: goal.remaining(),
            deadline: goal.deadline,
        }
    }
}

/// Everything the goal widgets need, gathered in one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalOverview {
    pub next_goal: Option<SavingsGoal>,
    pub previews: Vec<GoalPreview>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<Anomaly>,
}

pub struct GoalService;

impl GoalService {
    /// Percent complete, rounded half-up and clamped to 100. A goal with a
    /// non-positive target reads as 0.
    pub fn progress(goal: &SavingsGoal) -> u8 {
        if !goal.has_valid_target() {
            return 0;
        }
        let ratio = goal
            .saved()
            .checked_div(goal.target_amount)
            .unwrap_or(Decimal::ZERO)
            .min(Decimal::ONE);
        (ratio * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u8()
            .unwrap_or(0)
    }

    /// The incomplete goal closest to being finished, by remaining amount.
    /// Ties go to the earliest deadline (undated last), then the lowest id.
    pub fn select_next_goal(goals: &[SavingsGoal]) -> Option<&SavingsGoal> {
        goals
            .iter()
            .filter(|goal| is_candidate(goal))
            .min_by(|a, b| next_goal_order(a, b))
    }

    /// Next goal, the first `preview_limit` previews and any anomalies.
    pub fn overview(goals: &[SavingsGoal], preview_limit: usize) -> GoalOverview {
        let mut next: Option<&SavingsGoal> = None;
        let mut previews = Vec::with_capacity(preview_limit.min(goals.len()));
        let mut anomalies = Vec::new();

        for (idx, goal) in goals.iter().enumerate() {
            if !goal.has_valid_target() {
                anomalies.push(Anomaly::InvalidGoalTarget { goal_id: goal.id }.report());
            }
            if goal.current_amount < Decimal::ZERO {
                anomalies.push(Anomaly::NegativeGoalBalance { goal_id: goal.id }.report());
            }
            if idx < preview_limit {
                previews.push(GoalPreview::of(goal));
            }
            if is_candidate(goal) {
                let better = match next {
                    Some(best) => next_goal_order(goal, best) == Ordering::Less,
                    None => true,
                };
                if better {
                    next = Some(goal);
                }
            }
        }

        GoalOverview {
            next_goal: next.cloned(),
            previews,
            anomalies,
        }
    }
}

fn is_candidate(goal: &SavingsGoal) -> bool {
    goal.has_valid_target() && !goal.is_complete()
}

fn next_goal_order(a: &SavingsGoal, b: &SavingsGoal) -> Ordering {
    a.remaining()
        .cmp(&b.remaining())
        .then_with(|| match (a.deadline, b.deadline) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn goal(id: i64, target: i64, current: i64) -> SavingsGoal {
        SavingsGoal::new(
            id,
            format!("Goal {id}"),
            Decimal::from(target),
            Decimal::from(current),
        )
    }

    #[test]
    fn progress_clamps_at_hundred() {
        assert_eq!(GoalService::progress(&goal(1, 10000, 12000)), 100);
        assert_eq!(GoalService::progress(&goal(1, 50000, 10000)), 20);
    }

    #[test]
    fn progress_rounds_half_up() {
        assert_eq!(GoalService::progress(&goal(1, 200, 1)), 1);
        assert_eq!(GoalService::progress(&goal(1, 3, 2)), 67);
    }

    #[test]
    fn progress_of_invalid_goal_is_zero() {
        assert_eq!(GoalService::progress(&goal(1, 0, 500)), 0);
        assert_eq!(GoalService::progress(&goal(1, 1000, -50)), 0);
    }

    #[test]
    fn next_goal_needs_least_to_finish() {
        let goals = vec![goal(1, 1000, 900), goal(2, 5000, 100)];
        assert_eq!(GoalService::select_next_goal(&goals).map(|g| g.id), Some(1));
    }

    #[test]
    fn completed_goals_are_skipped() {
        let goals = vec![goal(1, 1000, 1000), goal(2, 500, 700), goal(3, 800, 100)];
        assert_eq!(GoalService::select_next_goal(&goals).map(|g| g.id), Some(3));
        let done = vec![goal(1, 1000, 1000)];
        assert!(GoalService::select_next_goal(&done).is_none());
        assert!(GoalService::select_next_goal(&[]).is_none());
    }

    #[test]
    fn ties_prefer_earliest_deadline_then_lowest_id() {
        let soon = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let goals = vec![
            goal(4, 1000, 500),
            goal(3, 1000, 500).with_deadline(later),
            goal(5, 1000, 500).with_deadline(soon),
        ];
        assert_eq!(GoalService::select_next_goal(&goals).map(|g| g.id), Some(5));

        let undated = vec![goal(8, 1000, 500), goal(6, 1000, 500)];
        assert_eq!(GoalService::select_next_goal(&undated).map(|g| g.id), Some(6));
    }

    #[test]
    fn overview_matches_selection_and_reports_anomalies() {
        let goals = vec![
            goal(1, 0, 10),
            goal(2, 5000, 100),
            goal(3, 1000, 900),
            goal(4, 2000, -5),
        ];
        let overview = GoalService::overview(&goals, 3);
        assert_eq!(overview.next_goal.as_ref().map(|g| g.id), Some(3));
        assert_eq!(
            overview.next_goal.as_ref().map(|g| g.id),
            GoalService::select_next_goal(&goals).map(|g| g.id)
        );
        assert_eq!(overview.previews.len(), 3);
        assert_eq!(overview.previews[2].progress, 90);
        assert_eq!(
            overview.anomalies,
            vec![
                Anomaly::InvalidGoalTarget { goal_id: 1 },
                Anomaly::NegativeGoalBalance { goal_id: 4 },
            ]
        );
    }
}
