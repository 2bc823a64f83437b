mod fire;
pub mod format;
pub mod policy;
mod quick_wins;
mod ratios;
mod score;
mod types;

use chrono::NaiveDate;

pub use fire::{current_net_worth, fi_number, project_fire};
pub use quick_wins::generate_quick_wins;
pub use ratios::{Ratios, derive_ratios, resolve_monthly_debt_payments};
pub use score::{
    calculate_health_score, liquidity_points, savings_points, score_ratios, score_to_grade,
    solvency_points,
};
pub use types::{
    FinancialProfile, FirePlan, FreedomOutcome, GRADE_THRESHOLDS, Grade, HealthReport,
    HealthScore, Impact, LiquidityScore, QuickWin, QuickWinCategory, SavingsScore,
    ScoreBreakdown, SolvencyScore, TrajectoryPoint,
};

/// Runs every stage for one profile: score, grade, projection and quick wins.
pub fn assess(profile: &FinancialProfile, as_of: NaiveDate) -> HealthReport {
    let health_score = calculate_health_score(profile);
    let grade = health_score.grade();
    let fire_plan = project_fire(profile, as_of);
    let quick_wins = generate_quick_wins(profile, &health_score);

    HealthReport {
        as_of,
        health_score,
        grade,
        grade_label: grade.label(),
        fire_plan,
        quick_wins,
    }
}
