use chrono::{Months, NaiveDate};

use super::policy::{
    CAPPED_YEARS_TO_FI, FI_EXPENSE_MULTIPLIER, MAX_SIMULATION_MONTHS, MAX_TRAJECTORY_YEARS,
    SAVINGS_TARGET_YEARS, TRAJECTORY_TAIL_YEARS,
};
use super::ratios::finite_or_zero;
use super::types::{FinancialProfile, FirePlan, FreedomOutcome, TrajectoryPoint};

pub fn fi_number(monthly_expenses: f64) -> f64 {
    (finite_or_zero(monthly_expenses) * 12.0 * FI_EXPENSE_MULTIPLIER).max(0.0)
}

pub fn current_net_worth(profile: &FinancialProfile) -> f64 {
    finite_or_zero(profile.liquid_assets) + finite_or_zero(profile.real_estate_value)
        - finite_or_zero(profile.total_debt)
}

fn monthly_rate(profile: &FinancialProfile) -> f64 {
    // Rates at or below -100% would flip the sign of wealth every month.
    (finite_or_zero(profile.annual_return_rate) / 12.0).max(-0.99)
}

fn step_month(value: f64, rate: f64, monthly_savings: f64) -> f64 {
    value * (1.0 + rate) + monthly_savings
}

/// Months of compounding needed to reach `target`, or `None` when the cap is hit first.
fn simulate_months_to_target(
    start: f64,
    target: f64,
    rate: f64,
    monthly_savings: f64,
) -> Option<u32> {
    let mut value = start;
    for month in 1..=MAX_SIMULATION_MONTHS {
        value = step_month(value, rate, monthly_savings);
        if value >= target {
            return Some(month);
        }
    }
    None
}

pub fn project_fire(profile: &FinancialProfile, as_of: NaiveDate) -> FirePlan {
    let net_worth = current_net_worth(profile);
    let target = fi_number(profile.monthly_expenses);
    let rate = monthly_rate(profile);
    let monthly_savings = finite_or_zero(profile.monthly_savings);
    let annual_return = finite_or_zero(profile.annual_return_rate);

    let outcome = if net_worth >= target {
        FreedomOutcome::AlreadyFree
    } else if monthly_savings <= 0.0 && annual_return <= 0.0 {
        FreedomOutcome::Unreachable
    } else {
        match simulate_months_to_target(net_worth, target, rate, monthly_savings) {
            Some(months) => match as_of.checked_add_months(Months::new(months)) {
                Some(date) => FreedomOutcome::Reachable { date, months },
                None => FreedomOutcome::BeyondHorizon,
            },
            None => FreedomOutcome::BeyondHorizon,
        }
    };

    let (freedom_date, months_to_fi) = match outcome {
        FreedomOutcome::AlreadyFree => (Some(as_of), Some(0)),
        FreedomOutcome::Reachable { date, months } => (Some(date), Some(months)),
        FreedomOutcome::BeyondHorizon => (None, Some(MAX_SIMULATION_MONTHS)),
        FreedomOutcome::Unreachable => (None, None),
    };
    let years_to_fi = match (outcome, months_to_fi) {
        (FreedomOutcome::BeyondHorizon, _) => CAPPED_YEARS_TO_FI,
        (_, Some(months)) => (months / 12) as f64,
        (_, None) => f64::INFINITY,
    };
    let remaining_months = months_to_fi.map(|m| m % 12).unwrap_or(0);

    let horizon_years = if years_to_fi.is_finite() {
        (years_to_fi as u32 + TRAJECTORY_TAIL_YEARS).min(MAX_TRAJECTORY_YEARS)
    } else {
        MAX_TRAJECTORY_YEARS
    };

    FirePlan {
        current_net_worth: net_worth,
        fi_number: target,
        outcome,
        is_already_fi: outcome == FreedomOutcome::AlreadyFree,
        freedom_date,
        months_to_fi,
        years_to_fi,
        remaining_months,
        progress_percentage: progress_percentage(net_worth, target),
        trajectory_data: build_trajectory(
            profile.age,
            net_worth,
            target,
            rate,
            monthly_savings,
            horizon_years,
        ),
        monthly_savings_needed: monthly_savings_needed(net_worth, target, rate),
    }
}

fn progress_percentage(net_worth: f64, target: f64) -> f64 {
    if net_worth >= target {
        return 100.0;
    }
    if target <= 0.0 {
        return 0.0;
    }
    (net_worth / target * 100.0).clamp(0.0, 100.0)
}

fn build_trajectory(
    age: u32,
    start: f64,
    fi_line: f64,
    rate: f64,
    monthly_savings: f64,
    horizon_years: u32,
) -> Vec<TrajectoryPoint> {
    let mut points = Vec::with_capacity(horizon_years as usize + 1);
    let mut wealth = start;
    for year in 0..=horizon_years {
        if year > 0 {
            for _ in 0..12 {
                wealth = step_month(wealth, rate, monthly_savings);
            }
        }
        points.push(TrajectoryPoint {
            year,
            age: (age > 0).then_some(age.saturating_add(year)),
            wealth,
            fi_line,
        });
    }
    points
}

/// Level monthly contribution that reaches `target` in the fixed savings horizon.
fn monthly_savings_needed(net_worth: f64, target: f64, rate: f64) -> f64 {
    if net_worth >= target {
        return 0.0;
    }
    let months = (SAVINGS_TARGET_YEARS * 12) as i32;
    let growth = (1.0 + rate).powi(months);
    let gap = target - net_worth * growth;
    if gap <= 0.0 {
        return 0.0;
    }
    let annuity_factor = if rate.abs() < 1e-12 {
        months as f64
    } else {
        (growth - 1.0) / rate
    };
    if annuity_factor <= 0.0 {
        return 0.0;
    }
    (gap / annuity_factor).max(0.0)
}
