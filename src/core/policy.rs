//! Product policy constants for scoring and projection.
//!
//! These are fixed by product decision rather than derived from inputs.
//! Tests assert against them directly.

use serde::Serialize;

use super::types::{GRADE_THRESHOLDS, Grade};

/// Months of expenses the emergency fund should cover.
pub const TARGET_RUNWAY_MONTHS: f64 = 6.0;
pub const LIQUIDITY_MAX_POINTS: f64 = 30.0;

/// Debt-to-income at or below this earns full solvency credit.
pub const DTI_FULL_CREDIT: f64 = 0.30;
/// Debt-to-income at or above this earns no solvency credit.
pub const DTI_ZERO_CREDIT: f64 = 0.60;
pub const SOLVENCY_MAX_POINTS: f64 = 30.0;

pub const TARGET_SAVINGS_RATE: f64 = 0.20;
pub const SAVINGS_MAX_POINTS: f64 = 40.0;

/// Monthly payment assumed per unit of outstanding debt when none is given.
pub const DEBT_PAYMENT_ESTIMATE_RATE: f64 = 0.01;

/// FI number as a multiple of annual expenses (4% withdrawal rule).
pub const FI_EXPENSE_MULTIPLIER: f64 = 25.0;
pub const MAX_SIMULATION_MONTHS: u32 = 600;
pub const CAPPED_YEARS_TO_FI: f64 = 50.0;
pub const MAX_TRAJECTORY_YEARS: u32 = 30;
pub const TRAJECTORY_TAIL_YEARS: u32 = 5;
pub const SAVINGS_TARGET_YEARS: u32 = 10;

pub const EXCESS_CASH_RUNWAY_MULTIPLE: f64 = 2.0;
pub const EXCESS_CASH_BUFFER: f64 = 5_000.0;
pub const MAX_QUICK_WINS: usize = 3;

pub const DEFAULT_ANNUAL_RETURN_RATE: f64 = 0.07;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySnapshot {
    pub target_runway_months: f64,
    pub liquidity_max_points: f64,
    pub dti_full_credit: f64,
    pub dti_zero_credit: f64,
    pub solvency_max_points: f64,
    pub target_savings_rate: f64,
    pub savings_max_points: f64,
    pub debt_payment_estimate_rate: f64,
    pub fi_expense_multiplier: f64,
    pub max_simulation_months: u32,
    pub capped_years_to_fi: f64,
    pub max_trajectory_years: u32,
    pub trajectory_tail_years: u32,
    pub savings_target_years: u32,
    pub excess_cash_runway_multiple: f64,
    pub excess_cash_buffer: f64,
    pub max_quick_wins: usize,
    pub default_annual_return_rate: f64,
    pub grade_thresholds: [(Grade, u32); 4],
}

pub fn policy_snapshot() -> PolicySnapshot {
    PolicySnapshot {
        target_runway_months: TARGET_RUNWAY_MONTHS,
        liquidity_max_points: LIQUIDITY_MAX_POINTS,
        dti_full_credit: DTI_FULL_CREDIT,
        dti_zero_credit: DTI_ZERO_CREDIT,
        solvency_max_points: SOLVENCY_MAX_POINTS,
        target_savings_rate: TARGET_SAVINGS_RATE,
        savings_max_points: SAVINGS_MAX_POINTS,
        debt_payment_estimate_rate: DEBT_PAYMENT_ESTIMATE_RATE,
        fi_expense_multiplier: FI_EXPENSE_MULTIPLIER,
        max_simulation_months: MAX_SIMULATION_MONTHS,
        capped_years_to_fi: CAPPED_YEARS_TO_FI,
        max_trajectory_years: MAX_TRAJECTORY_YEARS,
        trajectory_tail_years: TRAJECTORY_TAIL_YEARS,
        savings_target_years: SAVINGS_TARGET_YEARS,
        excess_cash_runway_multiple: EXCESS_CASH_RUNWAY_MULTIPLE,
        excess_cash_buffer: EXCESS_CASH_BUFFER,
        max_quick_wins: MAX_QUICK_WINS,
        default_annual_return_rate: DEFAULT_ANNUAL_RETURN_RATE,
        grade_thresholds: GRADE_THRESHOLDS,
    }
}
