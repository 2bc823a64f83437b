use super::policy::{
    DTI_FULL_CREDIT, DTI_ZERO_CREDIT, LIQUIDITY_MAX_POINTS, SAVINGS_MAX_POINTS,
    SOLVENCY_MAX_POINTS, TARGET_RUNWAY_MONTHS, TARGET_SAVINGS_RATE,
};
use super::ratios::{Ratios, derive_ratios};
use super::types::{
    FinancialProfile, Grade, HealthScore, LiquidityScore, SavingsScore, ScoreBreakdown,
    SolvencyScore,
};

/// Linear ramp to the runway target, capped.
pub fn liquidity_points(months_of_runway: f64) -> f64 {
    ((months_of_runway / TARGET_RUNWAY_MONTHS) * LIQUIDITY_MAX_POINTS)
        .clamp(0.0, LIQUIDITY_MAX_POINTS)
}

/// Full credit up to the lower DTI bound, none from the upper bound, linear between.
pub fn solvency_points(debt_to_income: f64) -> f64 {
    if debt_to_income <= DTI_FULL_CREDIT {
        return SOLVENCY_MAX_POINTS;
    }
    if debt_to_income >= DTI_ZERO_CREDIT {
        return 0.0;
    }
    let span = DTI_ZERO_CREDIT - DTI_FULL_CREDIT;
    (SOLVENCY_MAX_POINTS * (1.0 - (debt_to_income - DTI_FULL_CREDIT) / span))
        .clamp(0.0, SOLVENCY_MAX_POINTS)
}

pub fn savings_points(savings_rate: f64) -> f64 {
    ((savings_rate / TARGET_SAVINGS_RATE) * SAVINGS_MAX_POINTS).clamp(0.0, SAVINGS_MAX_POINTS)
}

pub fn score_ratios(ratios: &Ratios) -> HealthScore {
    let liquidity = liquidity_points(ratios.months_of_runway);
    // Without income there is nothing to service debt from, so no credit.
    let solvency = if ratios.monthly_income > 0.0 {
        solvency_points(ratios.debt_to_income)
    } else {
        0.0
    };
    let savings = savings_points(ratios.savings_rate);

    let total = (liquidity + solvency + savings).round().clamp(0.0, 100.0);

    HealthScore {
        total_score: total as u32,
        breakdown: ScoreBreakdown {
            liquidity: LiquidityScore {
                score: liquidity,
                max: LIQUIDITY_MAX_POINTS,
                months_of_runway: ratios.months_of_runway,
            },
            solvency: SolvencyScore {
                score: solvency,
                max: SOLVENCY_MAX_POINTS,
                debt_to_income_ratio: ratios.debt_to_income * 100.0,
            },
            savings: SavingsScore {
                score: savings,
                max: SAVINGS_MAX_POINTS,
                savings_rate: ratios.savings_rate * 100.0,
            },
        },
    }
}

pub fn calculate_health_score(profile: &FinancialProfile) -> HealthScore {
    score_ratios(&derive_ratios(profile))
}

pub fn score_to_grade(score: u32) -> Grade {
    Grade::from_score(score)
}
