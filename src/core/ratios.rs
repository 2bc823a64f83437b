use super::policy::DEBT_PAYMENT_ESTIMATE_RATE;
use super::types::FinancialProfile;

/// Ratios derived from a profile. Rates are fractions, not percents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratios {
    pub months_of_runway: f64,
    pub monthly_income: f64,
    pub monthly_debt_payments: f64,
    pub debt_to_income: f64,
    pub savings_rate: f64,
}

pub(crate) fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

pub fn resolve_monthly_debt_payments(profile: &FinancialProfile) -> f64 {
    let provided = finite_or_zero(profile.monthly_debt_payments);
    if provided > 0.0 {
        provided
    } else {
        (finite_or_zero(profile.total_debt) * DEBT_PAYMENT_ESTIMATE_RATE).max(0.0)
    }
}

pub fn derive_ratios(profile: &FinancialProfile) -> Ratios {
    let liquid_assets = finite_or_zero(profile.liquid_assets);
    let monthly_expenses = finite_or_zero(profile.monthly_expenses);
    let annual_income = finite_or_zero(profile.annual_income);
    let monthly_savings = finite_or_zero(profile.monthly_savings);

    let months_of_runway = liquid_assets / monthly_expenses.max(1.0);
    let monthly_income = if annual_income > 0.0 {
        annual_income / 12.0
    } else {
        0.0
    };
    let monthly_debt_payments = resolve_monthly_debt_payments(profile);

    let debt_to_income = if monthly_income > 0.0 {
        monthly_debt_payments / monthly_income
    } else if monthly_debt_payments > 0.0 {
        1.0
    } else {
        0.0
    };

    let savings_rate = if monthly_income > 0.0 {
        monthly_savings / monthly_income
    } else {
        0.0
    }
    .clamp(0.0, 1.0);

    Ratios {
        months_of_runway,
        monthly_income,
        monthly_debt_payments,
        debt_to_income,
        savings_rate,
    }
}
