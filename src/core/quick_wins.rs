use super::format::{format_currency, format_percent};
use super::policy::{
    DTI_FULL_CREDIT, EXCESS_CASH_BUFFER, EXCESS_CASH_RUNWAY_MULTIPLE, MAX_QUICK_WINS,
    SAVINGS_MAX_POINTS, SOLVENCY_MAX_POINTS, TARGET_RUNWAY_MONTHS, TARGET_SAVINGS_RATE,
};
use super::ratios::{Ratios, derive_ratios, finite_or_zero};
use super::score::liquidity_points;
use super::types::{FinancialProfile, Grade, HealthScore, Impact, QuickWin, QuickWinCategory};

/// Ranked improvement suggestions, at most `MAX_QUICK_WINS`, sorted by priority.
///
/// Each lever is estimated on its own; applying one does not feed into the next.
pub fn generate_quick_wins(profile: &FinancialProfile, score: &HealthScore) -> Vec<QuickWin> {
    let ratios = derive_ratios(profile);
    let monthly_expenses = finite_or_zero(profile.monthly_expenses);
    let liquid_assets = finite_or_zero(profile.liquid_assets);

    let mut wins = Vec::new();
    wins.extend(liquidity_gap(&ratios, score, monthly_expenses, liquid_assets));
    wins.extend(solvency_gap(&ratios, score));
    wins.extend(savings_gap(&ratios, score));
    wins.extend(excess_cash(monthly_expenses, liquid_assets));

    if wins.is_empty() {
        wins.push(maintain_course());
    }

    wins.sort_by_key(|w| w.priority);
    wins.truncate(MAX_QUICK_WINS);
    wins
}

fn with_points(
    category: QuickWinCategory,
    title: &str,
    description: String,
    impact: Impact,
    points: f64,
    score: &HealthScore,
) -> QuickWin {
    let points = points.round().max(0.0) as u32;
    QuickWin {
        priority: category.priority(),
        category,
        title: title.to_string(),
        description,
        impact,
        points_gained: Some(points),
        estimated_grade: Some(Grade::from_score(
            score.total_score.saturating_add(points).min(100),
        )),
    }
}

fn liquidity_gap(
    ratios: &Ratios,
    score: &HealthScore,
    monthly_expenses: f64,
    liquid_assets: f64,
) -> Option<QuickWin> {
    if ratios.months_of_runway >= TARGET_RUNWAY_MONTHS || monthly_expenses <= 0.0 {
        return None;
    }
    let gap = TARGET_RUNWAY_MONTHS * monthly_expenses - liquid_assets;
    if gap <= 0.0 {
        return None;
    }

    let new_runway = (liquid_assets + gap) / monthly_expenses.max(1.0);
    let points = liquidity_points(new_runway) - score.breakdown.liquidity.score;
    let impact = if ratios.months_of_runway < TARGET_RUNWAY_MONTHS / 2.0 {
        Impact::High
    } else {
        Impact::Medium
    };

    Some(with_points(
        QuickWinCategory::Liquidity,
        "Build your emergency fund",
        format!(
            "Set aside {} more to cover {} months of expenses. Today your cash covers {:.1} months.",
            format_currency(gap),
            TARGET_RUNWAY_MONTHS,
            ratios.months_of_runway.max(0.0)
        ),
        impact,
        points,
        score,
    ))
}

fn solvency_gap(ratios: &Ratios, score: &HealthScore) -> Option<QuickWin> {
    if ratios.debt_to_income <= DTI_FULL_CREDIT {
        return None;
    }
    let target_payment = ratios.monthly_income * DTI_FULL_CREDIT;
    let reduction = (ratios.monthly_debt_payments - target_payment).max(0.0);
    let points = SOLVENCY_MAX_POINTS - score.breakdown.solvency.score;
    let impact = if ratios.debt_to_income >= 2.0 * DTI_FULL_CREDIT {
        Impact::High
    } else {
        Impact::Medium
    };

    Some(with_points(
        QuickWinCategory::Solvency,
        "Reduce monthly debt payments",
        format!(
            "Cut debt payments by {} a month to bring debt-to-income from {} down to {}.",
            format_currency(reduction),
            format_percent(ratios.debt_to_income * 100.0),
            format_percent(DTI_FULL_CREDIT * 100.0)
        ),
        impact,
        points,
        score,
    ))
}

fn savings_gap(ratios: &Ratios, score: &HealthScore) -> Option<QuickWin> {
    if ratios.monthly_income <= 0.0 || ratios.savings_rate >= TARGET_SAVINGS_RATE {
        return None;
    }
    let target_savings = ratios.monthly_income * TARGET_SAVINGS_RATE;
    let additional = target_savings - ratios.savings_rate * ratios.monthly_income;
    let points = SAVINGS_MAX_POINTS - score.breakdown.savings.score;
    let impact = if ratios.savings_rate < TARGET_SAVINGS_RATE / 2.0 {
        Impact::High
    } else {
        Impact::Medium
    };

    Some(with_points(
        QuickWinCategory::Savings,
        "Increase your savings rate",
        format!(
            "Save {} more each month to reach a {} savings rate. You are saving {} today.",
            format_currency(additional),
            format_percent(TARGET_SAVINGS_RATE * 100.0),
            format_percent(ratios.savings_rate * 100.0)
        ),
        impact,
        points,
        score,
    ))
}

fn excess_cash(monthly_expenses: f64, liquid_assets: f64) -> Option<QuickWin> {
    let emergency_fund = TARGET_RUNWAY_MONTHS * monthly_expenses.max(0.0);
    let excess = liquid_assets - EXCESS_CASH_RUNWAY_MULTIPLE * emergency_fund;
    if excess <= EXCESS_CASH_BUFFER {
        return None;
    }

    let category = QuickWinCategory::Growth;
    Some(QuickWin {
        priority: category.priority(),
        category,
        title: "Put idle cash to work".to_string(),
        description: format!(
            "You hold {} beyond twice your emergency fund. Investing it can bring your freedom date closer.",
            format_currency(excess)
        ),
        impact: Impact::Medium,
        points_gained: None,
        estimated_grade: None,
    })
}

fn maintain_course() -> QuickWin {
    let category = QuickWinCategory::Growth;
    QuickWin {
        priority: category.priority(),
        category,
        title: "Stay the course".to_string(),
        description: "You meet every target. Keep contributing and review your plan once a year."
            .to_string(),
        impact: Impact::Low,
        points_gained: None,
        estimated_grade: None,
    }
}
