use chrono::NaiveDate;
use serde::Serialize;

use super::policy::DEFAULT_ANNUAL_RETURN_RATE;

/// Raw wizard inputs. Amounts are in account currency, rates are fractions.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialProfile {
    pub age: u32,
    pub annual_income: f64,
    pub liquid_assets: f64,
    pub real_estate_value: f64,
    pub total_debt: f64,
    /// Zero means "not provided"; an estimate from `total_debt` is used instead.
    pub monthly_debt_payments: f64,
    pub monthly_expenses: f64,
    pub monthly_savings: f64,
    pub annual_return_rate: f64,
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self {
            age: 0,
            annual_income: 0.0,
            liquid_assets: 0.0,
            real_estate_value: 0.0,
            total_debt: 0.0,
            monthly_debt_payments: 0.0,
            monthly_expenses: 0.0,
            monthly_savings: 0.0,
            annual_return_rate: DEFAULT_ANNUAL_RETURN_RATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityScore {
    pub score: f64,
    pub max: f64,
    pub months_of_runway: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvencyScore {
    pub score: f64,
    pub max: f64,
    /// Percent, e.g. 35.0 for 35%.
    pub debt_to_income_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsScore {
    pub score: f64,
    pub max: f64,
    /// Percent, e.g. 12.5 for 12.5%.
    pub savings_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub liquidity: LiquidityScore,
    pub solvency: SolvencyScore,
    pub savings: SavingsScore,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthScore {
    pub total_score: u32,
    pub breakdown: ScoreBreakdown,
}

impl HealthScore {
    pub fn grade(&self) -> Grade {
        Grade::from_score(self.total_score)
    }
}

/// Minimum total score for each passing grade, best first; anything lower is `F`.
pub const GRADE_THRESHOLDS: [(Grade, u32); 4] =
    [(Grade::A, 90), (Grade::B, 75), (Grade::C, 60), (Grade::D, 45)];

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
}

impl Grade {
    pub fn from_score(score: u32) -> Self {
        GRADE_THRESHOLDS
            .iter()
            .find(|(_, min)| score >= *min)
            .map(|(grade, _)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_char(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "Excellent",
            Grade::B => "Good",
            Grade::C => "Fair",
            Grade::D => "Needs work",
            Grade::F => "Critical",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum FreedomOutcome {
    /// Net worth already meets the FI number.
    AlreadyFree,
    Reachable { date: NaiveDate, months: u32 },
    /// Simulation hit the month cap before reaching the FI number.
    BeyondHorizon,
    /// No savings and no growth: the gap can never close.
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub year: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub wealth: f64,
    pub fi_line: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirePlan {
    pub current_net_worth: f64,
    pub fi_number: f64,
    pub outcome: FreedomOutcome,
    pub is_already_fi: bool,
    pub freedom_date: Option<NaiveDate>,
    /// Total simulated months; `None` only when unreachable.
    pub months_to_fi: Option<u32>,
    /// Whole years; infinite when unreachable (serialized as `null`).
    pub years_to_fi: f64,
    pub remaining_months: u32,
    pub progress_percentage: f64,
    pub trajectory_data: Vec<TrajectoryPoint>,
    pub monthly_savings_needed: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickWinCategory {
    Liquidity,
    Solvency,
    Savings,
    Growth,
}

impl QuickWinCategory {
    pub fn priority(self) -> u8 {
        match self {
            QuickWinCategory::Liquidity => 1,
            QuickWinCategory::Solvency => 2,
            QuickWinCategory::Savings => 3,
            QuickWinCategory::Growth => 4,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickWin {
    pub priority: u8,
    pub category: QuickWinCategory,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    /// One-lever estimate holding everything else constant.
    pub points_gained: Option<u32>,
    pub estimated_grade: Option<Grade>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub as_of: NaiveDate,
    pub health_score: HealthScore,
    pub grade: Grade,
    pub grade_label: &'static str,
    pub fire_plan: FirePlan,
    pub quick_wins: Vec<QuickWin>,
}
