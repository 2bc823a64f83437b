//! Display helpers shared by recommendation text and the CLI summary.

use std::fmt::Write;

use super::policy::{CAPPED_YEARS_TO_FI, SAVINGS_TARGET_YEARS};
use super::ratios::finite_or_zero;
use super::types::{FirePlan, FreedomOutcome, HealthReport};

fn group_thousands(whole: u64) -> String {
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole dollars with thousands separators, e.g. `-$12,500`.
pub fn format_currency(value: f64) -> String {
    let rounded = finite_or_zero(value).round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.abs() as u64))
}

/// Short form for charts and headlines: `$1.2M`, `$45K`, `$900`.
pub fn format_compact_currency(value: f64) -> String {
    let value = finite_or_zero(value);
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{sign}${:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{sign}${:.0}K", abs / 1_000.0)
    } else {
        format!("{sign}${:.0}", abs)
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", finite_or_zero(value))
}

pub fn format_duration(years: u32, months: u32) -> String {
    fn unit(n: u32, singular: &str) -> String {
        if n == 1 {
            format!("1 {singular}")
        } else {
            format!("{n} {singular}s")
        }
    }

    match (years, months) {
        (0, 0) => "now".to_string(),
        (0, m) => unit(m, "month"),
        (y, 0) => unit(y, "year"),
        (y, m) => format!("{}, {}", unit(y, "year"), unit(m, "month")),
    }
}

pub fn format_freedom(plan: &FirePlan) -> String {
    match plan.outcome {
        FreedomOutcome::AlreadyFree => "Financially independent today".to_string(),
        FreedomOutcome::Reachable { date, .. } => date.format("%B %Y").to_string(),
        FreedomOutcome::BeyondHorizon => {
            format!("More than {CAPPED_YEARS_TO_FI} years away")
        }
        FreedomOutcome::Unreachable => "Not reachable without savings or growth".to_string(),
    }
}

/// Plain-text report printed by `finhealth assess`.
pub fn render_summary(report: &HealthReport) -> String {
    let score = &report.health_score;
    let b = &score.breakdown;
    let plan = &report.fire_plan;

    let mut out = String::new();
    let _ = writeln!(out, "Financial health as of {}", report.as_of);
    let _ = writeln!(
        out,
        "Score: {}/100  Grade: {} ({})",
        score.total_score, report.grade, report.grade_label
    );
    let _ = writeln!(
        out,
        "  Liquidity {:>5.1}/{:.0}  runway {:.1} months",
        b.liquidity.score, b.liquidity.max, b.liquidity.months_of_runway
    );
    let _ = writeln!(
        out,
        "  Solvency  {:>5.1}/{:.0}  debt-to-income {}",
        b.solvency.score,
        b.solvency.max,
        format_percent(b.solvency.debt_to_income_ratio)
    );
    let _ = writeln!(
        out,
        "  Savings   {:>5.1}/{:.0}  savings rate {}",
        b.savings.score,
        b.savings.max,
        format_percent(b.savings.savings_rate)
    );

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Net worth {} of FI number {} ({})",
        format_compact_currency(plan.current_net_worth),
        format_compact_currency(plan.fi_number),
        format_percent(plan.progress_percentage)
    );
    let _ = writeln!(out, "Freedom date: {}", format_freedom(plan));
    if let FreedomOutcome::Reachable { .. } = plan.outcome {
        let _ = writeln!(
            out,
            "Time to FI: {}",
            format_duration(plan.years_to_fi as u32, plan.remaining_months)
        );
    }
    if plan.monthly_savings_needed > 0.0 {
        let _ = writeln!(
            out,
            "Saving {} a month reaches FI in {SAVINGS_TARGET_YEARS} years",
            format_currency(plan.monthly_savings_needed)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Quick wins:");
    for win in &report.quick_wins {
        let _ = write!(out, "  {}. {}", win.priority, win.title);
        if let Some(points) = win.points_gained {
            let _ = write!(out, " (+{points} pts)");
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "     {}", win.description);
    }
    out
}
