use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{FinancialProfile, HealthReport, assess, format::render_summary, policy};
use crate::error::{Error, Result};

const DEFAULT_RETURN_PERCENT: f64 = 7.0;
// Larger amounts overflow the FI number and trajectory to infinity.
const MAX_AMOUNT: f64 = 1e12;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct AssessPayload {
    age: Option<u32>,
    annual_income: Option<f64>,
    liquid_assets: Option<f64>,
    real_estate_value: Option<f64>,
    total_debt: Option<f64>,
    monthly_debt_payments: Option<f64>,
    monthly_expenses: Option<f64>,
    monthly_savings: Option<f64>,
    annual_return_rate: Option<f64>,
    as_of: Option<NaiveDate>,
}

/// Profile flags shared by the CLI; the HTTP payload is merged over the same defaults.
#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[arg(long, default_value_t = 0, help = "Current age in years (0 = unknown)")]
    pub age: u32,
    #[arg(long, default_value_t = 0.0, help = "Gross annual income")]
    pub annual_income: f64,
    #[arg(long, default_value_t = 0.0, help = "Cash and investments you can access")]
    pub liquid_assets: f64,
    #[arg(long, default_value_t = 0.0)]
    pub real_estate_value: f64,
    #[arg(long, default_value_t = 0.0, help = "Outstanding balance across all debts")]
    pub total_debt: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Monthly debt payments; 0 estimates 1% of total debt"
    )]
    pub monthly_debt_payments: f64,
    #[arg(long, default_value_t = 0.0)]
    pub monthly_expenses: f64,
    #[arg(long, default_value_t = 0.0)]
    pub monthly_savings: f64,
    #[arg(
        long,
        default_value_t = DEFAULT_RETURN_PERCENT,
        help = "Expected annual investment return in percent, e.g. 7"
    )]
    pub annual_return_rate: f64,
}

#[derive(Debug)]
struct ApiRequest {
    profile: FinancialProfile,
    as_of: NaiveDate,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn build_profile(args: &ProfileArgs) -> Result<FinancialProfile> {
    if args.age > 120 {
        return Err(Error::validation("--age must be <= 120"));
    }

    for (name, value) in [
        ("--annual-income", args.annual_income),
        ("--liquid-assets", args.liquid_assets),
        ("--real-estate-value", args.real_estate_value),
        ("--total-debt", args.total_debt),
        ("--monthly-debt-payments", args.monthly_debt_payments),
        ("--monthly-expenses", args.monthly_expenses),
        ("--monthly-savings", args.monthly_savings),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::validation(format!(
                "{name} must be a finite number >= 0"
            )));
        }
        if value > MAX_AMOUNT {
            return Err(Error::validation(format!(
                "{name} must be <= {MAX_AMOUNT:e}"
            )));
        }
    }

    if !args.annual_return_rate.is_finite()
        || args.annual_return_rate <= -100.0
        || args.annual_return_rate > 100.0
    {
        return Err(Error::validation(
            "--annual-return-rate must be > -100 and <= 100",
        ));
    }

    Ok(FinancialProfile {
        age: args.age,
        annual_income: args.annual_income,
        liquid_assets: args.liquid_assets,
        real_estate_value: args.real_estate_value,
        total_debt: args.total_debt,
        monthly_debt_payments: args.monthly_debt_payments,
        monthly_expenses: args.monthly_expenses,
        monthly_savings: args.monthly_savings,
        annual_return_rate: args.annual_return_rate / 100.0,
    })
}

fn default_args_for_api() -> ProfileArgs {
    ProfileArgs {
        age: 0,
        annual_income: 0.0,
        liquid_assets: 0.0,
        real_estate_value: 0.0,
        total_debt: 0.0,
        monthly_debt_payments: 0.0,
        monthly_expenses: 0.0,
        monthly_savings: 0.0,
        annual_return_rate: DEFAULT_RETURN_PERCENT,
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn router() -> Router {
    Router::new()
        .route("/api/assess", get(assess_get_handler).post(assess_post_handler))
        .route("/api/policy", get(policy_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "finhealth HTTP API listening");
    tracing::info!("local access: http://127.0.0.1:{port}/api/assess");

    axum::serve(listener, router()).await?;
    Ok(())
}

/// Runs one assessment for the CLI and renders it as text or pretty JSON.
pub fn run_assess_command(
    args: &ProfileArgs,
    as_of: Option<NaiveDate>,
    json: bool,
) -> Result<String> {
    let profile = build_profile(args)?;
    let report = assess(&profile, as_of.unwrap_or_else(today));
    if json {
        Ok(format!("{}\n", serde_json::to_string_pretty(&report)?))
    } else {
        Ok(render_summary(&report))
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn policy_handler() -> Response {
    json_response(StatusCode::OK, policy::policy_snapshot())
}

async fn assess_get_handler(
    query: std::result::Result<Query<AssessPayload>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(payload)) => assess_handler_impl(payload).await,
        Err(rejection) => malformed_request(&rejection.body_text()),
    }
}

async fn assess_post_handler(
    body: std::result::Result<Json<AssessPayload>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(payload)) => assess_handler_impl(payload).await,
        Err(rejection) => malformed_request(&rejection.body_text()),
    }
}

fn malformed_request(msg: &str) -> Response {
    tracing::warn!(error = %msg, "malformed assessment request");
    error_response(StatusCode::BAD_REQUEST, msg)
}

async fn assess_handler_impl(payload: AssessPayload) -> Response {
    let request = match api_request_from_payload(payload, today()) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, "rejected assessment request");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    let report = build_assess_response(&request);
    tracing::debug!(
        total_score = report.health_score.total_score,
        grade = %report.grade,
        quick_wins = report.quick_wins.len(),
        "assessment computed"
    );
    json_response(StatusCode::OK, report)
}

fn build_assess_response(request: &ApiRequest) -> HealthReport {
    assess(&request.profile, request.as_of)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
fn api_request_from_json(json: &str, today: NaiveDate) -> Result<ApiRequest> {
    let payload = serde_json::from_str::<AssessPayload>(json)?;
    api_request_from_payload(payload, today)
}

fn api_request_from_payload(payload: AssessPayload, today: NaiveDate) -> Result<ApiRequest> {
    let mut args = default_args_for_api();

    if let Some(v) = payload.age {
        args.age = v;
    }
    if let Some(v) = payload.annual_income {
        args.annual_income = v;
    }
    if let Some(v) = payload.liquid_assets {
        args.liquid_assets = v;
    }
    if let Some(v) = payload.real_estate_value {
        args.real_estate_value = v;
    }
    if let Some(v) = payload.total_debt {
        args.total_debt = v;
    }
    if let Some(v) = payload.monthly_debt_payments {
        args.monthly_debt_payments = v;
    }
    if let Some(v) = payload.monthly_expenses {
        args.monthly_expenses = v;
    }
    if let Some(v) = payload.monthly_savings {
        args.monthly_savings = v;
    }
    if let Some(v) = payload.annual_return_rate {
        args.annual_return_rate = v;
    }

    let profile = build_profile(&args)?;
    Ok(ApiRequest {
        profile,
        as_of: payload.as_of.unwrap_or(today),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FreedomOutcome, Grade};
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
    }

    fn sample_args() -> ProfileArgs {
        ProfileArgs {
            age: 34,
            annual_income: 84_000.0,
            liquid_assets: 21_000.0,
            real_estate_value: 320_000.0,
            total_debt: 260_000.0,
            monthly_debt_payments: 1_900.0,
            monthly_expenses: 3_500.0,
            monthly_savings: 1_400.0,
            annual_return_rate: 6.0,
        }
    }

    #[test]
    fn api_request_from_json_parses_web_keys() {
        let json = r#"{
          "age": 41,
          "annualIncome": 150000,
          "liquidAssets": 45000,
          "realEstateValue": 600000,
          "totalDebt": 380000,
          "monthlyDebtPayments": 2600,
          "monthlyExpenses": 6200,
          "monthlySavings": 3000,
          "annualReturnRate": 5.5,
          "asOf": "2030-02-01"
        }"#;
        let request = api_request_from_json(json, fixed_today()).expect("json should parse");
        let profile = request.profile;

        assert_eq!(profile.age, 41);
        assert_approx(profile.annual_income, 150_000.0);
        assert_approx(profile.liquid_assets, 45_000.0);
        assert_approx(profile.real_estate_value, 600_000.0);
        assert_approx(profile.total_debt, 380_000.0);
        assert_approx(profile.monthly_debt_payments, 2_600.0);
        assert_approx(profile.monthly_expenses, 6_200.0);
        assert_approx(profile.monthly_savings, 3_000.0);
        assert_approx(profile.annual_return_rate, 0.055);
        assert_eq!(request.as_of, NaiveDate::from_ymd_opt(2030, 2, 1).expect("valid"));
    }

    #[test]
    fn empty_payload_uses_neutral_defaults() {
        let request = api_request_from_json("{}", fixed_today()).expect("json should parse");
        assert_eq!(request.profile, FinancialProfile::default());
        assert_eq!(request.as_of, fixed_today());
    }

    #[test]
    fn build_profile_converts_percent_return() {
        let profile = build_profile(&sample_args()).expect("valid profile");
        assert_approx(profile.annual_return_rate, 0.06);
    }

    #[test]
    fn build_profile_rejects_negative_amounts() {
        let mut args = sample_args();
        args.monthly_expenses = -1.0;
        let err = build_profile(&args).expect_err("must reject negative expenses");
        assert!(err.to_string().contains("--monthly-expenses"));
    }

    #[test]
    fn build_profile_rejects_non_finite_amounts() {
        let mut args = sample_args();
        args.liquid_assets = f64::NAN;
        let err = build_profile(&args).expect_err("must reject NaN");
        assert!(err.to_string().contains("--liquid-assets"));
    }

    #[test]
    fn build_profile_rejects_amounts_that_would_overflow() {
        let mut args = sample_args();
        args.monthly_expenses = 1e308;
        let err = build_profile(&args).expect_err("must reject huge expenses");
        assert!(err.to_string().contains("--monthly-expenses"));

        args.monthly_expenses = MAX_AMOUNT;
        assert!(build_profile(&args).is_ok());
    }

    #[test]
    fn build_profile_rejects_total_loss_return() {
        let mut args = sample_args();
        args.annual_return_rate = -100.0;
        let err = build_profile(&args).expect_err("must reject -100% return");
        assert!(err.to_string().contains("--annual-return-rate"));
    }

    #[test]
    fn build_profile_rejects_implausible_age() {
        let mut args = sample_args();
        args.age = 150;
        let err = build_profile(&args).expect_err("must reject age");
        assert!(err.to_string().contains("--age"));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = api_request_from_json(r#"{"annualIncome": "lots"}"#, fixed_today())
            .expect_err("must reject string income");
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn assess_response_serialization_contains_expected_fields() {
        let request = ApiRequest {
            profile: build_profile(&sample_args()).expect("valid profile"),
            as_of: fixed_today(),
        };
        let report = build_assess_response(&request);
        let json = serde_json::to_string(&report).expect("response should serialize");
        assert!(json.contains("\"asOf\":\"2026-10-16\""));
        assert!(json.contains("\"healthScore\""));
        assert!(json.contains("\"breakdown\""));
        assert!(json.contains("\"debtToIncomeRatio\""));
        assert!(json.contains("\"gradeLabel\""));
        assert!(json.contains("\"fiNumber\""));
        assert!(json.contains("\"monthlySavingsNeeded\""));
        assert!(json.contains("\"quickWins\""));
    }

    #[test]
    fn already_free_profile_reports_today_as_freedom_date() {
        let json = r#"{ "liquidAssets": 2000000, "monthlyExpenses": 5000 }"#;
        let request = api_request_from_json(json, fixed_today()).expect("json should parse");
        let report = build_assess_response(&request);
        assert_eq!(report.fire_plan.outcome, FreedomOutcome::AlreadyFree);
        assert_eq!(report.fire_plan.freedom_date, Some(fixed_today()));
    }

    #[test]
    fn policy_snapshot_serializes_thresholds() {
        let json = serde_json::to_value(policy::policy_snapshot()).expect("policy serializes");
        assert_eq!(json["targetRunwayMonths"], 6.0);
        assert_eq!(json["maxSimulationMonths"], 600);
        assert_eq!(json["gradeThresholds"][0][0], "A");
        assert_eq!(json["gradeThresholds"][0][1], 90);
        assert_eq!(json["trajectoryTailYears"], 5);
        assert_eq!(json["excessCashRunwayMultiple"], 2.0);
    }

    #[test]
    fn run_assess_command_emits_parseable_json() {
        let output = run_assess_command(&sample_args(), Some(fixed_today()), true)
            .expect("command should succeed");
        let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
        let grade = value["grade"].as_str().expect("grade string");
        assert!(["A", "B", "C", "D", "F"].contains(&grade));
    }

    #[test]
    fn run_assess_command_renders_text_summary() {
        let output = run_assess_command(&sample_args(), Some(fixed_today()), false)
            .expect("command should succeed");
        assert!(output.starts_with("Financial health as of 2026-10-16"));
    }

    #[tokio::test]
    async fn handler_rejects_invalid_payload_with_bad_request() {
        let payload = AssessPayload {
            total_debt: Some(-5.0),
            ..AssessPayload::default()
        };
        let response = assess_handler_impl(payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).map(|v| v.as_bytes()),
            Some(&b"no-store"[..])
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json error body");
        assert!(
            value["error"]
                .as_str()
                .expect("error message")
                .contains("--total-debt")
        );
    }

    #[tokio::test]
    async fn handler_returns_report_for_valid_payload() {
        let payload = AssessPayload {
            annual_income: Some(120_000.0),
            liquid_assets: Some(30_000.0),
            monthly_debt_payments: Some(2_000.0),
            monthly_expenses: Some(5_000.0),
            monthly_savings: Some(2_400.0),
            as_of: Some(fixed_today()),
            ..AssessPayload::default()
        };
        let response = assess_handler_impl(payload).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let value: serde_json::Value = serde_json::from_slice(&body).expect("json body");
        assert_eq!(value["healthScore"]["totalScore"], 100);
        assert_eq!(value["grade"], Grade::A.to_string());
        assert_eq!(value["quickWins"].as_array().map(Vec::len), Some(1));
    }

    async fn send(request: Request<Body>) -> (StatusCode, Option<String>, serde_json::Value) {
        let response = router().oneshot(request).await.expect("router is infallible");
        let status = response.status();
        let cache_control = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        let value = serde_json::from_slice(&body).expect("json body");
        (status, cache_control, value)
    }

    #[tokio::test]
    async fn router_rejects_malformed_json_body_as_bad_request() {
        let request = Request::post("/api/assess")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"annualIncome":"lots"}"#))
            .expect("request builds");
        let (status, cache_control, value) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert!(value["error"].as_str().expect("error message").contains("annualIncome"));
    }

    #[tokio::test]
    async fn router_rejects_malformed_query_as_bad_request() {
        let request = Request::get("/api/assess?totalDebt=abc")
            .body(Body::empty())
            .expect("request builds");
        let (status, cache_control, value) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert!(value["error"].is_string());
    }

    #[tokio::test]
    async fn router_assesses_query_parameters() {
        let request = Request::get(
            "/api/assess?annualIncome=120000&liquidAssets=30000&monthlyDebtPayments=2000\
             &monthlyExpenses=5000&monthlySavings=2400&asOf=2026-10-16",
        )
        .body(Body::empty())
        .expect("request builds");
        let (status, cache_control, value) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(value["asOf"], "2026-10-16");
        assert_eq!(value["healthScore"]["totalScore"], 100);
    }

    #[tokio::test]
    async fn router_serves_policy_snapshot() {
        let request = Request::get("/api/policy")
            .body(Body::empty())
            .expect("request builds");
        let (status, cache_control, value) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(value["maxQuickWins"], 3);
    }

    #[tokio::test]
    async fn router_answers_unknown_paths_with_json_404() {
        let request = Request::get("/nope").body(Body::empty()).expect("request builds");
        let (status, cache_control, value) = send(request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(value["error"], "Not found");
    }
}
