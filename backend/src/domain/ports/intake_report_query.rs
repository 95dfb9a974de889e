//! Driving port for intake reports.
//!
//! Reports never fail on missing or malformed optional parameters; they fall
//! back to period defaults or select nothing. Only storage failures and an
//! out-of-range rollup length surface as errors.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, PeriodInput, UserId};

use super::intake_command::IntakePayload;

/// Request for the "today" report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayReportRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Total plus the contributing intakes, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayReportResponse {
    pub total_amount: f64,
    pub intakes: Vec<IntakePayload>,
}

/// Request for the stats report (last N days or a custom range).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeStatsRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// Request for one calendar month. `month` is 1-based; both fields accept a
/// number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStatsRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub month: Option<PeriodInput>,
    #[serde(default)]
    pub year: Option<PeriodInput>,
}

/// Intakes ordered oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeSeriesResponse {
    pub intakes: Vec<IntakePayload>,
}

/// Request for a per-day rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotalsRequest {
    pub user_id: UserId,
    /// First local day, `YYYY-MM-DD`. Defaults so the series ends today.
    #[serde(default)]
    pub start_date: Option<String>,
    pub days: u32,
}

/// One day of a rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total_amount: f64,
    pub intake_count: usize,
}

/// Rollup entries ordered by date ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotalsResponse {
    pub totals: Vec<DailyTotal>,
}

/// Driving port for intake report reads.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), hydration_backend::domain::Error> {
/// use hydration_backend::domain::ports::{
///     FixtureIntakeReportQuery, IntakeReportQuery, TodayReportRequest,
/// };
///
/// let query = FixtureIntakeReportQuery;
/// let report = query
///     .today_report(TodayReportRequest {
///         user_id: hydration_backend::domain::UserId::random(),
///         start_date: None,
///         end_date: None,
///     })
///     .await?;
/// assert_eq!(report.total_amount, 0.0);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait IntakeReportQuery: Send + Sync {
    /// Total and intakes for the current local day, or for explicit bounds
    /// when both are supplied. Intakes are ordered most recent first.
    async fn today_report(&self, request: TodayReportRequest)
    -> Result<TodayReportResponse, Error>;

    /// Intakes over the stats window, or over explicit bounds when both are
    /// supplied, ordered oldest first.
    async fn range_stats(&self, request: RangeStatsRequest)
    -> Result<IntakeSeriesResponse, Error>;

    /// Intakes for one calendar month, ordered oldest first.
    async fn monthly_stats(
        &self,
        request: MonthlyStatsRequest,
    ) -> Result<IntakeSeriesResponse, Error>;

    /// Per-day totals for `days` consecutive local days.
    ///
    /// Fails with [`crate::domain::ErrorCode::InvalidRequest`] unless
    /// `1 <= days <= 31`.
    async fn daily_totals(&self, request: DailyTotalsRequest)
    -> Result<DailyTotalsResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIntakeReportQuery;

#[async_trait]
impl IntakeReportQuery for FixtureIntakeReportQuery {
    async fn today_report(
        &self,
        _request: TodayReportRequest,
    ) -> Result<TodayReportResponse, Error> {
        Ok(TodayReportResponse {
            total_amount: 0.0,
            intakes: Vec::new(),
        })
    }

    async fn range_stats(
        &self,
        _request: RangeStatsRequest,
    ) -> Result<IntakeSeriesResponse, Error> {
        Ok(IntakeSeriesResponse {
            intakes: Vec::new(),
        })
    }

    async fn monthly_stats(
        &self,
        _request: MonthlyStatsRequest,
    ) -> Result<IntakeSeriesResponse, Error> {
        Ok(IntakeSeriesResponse {
            intakes: Vec::new(),
        })
    }

    async fn daily_totals(
        &self,
        _request: DailyTotalsRequest,
    ) -> Result<DailyTotalsResponse, Error> {
        Ok(DailyTotalsResponse { totals: Vec::new() })
    }
}
