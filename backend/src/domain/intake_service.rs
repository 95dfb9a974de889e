//! Intake domain services.
//!
//! These services implement the intake driving ports: recording and deleting
//! events, and resolving, fetching, and aggregating reports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Days;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{
    DailyTotal, DailyTotalsRequest, DailyTotalsResponse, DeleteIntakeRequest,
    DeleteIntakeResponse, IntakeCommand, IntakeReportQuery, IntakeRepository,
    IntakeRepositoryError, IntakeSeriesResponse, MonthlyStatsRequest, RangeStatsRequest,
    RecordIntakeRequest, RecordIntakeResponse, TodayReportRequest, TodayReportResponse,
};
use crate::domain::reporting::{parse_date, parse_instant};
use crate::domain::{
    ContainerType, Error, IntakeEvent, IntakeEventDraft, IntakeValidationError, OwnershipError,
    RangeParams, RangeResolver, ReportKind, ReportRange, ReportingPolicy, SortOrder, UserId,
    authorize_delete, sorted_series, summarize, total_amount,
};

/// Largest rollup served by [`IntakeReportQuery::daily_totals`].
pub const MAX_DAILY_TOTALS_DAYS: u32 = 31;

fn map_repository_error(error: IntakeRepositoryError) -> Error {
    warn!(%error, "intake repository call failed");
    match error {
        IntakeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("intake repository unavailable: {message}"))
        }
        IntakeRepositoryError::Query { message } => {
            Error::internal(format!("intake repository error: {message}"))
        }
    }
}

fn map_validation_error(error: &IntakeValidationError) -> Error {
    Error::invalid_request(format!("invalid intake: {error}")).with_details(json!({
        "field": error.field(),
        "code": error.code(),
    }))
}

fn map_ownership_error(error: OwnershipError) -> Error {
    match error {
        OwnershipError::NotFound { .. } => Error::not_found(error.to_string()),
        OwnershipError::Forbidden { .. } => Error::forbidden(error.to_string()),
    }
}

/// Intake service implementing the command driving port.
#[derive(Clone)]
pub struct IntakeCommandService<R> {
    intake_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    policy: ReportingPolicy,
}

impl<R> IntakeCommandService<R> {
    /// Create a command service.
    ///
    /// `policy` supplies the offset used to read naive caller timestamps.
    pub fn new(intake_repo: Arc<R>, clock: Arc<dyn Clock>, policy: ReportingPolicy) -> Self {
        Self {
            intake_repo,
            clock,
            policy,
        }
    }

    fn build_intake(&self, request: RecordIntakeRequest) -> Result<IntakeEvent, Error> {
        let RecordIntakeRequest {
            user_id,
            amount,
            container_type,
            timestamp,
        } = request;

        let amount = amount
            .ok_or(IntakeValidationError::MissingAmount)
            .and_then(|input| input.to_amount())
            .map_err(|err| map_validation_error(&err))?;

        let timestamp = match timestamp.filter(|raw| !raw.is_empty()) {
            Some(raw) => parse_instant(&raw, self.policy.offset()).ok_or_else(|| {
                map_validation_error(&IntakeValidationError::InvalidTimestamp { value: raw })
            })?,
            None => self.clock.utc(),
        };

        Ok(IntakeEvent::new(IntakeEventDraft {
            id: Uuid::new_v4(),
            user_id,
            amount,
            container_type: ContainerType::from_input(container_type),
            timestamp,
        }))
    }
}

#[async_trait]
impl<R> IntakeCommand for IntakeCommandService<R>
where
    R: IntakeRepository,
{
    async fn record_intake(
        &self,
        request: RecordIntakeRequest,
    ) -> Result<RecordIntakeResponse, Error> {
        let intake = self.build_intake(request)?;

        let stored = self
            .intake_repo
            .insert(&intake)
            .await
            .map_err(map_repository_error)?;

        debug!(
            user_id = %stored.user_id(),
            intake_id = %stored.id(),
            amount = stored.amount().value(),
            "intake recorded"
        );
        Ok(RecordIntakeResponse {
            intake: stored.into(),
        })
    }

    async fn delete_intake(
        &self,
        request: DeleteIntakeRequest,
    ) -> Result<DeleteIntakeResponse, Error> {
        let DeleteIntakeRequest { user_id, intake_id } = request;

        let existing = self
            .intake_repo
            .find_by_id(&intake_id)
            .await
            .map_err(map_repository_error)?;

        let intake_id = authorize_delete(existing.as_ref(), intake_id, &user_id).map_err(|err| {
            if matches!(err, OwnershipError::Forbidden { .. }) {
                warn!(user_id = %user_id, %err, "intake delete refused");
            }
            map_ownership_error(err)
        })?;

        // The record may vanish between the lookup and the delete.
        let removed = self
            .intake_repo
            .delete_by_id(&intake_id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(map_ownership_error(OwnershipError::NotFound { intake_id }));
        }

        debug!(user_id = %user_id, intake_id = %intake_id, "intake deleted");
        Ok(DeleteIntakeResponse { id: intake_id })
    }
}

/// Intake service implementing the report driving port.
#[derive(Clone)]
pub struct IntakeReportService<R> {
    intake_repo: Arc<R>,
    resolver: RangeResolver,
}

impl<R> IntakeReportService<R> {
    /// Create a report service resolving ranges against `clock`.
    pub fn new(intake_repo: Arc<R>, clock: Arc<dyn Clock>, policy: ReportingPolicy) -> Self {
        Self {
            intake_repo,
            resolver: RangeResolver::new(clock, policy),
        }
    }
}

impl<R> IntakeReportService<R>
where
    R: IntakeRepository,
{
    async fn fetch(
        &self,
        user_id: &UserId,
        range: &ReportRange,
        order: SortOrder,
    ) -> Result<Vec<IntakeEvent>, Error> {
        if range.is_unmatchable() {
            return Ok(Vec::new());
        }
        self.intake_repo
            .find_in_range(user_id, range, order)
            .await
            .map_err(map_repository_error)
    }

    async fn series(
        &self,
        user_id: &UserId,
        kind: ReportKind,
        params: &RangeParams,
    ) -> Result<IntakeSeriesResponse, Error> {
        let range = self.resolver.resolve(kind, params);
        let intakes = sorted_series(self.fetch(user_id, &range, SortOrder::Ascending).await?);

        debug!(
            user_id = %user_id,
            kind = %kind,
            range = %range,
            count = intakes.len(),
            "intake series resolved"
        );
        Ok(IntakeSeriesResponse {
            intakes: intakes.into_iter().map(Into::into).collect(),
        })
    }
}

#[async_trait]
impl<R> IntakeReportQuery for IntakeReportService<R>
where
    R: IntakeRepository,
{
    async fn today_report(
        &self,
        request: TodayReportRequest,
    ) -> Result<TodayReportResponse, Error> {
        let TodayReportRequest {
            user_id,
            start_date,
            end_date,
        } = request;
        let kind = ReportKind::Today;
        let range = self
            .resolver
            .resolve(kind, &RangeParams::between(start_date, end_date));

        let intakes = self.fetch(&user_id, &range, SortOrder::Descending).await?;
        let summary = summarize(intakes, SortOrder::Descending);

        debug!(
            user_id = %user_id,
            kind = %kind,
            range = %range,
            count = summary.intakes.len(),
            total_amount = summary.total_amount,
            "today report resolved"
        );
        Ok(TodayReportResponse {
            total_amount: summary.total_amount,
            intakes: summary.intakes.into_iter().map(Into::into).collect(),
        })
    }

    async fn range_stats(
        &self,
        request: RangeStatsRequest,
    ) -> Result<IntakeSeriesResponse, Error> {
        let params = RangeParams::between(request.start_date, request.end_date);
        let kind = ReportKind::for_stats(&params);
        self.series(&request.user_id, kind, &params).await
    }

    async fn monthly_stats(
        &self,
        request: MonthlyStatsRequest,
    ) -> Result<IntakeSeriesResponse, Error> {
        let params = RangeParams::month_of(request.month, request.year);
        self.series(&request.user_id, ReportKind::Monthly, &params)
            .await
    }

    async fn daily_totals(
        &self,
        request: DailyTotalsRequest,
    ) -> Result<DailyTotalsResponse, Error> {
        let DailyTotalsRequest {
            user_id,
            start_date,
            days,
        } = request;
        if !(1..=MAX_DAILY_TOTALS_DAYS).contains(&days) {
            return Err(Error::invalid_request(format!(
                "days must be between 1 and {MAX_DAILY_TOTALS_DAYS}"
            ))
            .with_details(json!({ "field": "days", "code": "out_of_range" })));
        }

        let today = self.resolver.today();
        let first = start_date
            .as_deref()
            .and_then(parse_date)
            .or_else(|| today.checked_sub_days(Days::new(u64::from(days - 1))))
            .unwrap_or(today);

        let mut totals = Vec::new();
        for offset in 0..days {
            let Some(date) = first.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            let range = self.resolver.resolve_day(date);
            let intakes = self.fetch(&user_id, &range, SortOrder::Ascending).await?;
            totals.push(DailyTotal {
                date,
                total_amount: total_amount(&intakes),
                intake_count: intakes.len(),
            });
        }

        debug!(
            user_id = %user_id,
            kind = %ReportKind::Today,
            first = %first,
            days,
            "daily totals resolved"
        );
        Ok(DailyTotalsResponse { totals })
    }
}

#[cfg(test)]
#[path = "intake_service_tests.rs"]
mod tests;
