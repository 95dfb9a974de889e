//! Domain primitives, reporting policy, and services.
//!
//! Purpose: model intake events and the rules that turn them into reports,
//! independent of any transport or storage technology. Driven dependencies are
//! reached only through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - UserId: authenticated user identity.
//! - IntakeEvent and its value types: the recorded unit of consumption.
//! - RangeResolver, ReportRange, and the aggregation helpers.
//! - IntakeCommandService / IntakeReportService: driving-port implementations.

pub mod error;
mod intake;
mod intake_service;
pub mod ports;
mod reporting;
mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::intake::{
    AmountInput, ContainerType, DEFAULT_CONTAINER_TYPE, IntakeAmount, IntakeEvent,
    IntakeEventDraft, IntakeValidationError,
};
pub use self::intake_service::{IntakeCommandService, IntakeReportService, MAX_DAILY_TOTALS_DAYS};
pub use self::reporting::{
    DEFAULT_STATS_WINDOW_DAYS, IntakeSummary, OwnershipError, PeriodInput, RangeParams,
    RangeResolver, ReportKind, ReportRange, ReportingPolicy, ReportingPolicyError, SortOrder,
    authorize_delete, sort_intakes, sorted_series, summarize, total_amount,
};
pub use self::user::{UserId, UserValidationError};

/// Convenient domain result alias.
///
/// # Examples
/// ```
/// use hydration_backend::domain::{DomainResult, Error};
///
/// fn guard() -> DomainResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(guard().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
