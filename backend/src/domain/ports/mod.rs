//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod intake_command;
mod intake_report_query;
mod intake_repository;

pub use intake_command::{
    DeleteIntakeRequest, DeleteIntakeResponse, FixtureIntakeCommand, IntakeCommand, IntakePayload,
    RecordIntakeRequest, RecordIntakeResponse,
};
pub use intake_report_query::{
    DailyTotal, DailyTotalsRequest, DailyTotalsResponse, FixtureIntakeReportQuery,
    IntakeReportQuery, IntakeSeriesResponse, MonthlyStatsRequest, RangeStatsRequest,
    TodayReportRequest, TodayReportResponse,
};
#[cfg(test)]
pub use intake_repository::MockIntakeRepository;
pub use intake_repository::{FixtureIntakeRepository, IntakeRepository, IntakeRepositoryError};
