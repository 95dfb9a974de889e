//! Report computation: range resolution, aggregation, and delete guarding.
//!
//! Control flow for every report is the same: the [`RangeResolver`] turns
//! optional caller parameters into a concrete [`ReportRange`], the driven
//! repository fetches the matching events, and the aggregation helpers sum
//! or order them. Everything here is synchronous and pure apart from reading
//! the injected clock.

mod aggregate;
mod date_input;
mod ownership;
mod range;

pub use aggregate::{IntakeSummary, SortOrder, sort_intakes, sorted_series, summarize, total_amount};
pub(crate) use date_input::{parse_date, parse_instant};
pub use ownership::{OwnershipError, authorize_delete};
pub use range::{
    DEFAULT_STATS_WINDOW_DAYS, PeriodInput, RangeParams, RangeResolver, ReportKind, ReportRange,
    ReportingPolicy, ReportingPolicyError,
};
