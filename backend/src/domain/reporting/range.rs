//! Report range resolution.
//!
//! A [`RangeResolver`] maps a [`ReportKind`] plus optional caller parameters
//! onto an inclusive [`ReportRange`]. Missing parameters select a
//! period-specific default. Malformed dates never fail a report; they yield
//! [`ReportRange::Unmatchable`] instead.

use std::fmt;
use std::sync::Arc;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveTime, Offset, SecondsFormat, TimeDelta,
    Utc,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::date_input::{local_to_utc, parse_instant};

/// Look-back window used by stats reports when none is configured.
pub const DEFAULT_STATS_WINDOW_DAYS: u32 = 7;

/// Which default policy a range was resolved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// The current local calendar day.
    Today,
    /// From local midnight N days ago, open-ended.
    LastNDays,
    /// Stats report with caller-supplied bounds.
    Custom,
    /// One calendar month.
    Monthly,
}

impl ReportKind {
    /// Classify a stats request: explicit bounds make it [`Self::Custom`].
    pub fn for_stats(params: &RangeParams) -> Self {
        if params.has_explicit_bounds() {
            Self::Custom
        } else {
            Self::LastNDays
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("today"),
            Self::LastNDays => f.write_str("last_n_days"),
            Self::Custom => f.write_str("custom"),
            Self::Monthly => f.write_str("monthly"),
        }
    }
}

/// Concrete window a report reads. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRange {
    /// `start <= t <= end`.
    Between {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// `start <= t`, no upper bound.
    Since { start: DateTime<Utc> },
    /// Selects nothing; produced from malformed caller dates.
    Unmatchable,
}

impl ReportRange {
    /// Whether `instant` falls inside the range.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use hydration_backend::domain::ReportRange;
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single().expect("start");
    /// let end = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).single().expect("end");
    /// let range = ReportRange::Between { start, end };
    /// assert!(range.contains(end));
    /// assert!(!ReportRange::Unmatchable.contains(start));
    /// ```
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        match *self {
            Self::Between { start, end } => start <= instant && instant <= end,
            Self::Since { start } => start <= instant,
            Self::Unmatchable => false,
        }
    }

    /// Lower bound, if any.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        match *self {
            Self::Between { start, .. } | Self::Since { start } => Some(start),
            Self::Unmatchable => None,
        }
    }

    /// Upper bound, if any.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        match *self {
            Self::Between { end, .. } => Some(end),
            Self::Since { .. } | Self::Unmatchable => None,
        }
    }

    /// Whether the range can never select a record.
    pub fn is_unmatchable(&self) -> bool {
        matches!(self, Self::Unmatchable)
    }
}

impl fmt::Display for ReportRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = |instant: DateTime<Utc>| instant.to_rfc3339_opts(SecondsFormat::Millis, true);
        match *self {
            Self::Between { start, end } => write!(f, "[{}, {}]", format(start), format(end)),
            Self::Since { start } => write!(f, "[{}, ..)", format(start)),
            Self::Unmatchable => f.write_str("unmatchable"),
        }
    }
}

/// Month or year as supplied by a caller: a JSON number or numeric text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodInput {
    Number(f64),
    Text(String),
}

impl PeriodInput {
    /// Whole-number value, or `None` when the input is fractional or not
    /// numeric.
    ///
    /// # Examples
    /// ```
    /// use hydration_backend::domain::PeriodInput;
    ///
    /// assert_eq!(PeriodInput::from(" 2 ").to_component(), Some(2));
    /// assert_eq!(PeriodInput::from(2024).to_component(), Some(2024));
    /// assert_eq!(PeriodInput::from(2.5).to_component(), None);
    /// ```
    pub fn to_component(&self) -> Option<i64> {
        match self {
            Self::Number(value) if value.is_finite() && value.fract() == 0.0 => Some(*value as i64),
            Self::Number(_) => None,
            Self::Text(raw) => raw.trim().parse::<i64>().ok(),
        }
    }
}

impl From<f64> for PeriodInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PeriodInput {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for PeriodInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PeriodInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Optional caller parameters feeding the resolver.
///
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub month: Option<PeriodInput>,
    pub year: Option<PeriodInput>,
}

impl RangeParams {
    /// Parameters carrying optional explicit bounds.
    pub fn between(start_date: Option<String>, end_date: Option<String>) -> Self {
        Self {
            start_date,
            end_date,
            ..Self::default()
        }
    }

    /// Parameters carrying an optional month and year.
    pub fn month_of(month: Option<PeriodInput>, year: Option<PeriodInput>) -> Self {
        Self {
            month,
            year,
            ..Self::default()
        }
    }

    /// Both bounds present and non-empty.
    pub fn has_explicit_bounds(&self) -> bool {
        self.explicit_bounds().is_some()
    }

    fn explicit_bounds(&self) -> Option<(&str, &str)> {
        let start = non_empty(self.start_date.as_deref())?;
        let end = non_empty(self.end_date.as_deref())?;
        Some((start, end))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.is_empty())
}

/// Errors raised by [`ReportingPolicy::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportingPolicyError {
    #[error("stats window must cover at least one day")]
    EmptyStatsWindow,
}

/// Engine-wide reporting knobs.
///
/// ## Invariants
/// - `stats_window_days >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingPolicy {
    offset: FixedOffset,
    stats_window_days: u32,
}

impl ReportingPolicy {
    /// Validate and build a policy.
    pub fn new(offset: FixedOffset, stats_window_days: u32) -> Result<Self, ReportingPolicyError> {
        if stats_window_days == 0 {
            return Err(ReportingPolicyError::EmptyStatsWindow);
        }
        Ok(Self {
            offset,
            stats_window_days,
        })
    }

    /// Offset that defines "local" calendar days.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// N for [`ReportKind::LastNDays`].
    pub fn stats_window_days(&self) -> u32 {
        self.stats_window_days
    }
}

impl Default for ReportingPolicy {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
            stats_window_days: DEFAULT_STATS_WINDOW_DAYS,
        }
    }
}

/// Resolves report ranges against an injected clock.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use hydration_backend::domain::{
///     RangeParams, RangeResolver, ReportKind, ReportRange, ReportingPolicy,
/// };
/// use mockable::DefaultClock;
///
/// let resolver = RangeResolver::new(Arc::new(DefaultClock), ReportingPolicy::default());
/// let range = resolver.resolve(ReportKind::LastNDays, &RangeParams::default());
/// assert!(matches!(range, ReportRange::Since { .. }));
/// ```
#[derive(Clone)]
pub struct RangeResolver {
    clock: Arc<dyn Clock>,
    policy: ReportingPolicy,
}

impl RangeResolver {
    /// Build a resolver for `policy`.
    pub fn new(clock: Arc<dyn Clock>, policy: ReportingPolicy) -> Self {
        Self { clock, policy }
    }

    /// Policy in force.
    pub fn policy(&self) -> ReportingPolicy {
        self.policy
    }

    /// Current local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.clock.utc().with_timezone(&self.policy.offset).date_naive()
    }

    /// Resolve the range for `kind`.
    pub fn resolve(&self, kind: ReportKind, params: &RangeParams) -> ReportRange {
        match kind {
            ReportKind::Today => self
                .explicit_range(params)
                .unwrap_or_else(|| self.resolve_day(self.today())),
            ReportKind::LastNDays | ReportKind::Custom => self
                .explicit_range(params)
                .unwrap_or_else(|| self.last_n_days()),
            ReportKind::Monthly => self.monthly_range(params),
        }
    }

    /// Local midnight through 23:59:59.999 of `date`.
    pub fn resolve_day(&self, date: NaiveDate) -> ReportRange {
        let Some(next) = date.checked_add_days(Days::new(1)) else {
            return ReportRange::Unmatchable;
        };
        self.local_span(date, next)
    }

    fn explicit_range(&self, params: &RangeParams) -> Option<ReportRange> {
        let (raw_start, raw_end) = params.explicit_bounds()?;
        let parsed = (
            parse_instant(raw_start, self.policy.offset),
            parse_instant(raw_end, self.policy.offset),
        );
        Some(match parsed {
            (Some(start), Some(end)) => ReportRange::Between { start, end },
            _ => ReportRange::Unmatchable,
        })
    }

    fn last_n_days(&self) -> ReportRange {
        self.today()
            .checked_sub_days(Days::new(u64::from(self.policy.stats_window_days)))
            .and_then(|first| self.local_midnight(first))
            .map_or(ReportRange::Unmatchable, |start| ReportRange::Since { start })
    }

    fn monthly_range(&self, params: &RangeParams) -> ReportRange {
        let today = self.today();
        let current_year = i64::from(today.year());
        let current_month = i64::from(today.month());
        let year = parse_component(params.year.as_ref()).unwrap_or(current_year);
        let month = parse_component(params.month.as_ref()).unwrap_or(current_month);

        month_bounds(year, month)
            .or_else(|| month_bounds(current_year, current_month))
            .map_or(ReportRange::Unmatchable, |(first, next)| {
                self.local_span(first, next)
            })
    }

    /// Local midnight of `first` through one millisecond before local
    /// midnight of `next`.
    fn local_span(&self, first: NaiveDate, next: NaiveDate) -> ReportRange {
        let start = self.local_midnight(first);
        let end = self
            .local_midnight(next)
            .and_then(|instant| instant.checked_sub_signed(TimeDelta::milliseconds(1)));
        match (start, end) {
            (Some(start), Some(end)) => ReportRange::Between { start, end },
            _ => ReportRange::Unmatchable,
        }
    }

    fn local_midnight(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        local_to_utc(date.and_time(NaiveTime::MIN), self.policy.offset)
    }
}

impl fmt::Debug for RangeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeResolver")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

fn parse_component(raw: Option<&PeriodInput>) -> Option<i64> {
    raw.and_then(PeriodInput::to_component)
}

/// First day of the 1-based `month` in `year` and of the month after it.
///
/// Months outside 1..=12 roll into adjacent years.
fn month_bounds(year: i64, month: i64) -> Option<(NaiveDate, NaiveDate)> {
    let index = year.checked_mul(12)?.checked_add(month.checked_sub(1)?)?;
    let first = first_of_month(index)?;
    let next = first_of_month(index.checked_add(1)?)?;
    Some((first, next))
}

fn first_of_month(index: i64) -> Option<NaiveDate> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12) + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
