//! Regression coverage for range resolution.

use std::sync::Arc;

use chrono::NaiveDate;
use mockable::Clock;
use rstest::{fixture, rstest};

use super::*;
use crate::test_support::{FixtureClock, instant, offset_minutes};

const NOW: &str = "2024-03-10T15:00:00Z";

fn resolver_at(now: &str, policy: ReportingPolicy) -> RangeResolver {
    let clock: Arc<dyn Clock> = Arc::new(FixtureClock::at_rfc3339(now));
    RangeResolver::new(clock, policy)
}

#[fixture]
fn resolver() -> RangeResolver {
    resolver_at(NOW, ReportingPolicy::default())
}

fn between(start: &str, end: &str) -> ReportRange {
    ReportRange::Between {
        start: instant(start),
        end: instant(end),
    }
}

fn explicit(start: &str, end: &str) -> RangeParams {
    RangeParams::between(Some(start.to_owned()), Some(end.to_owned()))
}

fn month(month: Option<&str>, year: Option<&str>) -> RangeParams {
    RangeParams::month_of(month.map(PeriodInput::from), year.map(PeriodInput::from))
}

#[rstest]
fn today_defaults_to_current_local_day(resolver: RangeResolver) {
    let range = resolver.resolve(ReportKind::Today, &RangeParams::default());
    assert_eq!(
        range,
        between("2024-03-10T00:00:00Z", "2024-03-10T23:59:59.999Z")
    );
}

#[rstest]
fn today_follows_configured_offset() {
    let policy = ReportingPolicy::new(offset_minutes(120), 7).expect("valid policy");
    let resolver = resolver_at("2024-03-10T23:30:00Z", policy);

    let range = resolver.resolve(ReportKind::Today, &RangeParams::default());

    assert_eq!(resolver.today(), NaiveDate::from_ymd_opt(2024, 3, 11).expect("date"));
    assert_eq!(
        range,
        between("2024-03-10T22:00:00Z", "2024-03-11T21:59:59.999Z")
    );
}

#[rstest]
fn today_uses_explicit_bounds_verbatim(resolver: RangeResolver) {
    let range = resolver.resolve(
        ReportKind::Today,
        &explicit("2024-03-01T10:15:00Z", "2024-03-02T08:00:00Z"),
    );
    assert_eq!(range, between("2024-03-01T10:15:00Z", "2024-03-02T08:00:00Z"));
}

#[rstest]
#[case(RangeParams::between(Some("2024-03-01T00:00:00Z".to_owned()), None))]
#[case(RangeParams::between(None, Some("2024-03-01T00:00:00Z".to_owned())))]
#[case(RangeParams::between(Some(String::new()), Some("2024-03-01T00:00:00Z".to_owned())))]
fn today_ignores_partial_bounds(resolver: RangeResolver, #[case] params: RangeParams) {
    let range = resolver.resolve(ReportKind::Today, &params);
    assert_eq!(
        range,
        between("2024-03-10T00:00:00Z", "2024-03-10T23:59:59.999Z")
    );
}

#[rstest]
#[case(ReportKind::Today)]
#[case(ReportKind::LastNDays)]
#[case(ReportKind::Custom)]
fn malformed_bounds_are_unmatchable(resolver: RangeResolver, #[case] kind: ReportKind) {
    let range = resolver.resolve(kind, &explicit("not-a-date", "2024-03-02T00:00:00Z"));
    assert_eq!(range, ReportRange::Unmatchable);
    assert!(!range.contains(instant(NOW)));
}

#[rstest]
fn last_n_days_defaults_to_open_window(resolver: RangeResolver) {
    let range = resolver.resolve(ReportKind::LastNDays, &RangeParams::default());
    assert_eq!(
        range,
        ReportRange::Since {
            start: instant("2024-03-03T00:00:00Z")
        }
    );
    assert_eq!(range.end(), None);
}

#[rstest]
fn last_n_days_honours_configured_window() {
    let policy = ReportingPolicy::new(offset_minutes(0), 30).expect("valid policy");
    let resolver = resolver_at(NOW, policy);

    let range = resolver.resolve(ReportKind::LastNDays, &RangeParams::default());

    assert_eq!(range.start(), Some(instant("2024-02-09T00:00:00Z")));
}

#[rstest]
fn custom_uses_explicit_bounds_without_snapping(resolver: RangeResolver) {
    let range = resolver.resolve(
        ReportKind::Custom,
        &explicit("2024-03-01T10:00:00Z", "2024-03-05T12:00:00Z"),
    );
    assert_eq!(range, between("2024-03-01T10:00:00Z", "2024-03-05T12:00:00Z"));
}

#[rstest]
fn monthly_covers_leap_february(resolver: RangeResolver) {
    let range = resolver.resolve(ReportKind::Monthly, &month(Some("2"), Some("2024")));

    assert_eq!(
        range,
        between("2024-02-01T00:00:00Z", "2024-02-29T23:59:59.999Z")
    );
    assert!(range.contains(instant("2024-02-29T23:59:59.999Z")));
    assert!(!range.contains(instant("2024-03-01T00:00:00Z")));
}

#[rstest]
#[case(Some("13"), Some("2024"), "2025-01-01T00:00:00Z", "2025-01-31T23:59:59.999Z")]
#[case(Some("0"), Some("2024"), "2023-12-01T00:00:00Z", "2023-12-31T23:59:59.999Z")]
#[case(Some("-1"), Some("2024"), "2023-11-01T00:00:00Z", "2023-11-30T23:59:59.999Z")]
fn monthly_rolls_over_out_of_range_months(
    resolver: RangeResolver,
    #[case] month_raw: Option<&str>,
    #[case] year_raw: Option<&str>,
    #[case] start: &str,
    #[case] end: &str,
) {
    let range = resolver.resolve(ReportKind::Monthly, &month(month_raw, year_raw));
    assert_eq!(range, between(start, end));
}

#[rstest]
#[case(None, None)]
#[case(Some("march"), None)]
#[case(Some(""), Some("twenty"))]
#[case(Some("3"), Some("999999999999"))]
fn monthly_falls_back_to_current_month(
    resolver: RangeResolver,
    #[case] month_raw: Option<&str>,
    #[case] year_raw: Option<&str>,
) {
    let range = resolver.resolve(ReportKind::Monthly, &month(month_raw, year_raw));
    assert_eq!(
        range,
        between("2024-03-01T00:00:00Z", "2024-03-31T23:59:59.999Z")
    );
}

#[rstest]
fn monthly_accepts_numeric_components(resolver: RangeResolver) {
    let params = RangeParams::month_of(Some(PeriodInput::from(2)), Some(PeriodInput::from(2024)));
    assert_eq!(
        resolver.resolve(ReportKind::Monthly, &params),
        between("2024-02-01T00:00:00Z", "2024-02-29T23:59:59.999Z")
    );
}

#[rstest]
fn monthly_treats_fractional_numbers_as_absent(resolver: RangeResolver) {
    let params =
        RangeParams::month_of(Some(PeriodInput::from(2.5)), Some(PeriodInput::from(f64::NAN)));
    assert_eq!(
        resolver.resolve(ReportKind::Monthly, &params),
        between("2024-03-01T00:00:00Z", "2024-03-31T23:59:59.999Z")
    );
}

#[rstest]
fn monthly_falls_back_per_component(resolver: RangeResolver) {
    let range = resolver.resolve(ReportKind::Monthly, &month(Some("7"), Some("soon")));
    assert_eq!(
        range,
        between("2024-07-01T00:00:00Z", "2024-07-31T23:59:59.999Z")
    );
}

#[rstest]
fn monthly_ignores_explicit_bounds(resolver: RangeResolver) {
    let params = RangeParams {
        start_date: Some("2020-01-01".to_owned()),
        end_date: Some("2020-01-02".to_owned()),
        month: Some("1".to_owned().into()),
        year: Some("2024".to_owned().into()),
    };
    let range = resolver.resolve(ReportKind::Monthly, &params);
    assert_eq!(range.start(), Some(instant("2024-01-01T00:00:00Z")));
}

#[rstest]
fn resolve_day_spans_one_local_day() {
    let policy = ReportingPolicy::new(offset_minutes(-300), 7).expect("valid policy");
    let resolver = resolver_at(NOW, policy);
    let date = NaiveDate::from_ymd_opt(2024, 1, 15).expect("date");

    assert_eq!(
        resolver.resolve_day(date),
        between("2024-01-15T05:00:00Z", "2024-01-16T04:59:59.999Z")
    );
}

#[rstest]
#[case(ReportKind::Today, RangeParams::default())]
#[case(ReportKind::LastNDays, RangeParams::default())]
#[case(ReportKind::Custom, explicit("2024-03-01", "2024-03-02"))]
#[case(ReportKind::Monthly, month(Some("2"), Some("2024")))]
fn resolution_is_idempotent(
    resolver: RangeResolver,
    #[case] kind: ReportKind,
    #[case] params: RangeParams,
) {
    assert_eq!(resolver.resolve(kind, &params), resolver.resolve(kind, &params));
}

#[rstest]
fn stats_classification_depends_on_bounds() {
    assert_eq!(
        ReportKind::for_stats(&RangeParams::default()),
        ReportKind::LastNDays
    );
    assert_eq!(
        ReportKind::for_stats(&explicit("2024-03-01", "2024-03-02")),
        ReportKind::Custom
    );
}

#[rstest]
fn policy_rejects_empty_window() {
    assert_eq!(
        ReportingPolicy::new(offset_minutes(0), 0),
        Err(ReportingPolicyError::EmptyStatsWindow)
    );
    assert_eq!(
        ReportingPolicyError::EmptyStatsWindow.to_string(),
        "stats window must cover at least one day"
    );
    let source: &dyn std::error::Error = &ReportingPolicyError::EmptyStatsWindow;
    assert!(source.source().is_none());
}

#[rstest]
fn range_display_is_readable() {
    let range = between("2024-02-01T00:00:00Z", "2024-02-29T23:59:59.999Z");
    assert_eq!(
        range.to_string(),
        "[2024-02-01T00:00:00.000Z, 2024-02-29T23:59:59.999Z]"
    );
    assert_eq!(ReportRange::Unmatchable.to_string(), "unmatchable");
}
