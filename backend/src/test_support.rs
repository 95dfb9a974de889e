//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled for tests or with the
//! `test-support` feature.

use chrono::{DateTime, FixedOffset, Local, Utc};
use mockable::Clock;
use uuid::Uuid;

use crate::domain::{ContainerType, IntakeAmount, IntakeEvent, IntakeEventDraft, UserId};

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    /// Pin the clock to `utc_now`.
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }

    /// Pin the clock to an RFC 3339 instant.
    ///
    /// # Panics
    /// Panics when `raw` is not valid RFC 3339.
    pub fn at_rfc3339(raw: &str) -> Self {
        Self::at(instant(raw))
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Parse an RFC 3339 fixture instant.
///
/// # Panics
/// Panics when `raw` is not valid RFC 3339.
pub fn instant(raw: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => parsed.with_timezone(&Utc),
        Err(error) => panic!("fixture instant {raw:?} must be RFC 3339: {error}"),
    }
}

/// Fixed offset `minutes` east of UTC.
///
/// # Panics
/// Panics when the offset is a day or more.
pub fn offset_minutes(minutes: i32) -> FixedOffset {
    match FixedOffset::east_opt(minutes * 60) {
        Some(offset) => offset,
        None => panic!("fixture offset {minutes} minutes is out of range"),
    }
}

/// Build an intake owned by `user_id` at the RFC 3339 instant `at`.
///
/// # Panics
/// Panics when `amount` is not positive or `at` is not RFC 3339.
pub fn sample_intake(user_id: &UserId, amount: f64, at: &str) -> IntakeEvent {
    let amount = match IntakeAmount::new(amount) {
        Ok(amount) => amount,
        Err(error) => panic!("fixture amount must be valid: {error}"),
    };
    IntakeEvent::new(IntakeEventDraft {
        id: Uuid::new_v4(),
        user_id: user_id.clone(),
        amount,
        container_type: ContainerType::default(),
        timestamp: instant(at),
    })
}
