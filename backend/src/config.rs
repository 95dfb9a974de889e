//! Reporting configuration loaded via OrthoConfig.
//!
//! Settings are layered from defaults, an optional configuration file,
//! `INTAKE_REPORT_*` environment variables, and command-line style arguments,
//! then converted into the domain's [`ReportingPolicy`]. The domain itself
//! never reads configuration.

use chrono::FixedOffset;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{DEFAULT_STATS_WINDOW_DAYS, ReportingPolicy, ReportingPolicyError};

/// Errors raised while turning settings into a [`ReportingPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The offset is a full day or more from UTC.
    #[error("utc offset of {minutes} minutes must lie strictly within 24 hours")]
    UtcOffsetOutOfRange { minutes: i32 },
    /// The stats window is empty.
    #[error("invalid stats window: {0}")]
    StatsWindow(#[from] ReportingPolicyError),
}

/// Configuration values controlling report resolution.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INTAKE_REPORT")]
pub struct ReportSettings {
    /// Minutes east of UTC that define local calendar days.
    pub utc_offset_minutes: Option<i32>,
    /// Days covered by a stats report without explicit bounds.
    pub stats_window_days: Option<u32>,
}

impl ReportSettings {
    /// Return the configured offset, falling back to UTC.
    pub fn utc_offset_minutes(&self) -> i32 {
        self.utc_offset_minutes.unwrap_or(0)
    }

    /// Return the configured stats window, falling back to a week.
    pub fn stats_window_days(&self) -> u32 {
        self.stats_window_days.unwrap_or(DEFAULT_STATS_WINDOW_DAYS)
    }

    /// Validate the settings and build the domain policy.
    ///
    /// # Examples
    /// ```
    /// use hydration_backend::config::ReportSettings;
    ///
    /// let settings = ReportSettings {
    ///     utc_offset_minutes: Some(-300),
    ///     stats_window_days: None,
    /// };
    /// let policy = settings.to_policy().expect("valid settings");
    /// assert_eq!(policy.offset().local_minus_utc(), -300 * 60);
    /// assert_eq!(policy.stats_window_days(), 7);
    /// ```
    pub fn to_policy(&self) -> Result<ReportingPolicy, SettingsError> {
        let minutes = self.utc_offset_minutes();
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(SettingsError::UtcOffsetOutOfRange { minutes })?;
        Ok(ReportingPolicy::new(offset, self.stats_window_days())?)
    }
}
