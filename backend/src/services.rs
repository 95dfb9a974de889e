//! Wiring for the intake driving ports.
//!
//! Hosts hold an [`IntakeServices`] bundle and dispatch requests through its
//! trait objects, staying agnostic of which repository backs them.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::domain::ports::{
    FixtureIntakeCommand, FixtureIntakeReportQuery, IntakeCommand, IntakeReportQuery,
    IntakeRepository,
};
use crate::domain::{IntakeCommandService, IntakeReportService, ReportingPolicy};
use crate::outbound::memory::InMemoryIntakeRepository;

/// Command and report ports sharing one repository, clock, and policy.
#[derive(Clone)]
pub struct IntakeServices {
    pub commands: Arc<dyn IntakeCommand>,
    pub reports: Arc<dyn IntakeReportQuery>,
}

impl IntakeServices {
    /// Build both services over `repo`.
    pub fn new<R>(repo: Arc<R>, clock: Arc<dyn Clock>, policy: ReportingPolicy) -> Self
    where
        R: IntakeRepository + 'static,
    {
        let commands: Arc<dyn IntakeCommand> = Arc::new(IntakeCommandService::new(
            Arc::clone(&repo),
            Arc::clone(&clock),
            policy,
        ));
        let reports: Arc<dyn IntakeReportQuery> =
            Arc::new(IntakeReportService::new(repo, clock, policy));
        Self { commands, reports }
    }

    /// Build services over a fresh in-memory repository and the system clock.
    ///
    /// # Examples
    /// ```
    /// use hydration_backend::domain::ReportingPolicy;
    /// use hydration_backend::services::IntakeServices;
    ///
    /// let services = IntakeServices::in_memory(ReportingPolicy::default());
    /// # let _ = services;
    /// ```
    pub fn in_memory(policy: ReportingPolicy) -> Self {
        Self::new(
            Arc::new(InMemoryIntakeRepository::new()),
            Arc::new(DefaultClock),
            policy,
        )
    }

    /// Fixture ports that persist nothing.
    pub fn fixtures() -> Self {
        Self {
            commands: Arc::new(FixtureIntakeCommand),
            reports: Arc::new(FixtureIntakeReportQuery),
        }
    }
}
