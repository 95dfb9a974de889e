//! Port for intake event persistence and range reads.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{IntakeEvent, ReportRange, SortOrder, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by intake repository adapters.
    pub enum IntakeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "intake repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "intake repository query failed: {message}",
    }
}

/// Port for storing intake events and reading them back by range.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntakeRepository: Send + Sync {
    /// Persist a new intake event and return the stored record.
    async fn insert(&self, intake: &IntakeEvent) -> Result<IntakeEvent, IntakeRepositoryError>;

    /// Read a user's intakes whose timestamp lies inside `range`, ordered by
    /// timestamp in `order`.
    async fn find_in_range(
        &self,
        user_id: &UserId,
        range: &ReportRange,
        order: SortOrder,
    ) -> Result<Vec<IntakeEvent>, IntakeRepositoryError>;

    /// Find an intake by id regardless of owner.
    async fn find_by_id(&self, intake_id: &Uuid)
    -> Result<Option<IntakeEvent>, IntakeRepositoryError>;

    /// Hard-delete an intake. Returns `false` when nothing was removed.
    async fn delete_by_id(&self, intake_id: &Uuid) -> Result<bool, IntakeRepositoryError>;
}

/// Fixture implementation for tests that do not exercise intake persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIntakeRepository;

#[async_trait]
impl IntakeRepository for FixtureIntakeRepository {
    async fn insert(&self, intake: &IntakeEvent) -> Result<IntakeEvent, IntakeRepositoryError> {
        Ok(intake.clone())
    }

    async fn find_in_range(
        &self,
        _user_id: &UserId,
        _range: &ReportRange,
        _order: SortOrder,
    ) -> Result<Vec<IntakeEvent>, IntakeRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _intake_id: &Uuid,
    ) -> Result<Option<IntakeEvent>, IntakeRepositoryError> {
        Ok(None)
    }

    async fn delete_by_id(&self, _intake_id: &Uuid) -> Result<bool, IntakeRepositoryError> {
        Ok(false)
    }
}
