//! In-process intake repository.
//!
//! Backs tests and single-process deployments with a `HashMap` behind a
//! mutex. It honours the same contract a database adapter would: range reads
//! are scoped to one user, inclusive on both bounds, and ordered by timestamp.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{IntakeRepository, IntakeRepositoryError};
use crate::domain::{IntakeEvent, ReportRange, SortOrder, UserId, sort_intakes};

/// Intake repository holding every event in memory.
#[derive(Debug, Default)]
pub struct InMemoryIntakeRepository {
    store: Mutex<HashMap<Uuid, IntakeEvent>>,
}

impl InMemoryIntakeRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored intakes across all users.
    pub fn len(&self) -> Result<usize, IntakeRepositoryError> {
        Ok(self.lock()?.len())
    }

    /// Whether the repository holds no intakes.
    pub fn is_empty(&self) -> Result<bool, IntakeRepositoryError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, IntakeEvent>>, IntakeRepositoryError> {
        self.store
            .lock()
            .map_err(|_| IntakeRepositoryError::connection("intake store lock poisoned"))
    }
}

#[async_trait]
impl IntakeRepository for InMemoryIntakeRepository {
    async fn insert(&self, intake: &IntakeEvent) -> Result<IntakeEvent, IntakeRepositoryError> {
        let mut store = self.lock()?;
        if store.contains_key(&intake.id()) {
            return Err(IntakeRepositoryError::query(format!(
                "duplicate intake id {}",
                intake.id()
            )));
        }
        store.insert(intake.id(), intake.clone());
        debug!(intake_id = %intake.id(), stored = store.len(), "intake stored in memory");
        Ok(intake.clone())
    }

    async fn find_in_range(
        &self,
        user_id: &UserId,
        range: &ReportRange,
        order: SortOrder,
    ) -> Result<Vec<IntakeEvent>, IntakeRepositoryError> {
        let matching = self
            .lock()?
            .values()
            .filter(|intake| intake.is_owned_by(user_id) && range.contains(intake.timestamp()))
            .cloned()
            .collect();
        Ok(sort_intakes(matching, order))
    }

    async fn find_by_id(
        &self,
        intake_id: &Uuid,
    ) -> Result<Option<IntakeEvent>, IntakeRepositoryError> {
        Ok(self.lock()?.get(intake_id).cloned())
    }

    async fn delete_by_id(&self, intake_id: &Uuid) -> Result<bool, IntakeRepositoryError> {
        Ok(self.lock()?.remove(intake_id).is_some())
    }
}
