//! Delete authorisation.
//!
//! The guard only decides; the caller performs the delete afterwards, so a
//! record removed between the two steps still surfaces as not found.

use std::fmt;

use uuid::Uuid;

use crate::domain::{IntakeEvent, UserId};

/// Reasons a delete is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipError {
    NotFound { intake_id: Uuid },
    Forbidden { intake_id: Uuid },
}

impl fmt::Display for OwnershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { intake_id } => write!(f, "intake {intake_id} not found"),
            Self::Forbidden { intake_id } => {
                write!(f, "intake {intake_id} is not owned by the requesting user")
            }
        }
    }
}

impl std::error::Error for OwnershipError {}

/// Decide whether `requester` may delete the intake looked up as `intake_id`.
///
/// Returns the id to delete on success.
///
/// # Examples
/// ```
/// use hydration_backend::domain::{OwnershipError, UserId, authorize_delete};
/// use uuid::Uuid;
///
/// let intake_id = Uuid::new_v4();
/// let result = authorize_delete(None, intake_id, &UserId::random());
/// assert_eq!(result, Err(OwnershipError::NotFound { intake_id }));
/// ```
pub fn authorize_delete(
    record: Option<&IntakeEvent>,
    intake_id: Uuid,
    requester: &UserId,
) -> Result<Uuid, OwnershipError> {
    let record = record.ok_or(OwnershipError::NotFound { intake_id })?;
    if !record.is_owned_by(requester) {
        return Err(OwnershipError::Forbidden { intake_id });
    }
    Ok(record.id())
}
