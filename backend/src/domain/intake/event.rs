//! Intake event entity.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::UserId;

use super::IntakeAmount;

/// Container label applied when the caller omits one.
pub const DEFAULT_CONTAINER_TYPE: &str = "Glass";

/// Free-form container label ("Glass", "Bottle", ...).
///
/// An empty label is replaced with [`DEFAULT_CONTAINER_TYPE`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerType(String);

impl ContainerType {
    /// Build a label, substituting the default for empty input.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        if label.is_empty() {
            Self::default()
        } else {
            Self(label)
        }
    }

    /// Build a label from an optional request field.
    pub fn from_input(label: Option<String>) -> Self {
        label.map_or_else(Self::default, Self::new)
    }

    /// Borrow the label.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for ContainerType {
    fn default() -> Self {
        Self(DEFAULT_CONTAINER_TYPE.to_owned())
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ContainerType> for String {
    fn from(value: ContainerType) -> Self {
        value.0
    }
}

/// Input payload for [`IntakeEvent::new`].
#[derive(Debug, Clone)]
pub struct IntakeEventDraft {
    pub id: Uuid,
    pub user_id: UserId,
    pub amount: IntakeAmount,
    pub container_type: ContainerType,
    pub timestamp: DateTime<Utc>,
}

/// A single logged intake.
///
/// Every component is validated by its own type, so construction from a
/// draft cannot fail.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use hydration_backend::domain::{
///     ContainerType, IntakeAmount, IntakeEvent, IntakeEventDraft, UserId,
/// };
/// use uuid::Uuid;
///
/// let event = IntakeEvent::new(IntakeEventDraft {
///     id: Uuid::new_v4(),
///     user_id: UserId::random(),
///     amount: IntakeAmount::new(330.0).expect("positive amount"),
///     container_type: ContainerType::from_input(None),
///     timestamp: Utc::now(),
/// });
/// assert_eq!(event.container_type().as_str(), "Glass");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IntakeEvent {
    id: Uuid,
    user_id: UserId,
    amount: IntakeAmount,
    container_type: ContainerType,
    timestamp: DateTime<Utc>,
}

impl IntakeEvent {
    /// Creates an intake event from validated parts.
    pub fn new(draft: IntakeEventDraft) -> Self {
        Self::from(draft)
    }

    /// Returns the event id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the owning user id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the consumed amount.
    pub fn amount(&self) -> IntakeAmount {
        self.amount
    }

    /// Returns the container label.
    pub fn container_type(&self) -> &ContainerType {
        &self.container_type
    }

    /// Returns the instant the intake is attributed to.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether `user_id` owns this event.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id.as_uuid() == user_id.as_uuid()
    }
}

impl From<IntakeEventDraft> for IntakeEvent {
    fn from(value: IntakeEventDraft) -> Self {
        let IntakeEventDraft {
            id,
            user_id,
            amount,
            container_type,
            timestamp,
        } = value;
        Self {
            id,
            user_id,
            amount,
            container_type,
            timestamp,
        }
    }
}
