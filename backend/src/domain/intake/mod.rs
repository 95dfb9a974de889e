//! Intake event domain types.
//!
//! An intake event is one logged unit of water consumption, owned by exactly
//! one user and attributed to a single instant. Events are immutable once
//! created; the only lifecycle transition is deletion.

use std::fmt;

mod amount;
mod event;
#[cfg(test)]
mod tests;

pub use amount::{AmountInput, IntakeAmount};
pub use event::{ContainerType, DEFAULT_CONTAINER_TYPE, IntakeEvent, IntakeEventDraft};

/// Validation errors raised while building an intake event from caller input.
#[derive(Debug, Clone, PartialEq)]
pub enum IntakeValidationError {
    MissingAmount,
    NonNumericAmount { value: String },
    NonFiniteAmount,
    NonPositiveAmount { value: f64 },
    InvalidTimestamp { value: String },
}

impl IntakeValidationError {
    /// Request field the failure refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingAmount
            | Self::NonNumericAmount { .. }
            | Self::NonFiniteAmount
            | Self::NonPositiveAmount { .. } => "amount",
            Self::InvalidTimestamp { .. } => "date",
        }
    }

    /// Stable machine-readable code for structured error details.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingAmount => "missing_amount",
            Self::NonNumericAmount { .. } => "non_numeric_amount",
            Self::NonFiniteAmount => "non_finite_amount",
            Self::NonPositiveAmount { .. } => "non_positive_amount",
            Self::InvalidTimestamp { .. } => "invalid_timestamp",
        }
    }
}

impl fmt::Display for IntakeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAmount => write!(f, "intake amount is required"),
            Self::NonNumericAmount { value } => {
                write!(f, "intake amount must be numeric (got {value:?})")
            }
            Self::NonFiniteAmount => write!(f, "intake amount must be a finite number"),
            Self::NonPositiveAmount { value } => {
                write!(f, "intake amount must be greater than zero (got {value})")
            }
            Self::InvalidTimestamp { value } => {
                write!(f, "intake date {value:?} is not a recognised timestamp")
            }
        }
    }
}

impl std::error::Error for IntakeValidationError {}
