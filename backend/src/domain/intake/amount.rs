//! Intake amount value type and lenient caller input.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::IntakeValidationError;

/// Consumed volume, in millilitres by caller convention.
///
/// ## Invariants
/// - Always finite and strictly greater than zero.
///
/// # Examples
/// ```
/// use hydration_backend::domain::IntakeAmount;
///
/// assert!(IntakeAmount::new(250.0).is_ok());
/// assert!(IntakeAmount::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct IntakeAmount(f64);

impl IntakeAmount {
    /// Validate a raw amount.
    pub fn new(value: f64) -> Result<Self, IntakeValidationError> {
        if !value.is_finite() {
            return Err(IntakeValidationError::NonFiniteAmount);
        }
        if value <= 0.0 {
            return Err(IntakeValidationError::NonPositiveAmount { value });
        }
        Ok(Self(value))
    }

    /// Raw amount.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for IntakeAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for IntakeAmount {
    type Error = IntakeValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IntakeAmount> for f64 {
    fn from(value: IntakeAmount) -> Self {
        value.0
    }
}

/// Amount as supplied by a caller: a JSON number or a numeric string.
///
/// Numeric strings such as `"250"` are accepted so existing clients that send
/// form-encoded values keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Interpret the input as a validated [`IntakeAmount`].
    ///
    /// # Examples
    /// ```
    /// use hydration_backend::domain::AmountInput;
    ///
    /// let amount = AmountInput::from(" 250 ").to_amount().expect("numeric text");
    /// assert_eq!(amount.value(), 250.0);
    /// ```
    pub fn to_amount(&self) -> Result<IntakeAmount, IntakeValidationError> {
        match self {
            Self::Number(value) => IntakeAmount::new(*value),
            Self::Text(raw) => {
                let trimmed = raw.trim();
                let value = trimmed.parse::<f64>().map_err(|_| {
                    IntakeValidationError::NonNumericAmount {
                        value: raw.clone(),
                    }
                })?;
                IntakeAmount::new(value)
            }
        }
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for AmountInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
