//! Driving port for intake mutations.
//!
//! Records new intake events and deletes existing ones on behalf of an
//! already-authenticated user.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    AmountInput, ContainerType, Error, IntakeEvent, IntakeEventDraft, IntakeValidationError, UserId,
};

/// Serializable intake payload for driving ports.
///
/// Field names match the wire contract existing clients expect:
/// `{id, userId, amount, type, date}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakePayload {
    pub id: Uuid,
    pub user_id: UserId,
    pub amount: f64,
    #[serde(rename = "type")]
    pub container_type: String,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
}

impl From<IntakeEvent> for IntakePayload {
    fn from(value: IntakeEvent) -> Self {
        Self {
            id: value.id(),
            user_id: value.user_id().clone(),
            amount: value.amount().value(),
            container_type: value.container_type().as_str().to_owned(),
            timestamp: value.timestamp(),
        }
    }
}

/// Request to record one intake.
///
/// `amount` is optional on the wire so a missing value surfaces as a
/// validation failure rather than a deserialisation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordIntakeRequest {
    pub user_id: UserId,
    #[serde(default)]
    pub amount: Option<AmountInput>,
    #[serde(default, rename = "type")]
    pub container_type: Option<String>,
    #[serde(default, rename = "date")]
    pub timestamp: Option<String>,
}

/// Response from recording an intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordIntakeResponse {
    pub intake: IntakePayload,
}

/// Request to delete one intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteIntakeRequest {
    pub user_id: UserId,
    #[serde(rename = "id")]
    pub intake_id: Uuid,
}

/// Response from deleting an intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteIntakeResponse {
    pub id: Uuid,
}

/// Driving port for intake write operations.
///
/// # Examples
///
/// ```rust,no_run
/// # use hydration_backend::domain::{AmountInput, UserId};
/// # use hydration_backend::domain::ports::{
/// #     FixtureIntakeCommand, IntakeCommand, RecordIntakeRequest,
/// # };
/// # async fn example() -> Result<(), hydration_backend::domain::Error> {
/// let command = FixtureIntakeCommand;
/// let response = command
///     .record_intake(RecordIntakeRequest {
///         user_id: UserId::random(),
///         amount: Some(AmountInput::from(250.0)),
///         container_type: None,
///         timestamp: None,
///     })
///     .await?;
/// assert_eq!(response.intake.container_type, "Glass");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait IntakeCommand: Send + Sync {
    /// Validates and persists one intake event.
    ///
    /// Fails with [`crate::domain::ErrorCode::InvalidRequest`] when the amount
    /// is missing, non-numeric, or not strictly positive, or when a supplied
    /// date cannot be parsed.
    async fn record_intake(&self, request: RecordIntakeRequest)
    -> Result<RecordIntakeResponse, Error>;

    /// Deletes an intake owned by the requesting user.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when the intake does
    /// not exist and [`crate::domain::ErrorCode::Forbidden`] when another user
    /// owns it.
    async fn delete_intake(&self, request: DeleteIntakeRequest)
    -> Result<DeleteIntakeResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIntakeCommand;

#[async_trait]
impl IntakeCommand for FixtureIntakeCommand {
    async fn record_intake(
        &self,
        request: RecordIntakeRequest,
    ) -> Result<RecordIntakeResponse, Error> {
        let amount = request
            .amount
            .ok_or(IntakeValidationError::MissingAmount)
            .and_then(|input| input.to_amount())
            .map_err(|err| Error::invalid_request(format!("invalid intake: {err}")))?;

        let intake = IntakeEvent::new(IntakeEventDraft {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            amount,
            container_type: ContainerType::from_input(request.container_type),
            timestamp: Utc::now(),
        });
        Ok(RecordIntakeResponse {
            intake: intake.into(),
        })
    }

    async fn delete_intake(
        &self,
        request: DeleteIntakeRequest,
    ) -> Result<DeleteIntakeResponse, Error> {
        Ok(DeleteIntakeResponse {
            id: request.intake_id,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::test_support::sample_intake;

    const USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    #[rstest]
    fn payload_uses_wire_field_names() {
        let user_id = UserId::new(USER_ID).expect("valid user id");
        let intake = sample_intake(&user_id, 250.0, "2024-03-10T08:00:00Z");
        let intake_id = intake.id();

        let value = serde_json::to_value(IntakePayload::from(intake)).expect("serialise");

        assert_eq!(
            value,
            json!({
                "id": intake_id,
                "userId": USER_ID,
                "amount": 250.0,
                "type": "Glass",
                "date": "2024-03-10T08:00:00Z",
            })
        );
    }

    #[rstest]
    fn record_request_accepts_string_amounts_and_omitted_fields() {
        let request: RecordIntakeRequest = serde_json::from_value(json!({
            "userId": USER_ID,
            "amount": "250",
        }))
        .expect("request deserialises");

        assert_eq!(request.amount, Some(AmountInput::Text("250".to_owned())));
        assert_eq!(request.container_type, None);
        assert_eq!(request.timestamp, None);
    }

    #[rstest]
    fn delete_request_reads_id_field() {
        let intake_id = Uuid::new_v4();
        let request: DeleteIntakeRequest = serde_json::from_value(json!({
            "userId": USER_ID,
            "id": intake_id,
        }))
        .expect("request deserialises");

        assert_eq!(request.intake_id, intake_id);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_command_defaults_container_type() {
        let response = FixtureIntakeCommand
            .record_intake(RecordIntakeRequest {
                user_id: UserId::random(),
                amount: Some(AmountInput::from(330.0)),
                container_type: Some(String::new()),
                timestamp: None,
            })
            .await
            .expect("fixture record succeeds");

        assert_eq!(response.intake.container_type, "Glass");
        assert_eq!(response.intake.amount, 330.0);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_command_rejects_missing_amount() {
        let error = FixtureIntakeCommand
            .record_intake(RecordIntakeRequest {
                user_id: UserId::random(),
                amount: None,
                container_type: None,
                timestamp: None,
            })
            .await
            .expect_err("missing amount is rejected");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
