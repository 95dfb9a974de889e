//! Regression coverage for intake domain types.

use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

use super::{
    AmountInput, ContainerType, DEFAULT_CONTAINER_TYPE, IntakeAmount, IntakeEvent,
    IntakeEventDraft, IntakeValidationError,
};
use crate::domain::UserId;

fn build_draft(user_id: UserId) -> IntakeEventDraft {
    IntakeEventDraft {
        id: Uuid::new_v4(),
        user_id,
        amount: IntakeAmount::new(250.0).expect("valid amount"),
        container_type: ContainerType::new("Bottle"),
        timestamp: Utc
            .with_ymd_and_hms(2026, 3, 14, 8, 30, 0)
            .single()
            .expect("valid timestamp"),
    }
}

#[rstest]
#[case(1.0)]
#[case(250.0)]
#[case(0.5)]
fn amount_accepts_positive_values(#[case] value: f64) {
    let amount = IntakeAmount::new(value).expect("positive amount");
    assert_eq!(amount.value(), value);
}

#[rstest]
#[case(0.0)]
#[case(-5.0)]
fn amount_rejects_non_positive_values(#[case] value: f64) {
    let result = IntakeAmount::new(value);
    assert_eq!(result, Err(IntakeValidationError::NonPositiveAmount { value }));
}

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(f64::NEG_INFINITY)]
fn amount_rejects_non_finite_values(#[case] value: f64) {
    assert_eq!(
        IntakeAmount::new(value),
        Err(IntakeValidationError::NonFiniteAmount)
    );
}

#[rstest]
#[case(AmountInput::from(250.0), 250.0)]
#[case(AmountInput::from("250"), 250.0)]
#[case(AmountInput::from(" 12.5 "), 12.5)]
fn amount_input_accepts_numbers_and_numeric_text(
    #[case] input: AmountInput,
    #[case] expected: f64,
) {
    let amount = input.to_amount().expect("amount parses");
    assert_eq!(amount.value(), expected);
}

#[rstest]
#[case("")]
#[case("lots")]
#[case("250ml")]
fn amount_input_rejects_non_numeric_text(#[case] raw: &str) {
    let result = AmountInput::from(raw).to_amount();
    assert_eq!(
        result,
        Err(IntakeValidationError::NonNumericAmount {
            value: raw.to_owned()
        })
    );
}

#[rstest]
fn amount_input_rejects_numeric_text_that_is_not_positive() {
    let result = AmountInput::from("-5").to_amount();
    assert_eq!(
        result,
        Err(IntakeValidationError::NonPositiveAmount { value: -5.0 })
    );
}

#[rstest]
fn amount_input_deserialises_numbers_and_strings() {
    let number: AmountInput = serde_json::from_value(json!(300)).expect("number input");
    let text: AmountInput = serde_json::from_value(json!("300")).expect("text input");
    assert_eq!(number, AmountInput::Number(300.0));
    assert_eq!(text, AmountInput::Text("300".to_owned()));
}

#[rstest]
#[case(None)]
#[case(Some(String::new()))]
fn container_type_defaults_to_glass(#[case] input: Option<String>) {
    assert_eq!(ContainerType::from_input(input).as_str(), DEFAULT_CONTAINER_TYPE);
}

#[rstest]
fn container_type_keeps_supplied_label() {
    let label = ContainerType::from_input(Some("Thermos".to_owned()));
    assert_eq!(label.to_string(), "Thermos");
}

#[rstest]
fn event_exposes_draft_fields() {
    let draft = build_draft(UserId::random());
    let event = IntakeEvent::new(draft.clone());

    assert_eq!(event.id(), draft.id);
    assert_eq!(event.user_id(), &draft.user_id);
    assert_eq!(event.amount(), draft.amount);
    assert_eq!(event.container_type(), &draft.container_type);
    assert_eq!(event.timestamp(), draft.timestamp);
}

#[rstest]
fn ownership_compares_user_uuid() {
    let owner = UserId::random();
    let event = IntakeEvent::new(build_draft(owner.clone()));

    assert!(event.is_owned_by(&owner));
    assert!(!event.is_owned_by(&UserId::random()));
}

#[rstest]
fn ownership_ignores_textual_case() {
    let owner = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("lowercase id");
    let shouting = UserId::new("3FA85F64-5717-4562-B3FC-2C963F66AFA6").expect("uppercase id");
    let event = IntakeEvent::new(build_draft(owner));

    assert!(event.is_owned_by(&shouting));
}

#[rstest]
fn validation_errors_report_field_and_code() {
    let error = IntakeValidationError::InvalidTimestamp {
        value: "yesterday".to_owned(),
    };
    assert_eq!(error.field(), "date");
    assert_eq!(error.code(), "invalid_timestamp");
    assert_eq!(
        error.to_string(),
        "intake date \"yesterday\" is not a recognised timestamp"
    );
}
