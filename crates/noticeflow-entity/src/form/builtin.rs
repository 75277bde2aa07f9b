//! Form definitions shipped with NoticeFlow and written by `forms seed`.

use serde_json::json;

use super::field::{FieldKind, FormField, RadioOption};
use super::model::FormDefinition;

/// Step key for the notification creation form.
pub const CREATE_NOTIFICATION: &str = "CREATE_NOTIFICATION";
/// Step key for the notified person form.
pub const CREATE_NOTIFIED_PERSON: &str = "CREATE_NOTIFIED_PERSON";
/// Step key for the reviewer validation form.
pub const VALIDATE_NOTIFICATION: &str = "VALIDATE_NOTIFICATION";

/// All built-in definitions, in seeding order.
pub fn builtin_forms() -> Vec<FormDefinition> {
    vec![
        create_notification(),
        create_notified_person(),
        validate_notification(),
    ]
}

fn text(id: &str, label: &str, min: Option<usize>, max: Option<usize>) -> FormField {
    FormField {
        id: id.to_string(),
        label: label.to_string(),
        required: true,
        kind: FieldKind::Text {
            min_length: min,
            max_length: max,
        },
    }
}

fn create_notification() -> FormDefinition {
    FormDefinition {
        step_key: CREATE_NOTIFICATION.to_string(),
        title: "Create Notification".to_string(),
        fields: vec![
            text("title", "Title", Some(3), Some(120)),
            FormField {
                id: "description".to_string(),
                label: "Description".to_string(),
                required: true,
                kind: FieldKind::Textarea {
                    min_length: Some(10),
                    max_length: Some(1000),
                },
            },
            FormField {
                id: "hearingDate".to_string(),
                label: "Hearing Date".to_string(),
                required: true,
                kind: FieldKind::Date,
            },
        ],
    }
}

fn create_notified_person() -> FormDefinition {
    FormDefinition {
        step_key: CREATE_NOTIFIED_PERSON.to_string(),
        title: "Create Notified Person".to_string(),
        fields: vec![
            text("name", "Name", Some(5), Some(100)),
            FormField {
                id: "email".to_string(),
                label: "Email".to_string(),
                required: true,
                kind: FieldKind::Email,
            },
            text("phone", "Phone", None, None),
            text("cep", "CEP", Some(8), Some(9)),
            text("state", "State", Some(2), Some(2)),
            text("city", "City", Some(5), Some(100)),
            text("neighborhood", "Neighborhood", Some(5), Some(100)),
            text("street", "Street", Some(5), Some(100)),
        ],
    }
}

fn validate_notification() -> FormDefinition {
    FormDefinition {
        step_key: VALIDATE_NOTIFICATION.to_string(),
        title: "Validate Notification".to_string(),
        fields: vec![FormField {
            id: "needsAdditionalInfo".to_string(),
            label: "Needs additional info?".to_string(),
            required: true,
            kind: FieldKind::Radio {
                options: vec![
                    RadioOption {
                        label: "Yes".to_string(),
                        value: json!(true),
                    },
                    RadioOption {
                        label: "No".to_string(),
                        value: json!(false),
                    },
                ],
            },
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_keys_are_unique() {
        let forms = builtin_forms();
        assert_eq!(forms.len(), 3);
        assert_eq!(forms[0].step_key, CREATE_NOTIFICATION);
        assert_eq!(forms[2].step_key, VALIDATE_NOTIFICATION);
    }

    #[test]
    fn test_person_form_reports_first_error() {
        let form = create_notified_person();
        let submission = json!({
            "name": "Jo",
            "email": "bad",
        });
        let err = form.validate(submission.as_object().unwrap()).unwrap_err();
        assert_eq!(err.field, "name");
    }

    #[test]
    fn test_notification_form_accepts_valid_submission() {
        let form = create_notification();
        let submission = json!({
            "title": "Hearing A",
            "description": "Civil hearing at the district court",
            "hearingDate": "2026-11-20"
        });
        assert!(form.validate(submission.as_object().unwrap()).is_ok());
    }

    #[test]
    fn test_definition_round_trips_through_schema_json() {
        let form = validate_notification();
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["stepKey"], VALIDATE_NOTIFICATION);
        assert_eq!(value["fields"][0]["type"], "radio");
        let parsed: FormDefinition = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, form);
    }
}
