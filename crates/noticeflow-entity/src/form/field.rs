//! Form fields and per-kind value validation.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::ValidateEmail;

/// A single input on a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Key of the value in a submission.
    pub id: String,
    /// Label shown to the user.
    pub label: String,
    /// Whether a value must be present.
    #[serde(default)]
    pub required: bool,
    /// Input kind and its constraints.
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// The kind of a form field, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text.
    #[serde(rename_all = "camelCase")]
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// Multi-line text.
    #[serde(rename_all = "camelCase")]
    Textarea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    /// An email address.
    Email,
    /// A calendar date, `YYYY-MM-DD` or RFC 3339.
    Date,
    /// One choice among fixed options.
    Radio { options: Vec<RadioOption> },
}

/// A selectable value of a radio field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioOption {
    /// Label shown to the user.
    pub label: String,
    /// Submitted value.
    pub value: Value,
}

/// The first problem found in a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Offending field id.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl FormField {
    /// Validate a submitted value. `None` and JSON `null` count as missing.
    pub fn validate(&self, value: Option<&Value>) -> Result<(), FieldError> {
        let value = match value {
            None | Some(Value::Null) => return self.missing(),
            Some(Value::String(s)) if s.trim().is_empty() => return self.missing(),
            Some(v) => v,
        };

        match &self.kind {
            FieldKind::Text {
                min_length,
                max_length,
            }
            | FieldKind::Textarea {
                min_length,
                max_length,
            } => {
                let text = self.as_text(value)?;
                let len = text.chars().count();
                if let Some(min) = min_length.filter(|min| len < *min) {
                    return Err(self.error(format!(
                        "{} must be at least {min} characters",
                        self.label
                    )));
                }
                if let Some(max) = max_length.filter(|max| len > *max) {
                    return Err(self.error(format!(
                        "{} must be at most {max} characters",
                        self.label
                    )));
                }
                Ok(())
            }
            FieldKind::Email => {
                let text = self.as_text(value)?;
                if text.validate_email() {
                    Ok(())
                } else {
                    Err(self.error(format!("{} must be a valid email", self.label)))
                }
            }
            FieldKind::Date => {
                let text = self.as_text(value)?;
                if parse_date(text) {
                    Ok(())
                } else {
                    Err(self.error(format!("{} must be a valid date", self.label)))
                }
            }
            FieldKind::Radio { options } => {
                let matches = options.iter().any(|opt| {
                    opt.value == *value
                        || value
                            .as_str()
                            .is_some_and(|s| opt.value.to_string().trim_matches('"') == s)
                });
                if matches {
                    Ok(())
                } else {
                    Err(self.error(format!("{} has an invalid option", self.label)))
                }
            }
        }
    }

    fn missing(&self) -> Result<(), FieldError> {
        if self.required {
            Err(self.error(format!("{} is required", self.label)))
        } else {
            Ok(())
        }
    }

    fn as_text<'a>(&self, value: &'a Value) -> Result<&'a str, FieldError> {
        value
            .as_str()
            .ok_or_else(|| self.error(format!("{} must be a string", self.label)))
    }

    fn error(&self, message: String) -> FieldError {
        FieldError {
            field: self.id.clone(),
            message,
        }
    }
}

fn parse_date(text: &str) -> bool {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(min: Option<usize>, max: Option<usize>) -> FormField {
        FormField {
            id: "title".into(),
            label: "Title".into(),
            required: true,
            kind: FieldKind::Text {
                min_length: min,
                max_length: max,
            },
        }
    }

    #[test]
    fn test_text_length_bounds() {
        let field = text(Some(3), Some(5));
        assert!(field.validate(Some(&json!("abc"))).is_ok());
        assert!(field.validate(Some(&json!("ab"))).is_err());
        assert!(field.validate(Some(&json!("abcdef"))).is_err());
        assert!(field.validate(Some(&json!(42))).is_err());
    }

    #[test]
    fn test_required_and_optional_missing() {
        let mut field = text(None, None);
        let err = field.validate(None).unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.message, "Title is required");
        assert!(field.validate(Some(&json!("  "))).is_err());

        field.required = false;
        assert!(field.validate(None).is_ok());
        assert!(field.validate(Some(&Value::Null)).is_ok());
    }

    #[test]
    fn test_email_and_date() {
        let email = FormField {
            id: "email".into(),
            label: "Email".into(),
            required: true,
            kind: FieldKind::Email,
        };
        assert!(email.validate(Some(&json!("joao@example.com"))).is_ok());
        assert!(email.validate(Some(&json!("not-an-email"))).is_err());

        let date = FormField {
            id: "hearingDate".into(),
            label: "Hearing Date".into(),
            required: true,
            kind: FieldKind::Date,
        };
        assert!(date.validate(Some(&json!("2026-03-01"))).is_ok());
        assert!(date.validate(Some(&json!("2026-03-01T10:00:00Z"))).is_ok());
        assert!(date.validate(Some(&json!("01/03/2026"))).is_err());
    }

    #[test]
    fn test_radio_accepts_typed_and_string_values() {
        let radio = FormField {
            id: "needsAdditionalInfo".into(),
            label: "Needs additional info?".into(),
            required: true,
            kind: FieldKind::Radio {
                options: vec![
                    RadioOption {
                        label: "Yes".into(),
                        value: json!(true),
                    },
                    RadioOption {
                        label: "No".into(),
                        value: json!(false),
                    },
                ],
            },
        };
        assert!(radio.validate(Some(&json!(true))).is_ok());
        assert!(radio.validate(Some(&json!("false"))).is_ok());
        assert!(radio.validate(Some(&json!("maybe"))).is_err());
    }

    #[test]
    fn test_wire_shape() {
        let field: FormField = serde_json::from_value(json!({
            "id": "title",
            "label": "Title",
            "type": "text",
            "required": true,
            "minLength": 3,
            "maxLength": 120
        }))
        .unwrap();
        assert_eq!(field, text(Some(3), Some(120)));

        let email: FormField = serde_json::from_value(json!({
            "id": "email", "label": "Email", "type": "email", "required": true, "format": "email"
        }))
        .unwrap();
        assert_eq!(email.kind, FieldKind::Email);

        let back = serde_json::to_value(&field).unwrap();
        assert_eq!(back["type"], "text");
        assert_eq!(back["minLength"], 3);
    }
}
