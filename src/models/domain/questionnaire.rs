use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

// Field names double as document keys in responses, so they are restricted
// to identifier characters.
static FIELD_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("FIELD_NAME_REGEX is a valid regex pattern")
});

/// An unscored form with typed fields, authored in the content store and
/// embedded in a lesson document.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
pub struct Questionnaire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(
        length(min = 1, message = "a questionnaire needs at least one field"),
        nested
    )]
    pub fields: Vec<QuestionnaireField>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
#[validate(schema(function = validate_choice_options))]
pub struct QuestionnaireField {
    #[validate(length(min = 1))]
    pub label: String,
    /// Unique identifier for this field within the questionnaire.
    #[validate(regex(path = *FIELD_NAME_REGEX, message = "field name must be an identifier"))]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    ShortText,
    LongText,
    SingleChoice,
    MultipleChoice,
    Number,
    Date,
    Boolean,
}

impl FieldType {
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldType::SingleChoice | FieldType::MultipleChoice)
    }
}

// A choice field with nothing to choose from can never be filled in.
fn validate_choice_options(field: &QuestionnaireField) -> Result<(), ValidationError> {
    if field.field_type.is_choice() && field.options.is_empty() {
        return Err(ValidationError::new("choice_field_without_options"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_field(name: &str) -> QuestionnaireField {
        QuestionnaireField {
            label: "Label".to_string(),
            name: name.to_string(),
            field_type: FieldType::ShortText,
            options: vec![],
            required: false,
            placeholder: None,
            help_text: None,
        }
    }

    #[test]
    fn field_type_uses_camel_case_tags() {
        let json = serde_json::to_string(&FieldType::ShortText).expect("tag should serialize");
        assert_eq!(json, "\"shortText\"");

        let parsed: FieldType =
            serde_json::from_str("\"multipleChoice\"").expect("tag should deserialize");
        assert_eq!(parsed, FieldType::MultipleChoice);
    }

    #[test]
    fn field_type_rejects_unknown_tag() {
        assert!(serde_json::from_str::<FieldType>("\"rating\"").is_err());
    }

    #[test]
    fn questionnaire_without_fields_fails_validation() {
        let questionnaire = Questionnaire {
            title: None,
            description: None,
            fields: vec![],
        };

        assert!(questionnaire.validate().is_err());
    }

    #[test]
    fn field_name_must_be_identifier() {
        assert!(text_field("favorite_topic").validate().is_ok());
        assert!(text_field("_private").validate().is_ok());
        assert!(text_field("1leading_digit").validate().is_err());
        assert!(text_field("has space").validate().is_err());
    }

    #[test]
    fn choice_field_without_options_fails_validation() {
        let mut field = text_field("pick_one");
        field.field_type = FieldType::SingleChoice;
        assert!(field.validate().is_err());

        field.options = vec!["A".to_string(), "B".to_string()];
        assert!(field.validate().is_ok());
    }

    #[test]
    fn field_deserializes_from_authored_document() {
        let json = r#"{
            "label": "How did you hear about us?",
            "name": "referral_source",
            "type": "singleChoice",
            "options": ["Search", "Friend", "Other"],
            "required": true,
            "help_text": "Pick the closest match."
        }"#;

        let field: QuestionnaireField = serde_json::from_str(json).expect("field should parse");

        assert_eq!(field.field_type, FieldType::SingleChoice);
        assert!(field.required);
        assert_eq!(field.options.len(), 3);
        assert!(field.placeholder.is_none());
        assert!(field.validate().is_ok());
    }
}
