use std::collections::HashMap;

use serde_json::Value;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{questionnaire::Questionnaire, questionnaire_response::ResponseEntry},
};

/// Validate a questionnaire submission and flatten it to field/value pairs
/// in authored field order.
///
/// A required field is missing when its value is absent, null, or the empty
/// string. String values are kept verbatim; everything else is stored as its
/// JSON serialization. Keys that don't name an authored field reject the
/// submission.
pub fn flatten_response(
    questionnaire: &Questionnaire,
    values: &HashMap<String, Value>,
) -> AppResult<Vec<ResponseEntry>> {
    for name in values.keys() {
        if !questionnaire.fields.iter().any(|field| field.name == *name) {
            return Err(AppError::BadRequest(format!(
                "Unknown questionnaire field '{}'",
                name
            )));
        }
    }

    let missing_required = questionnaire
        .fields
        .iter()
        .any(|field| field.required && is_missing(values.get(&field.name)));
    if missing_required {
        return Err(AppError::ValidationError(
            "All required fields must be completed".to_string(),
        ));
    }

    let entries = questionnaire
        .fields
        .iter()
        .filter_map(|field| {
            let value = values.get(&field.name)?;
            if value.is_null() {
                return None;
            }
            Some(ResponseEntry {
                field_name: field.name.clone(),
                value: stringify(value),
            })
        })
        .collect();

    Ok(entries)
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
