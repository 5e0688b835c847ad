use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::{AppError, FieldErrors};

/// Runs the derived rules of `payload`, collecting failures per field.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::Validation(field_errors(&err)))
}

pub fn field_errors(err: &ValidationErrors) -> FieldErrors {
    err.field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid ({}).", camel_case(field), e.code),
                })
                .collect();
            (camel_case(field), messages)
        })
        .collect()
}

/// `first_name` -> `firstName`, matching the JSON field names clients send.
pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value must not be blank.".into());
        return Err(err);
    }
    Ok(())
}
