use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use serde_path_to_error::Segment;

use shared_models::error::AppError;

use crate::error::{Field, RegistrationError, ValidationError};
use crate::formatters::{extract_digits, format_phone_number};
use crate::models::RegistrationForm;
use crate::services::RegistrationService;

#[derive(Debug, Deserialize)]
pub struct PhoneQuery {
    pub phone: String,
}

/// Reads a form body, reporting unreadable values against the field they belong to.
pub fn parse_form(body: &[u8]) -> Result<RegistrationForm, AppError> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);

    let form = serde_path_to_error::deserialize(&mut deserializer).map_err(form_rejection)?;
    deserializer
        .end()
        .map_err(|e| AppError::BadRequest(format!("Malformed registration body: {}", e)))?;

    Ok(form)
}

fn form_rejection(err: serde_path_to_error::Error<serde_json::Error>) -> AppError {
    let key = match err.path().iter().next() {
        Some(Segment::Map { key }) => key.clone(),
        _ => String::new(),
    };
    let source = err.into_inner();

    if key.is_empty() || source.is_syntax() || source.is_eof() {
        return AppError::BadRequest(format!("Malformed registration body: {}", source));
    }

    match Field::from_key(&key) {
        Some(field) => RegistrationError::from(ValidationError::InvalidFormat {
            field,
            expected: field.expected_format(),
        })
        .into(),
        None => AppError::Validation {
            message: format!("{} has an invalid value", key),
            field: key,
        },
    }
}

#[axum::debug_handler]
pub async fn register_patient(
    State(service): State<Arc<RegistrationService>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let form = parse_form(&body)?;
    let record = service.register(&form, Utc::now()).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Patient registered successfully",
            "patient": record.to_map(),
        })),
    ))
}

#[axum::debug_handler]
pub async fn validate_registration(
    State(service): State<Arc<RegistrationService>>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let form = parse_form(&body)?;

    Ok(match service.validate(&form, Utc::now()) {
        Ok(()) => Json(json!({ "valid": true })),
        Err(e) => Json(json!({
            "valid": false,
            "field": e.field().key(),
            "error": e.to_string(),
        })),
    })
}

#[axum::debug_handler]
pub async fn format_phone(Query(query): Query<PhoneQuery>) -> Json<Value> {
    Json(json!({
        "digits": extract_digits(&query.phone),
        "formatted": format_phone_number(&query.phone),
    }))
}
