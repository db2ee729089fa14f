use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::utils::errors::AppError;

/// JSON extractor for request DTOs. Malformed or incomplete bodies reject
/// with 400; bodies that parse but fail field validation reject with 422
/// carrying the field messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(rejection) => return Err(rejection_error(&rejection)),
        };

        if let Err(errors) = value.validate() {
            return Err(AppError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                anyhow!("{}", collect_messages(&errors)),
            ));
        }

        Ok(ValidatedJson(value))
    }
}

fn rejection_error(rejection: &JsonRejection) -> AppError {
    let detail = rejection.body_text();

    let message = if let Some(field) = missing_field(&detail) {
        format!("{} is required", field)
    } else if detail.contains("invalid type") {
        "Invalid field type in request".to_string()
    } else if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        "Missing 'Content-Type: application/json' header".to_string()
    } else {
        "Invalid request body".to_string()
    };

    AppError::bad_request(anyhow!(message))
}

/// Pull the field name out of serde's "missing field `...`" rejection text.
fn missing_field(detail: &str) -> Option<&str> {
    detail
        .split_once("missing field `")
        .and_then(|(_, rest)| rest.split('`').next())
}

/// Flatten validation errors into one message line. Fields without an
/// explicit message fall back to "<field> is invalid". Sorted so the output
/// is stable across runs.
fn collect_messages(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("{} is invalid", field),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct SignupBody {
        #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
        password: String,
        #[validate(email)]
        email: String,
    }

    #[test]
    fn test_missing_field_extraction() {
        let detail =
            "Failed to deserialize the JSON body into the target type: missing field `due_date` at line 1 column 20";
        assert_eq!(missing_field(detail), Some("due_date"));

        assert_eq!(missing_field("invalid type: string, expected a map"), None);
    }

    #[test]
    fn test_collect_messages_uses_dto_message_and_fallback() {
        let body = SignupBody {
            password: "short".to_string(),
            email: "not-an-email".to_string(),
        };

        let errors = body.validate().unwrap_err();
        assert_eq!(
            collect_messages(&errors),
            "Password must be at least 8 characters, email is invalid"
        );
    }

    #[test]
    fn test_valid_body_produces_no_messages() {
        let body = SignupBody {
            password: "long-enough-password".to_string(),
            email: "ada@example.com".to_string(),
        };

        assert!(body.validate().is_ok());
    }
}
