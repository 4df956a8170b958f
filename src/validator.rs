use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use rollcall_models::FieldOrder;

use crate::utils::errors::AppError;

/// First failing rule as a client-facing message.
///
/// Fields are checked in `order`; any failing field not listed there comes
/// after, by name.
pub fn first_error_message(errors: &ValidationErrors, order: &[&str]) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by_key(|(name, _)| {
        let name: &str = name;
        let position = order.iter().position(|f| *f == name).unwrap_or(order.len());
        (position, name.to_string())
    });

    fields
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid"))
            })
        })
        .next()
        .unwrap_or_else(|| "Invalid request body".to_string())
}

fn validation_error<T: FieldOrder>(errors: &ValidationErrors) -> AppError {
    AppError::bad_request(anyhow!("{}", first_error_message(errors, T::FIELDS)))
}

fn quoted_after<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    text.split(marker).nth(1).and_then(|s| s.split('`').next())
}

fn rejection_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!(
            "Missing 'Content-Type: application/json' header"
        ));
    }

    let error_msg = rejection.body_text();

    if let Some(field) = quoted_after(&error_msg, "missing field `") {
        return AppError::bad_request(anyhow!("{field} is required"));
    }

    if let Some(field) = quoted_after(&error_msg, "unknown field `") {
        return AppError::bad_request(anyhow!("property {field} should not exist"));
    }

    if error_msg.contains("invalid type") {
        return AppError::bad_request(anyhow!("Invalid field type in request"));
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}

/// JSON body extractor that runs the payload's `validator` rules.
///
/// Every rejection, malformed JSON or failed rule, becomes a 400 with a
/// single message.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + FieldOrder,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        value
            .validate()
            .map_err(|errors| validation_error::<T>(&errors))?;

        Ok(ValidatedJson(value))
    }
}
