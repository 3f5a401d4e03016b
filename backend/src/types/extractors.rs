//! Custom extractors for request validation

use aide::operation::OperationInput;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use schemars::JsonSchema;
use validator::Validate;

use crate::types::error::AppError;

/// JSON extractor that runs `validator` rules and reports failures in the
/// API error envelope
///
/// The first failing field (by name) decides the error code. Fields declare
/// their code and message in the `#[validate]` attribute.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: serde::de::DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| match err {
                JsonRejection::MissingJsonContentType(_) => AppError::validation(
                    "invalid_content_type",
                    "Missing Content-Type: application/json header",
                ),
                other => {
                    tracing::debug!("Rejected JSON payload: {other}");
                    AppError::validation("invalid_json", "Invalid JSON payload")
                }
            })?;

        payload.validate().map_err(|errors| {
            let field_errors = errors.field_errors();
            let mut fields: Vec<_> = field_errors.keys().collect();
            fields.sort();

            fields
                .first()
                .and_then(|field| field_errors[*field].first())
                .map_or_else(
                    || AppError::validation("validation_error", "Request validation failed"),
                    |error| {
                        let message = error
                            .message
                            .as_deref()
                            .unwrap_or("Request validation failed");
                        AppError::validation(error.code.clone(), message)
                    },
                )
        })?;

        Ok(Self(payload))
    }
}

impl<T> OperationInput for ValidatedJson<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }
}
