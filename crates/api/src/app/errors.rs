use std::collections::BTreeMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use invoiceflow_application::ActionError;

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Field name -> messages, as returned with `422 Unprocessable Entity`.
pub type ValidationErrors = BTreeMap<&'static str, Vec<String>>;

pub fn validation_error(errors: ValidationErrors) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "error": "validation_error",
            "message": "The given data was invalid.",
            "errors": errors,
        })),
    )
        .into_response()
}

/// Body that could not be decoded as the expected JSON.
pub fn json_rejection(rejection: JsonRejection) -> Response {
    json_error(rejection.status(), "invalid_json", rejection.body_text())
}

/// Unwrap a JSON body, treating a request sent without one as an empty body
/// so field validation reports what is missing.
pub fn body_or_default<T: Default>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match body {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(json_rejection(rejection)),
    }
}

/// Map an action failure: business-rule violations become `400` with the
/// domain message, anything else a generic `500`.
pub fn action_error(err: ActionError, rejected: &'static str, verb: &'static str) -> Response {
    if err.is_business_rule_violation() {
        tracing::warn!(error = %err, "{rejected}");
        return json_error(StatusCode::BAD_REQUEST, rejected, err.to_string());
    }

    tracing::error!(error = %err, "unexpected error while {verb} the invoice");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
        format!("An unexpected error occurred while {verb} the invoice."),
    )
}
