use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use invoiceflow_application::InvoiceApprovalService;
use invoiceflow_core::AggregateRoot;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(submit_invoice))
        .route("/:id/approval", get(get_invoice_approval))
}

/// `POST /api/v1/invoices`
pub async fn submit_invoice(
    Extension(services): Extension<Arc<InvoiceApprovalService>>,
    body: Result<Json<dto::SubmitInvoiceRequest>, JsonRejection>,
) -> Response {
    let body = match errors::body_or_default(body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let data = match body.validate() {
        Ok(data) => data,
        Err(e) => return errors::validation_error(e),
    };

    match services.submit_invoice(data).await {
        Ok(invoice) => {
            tracing::info!(
                invoice_id = %invoice.id(),
                invoice_number = %invoice.number(),
                "invoice submitted successfully via API"
            );
            (
                StatusCode::CREATED,
                Json(dto::SubmitInvoiceResponse::from(&invoice)),
            )
                .into_response()
        }
        Err(e) => errors::action_error(e, "Invalid invoice data", "submitting"),
    }
}

/// `GET /api/v1/invoices/:id/approval`
pub async fn get_invoice_approval(
    Extension(services): Extension<Arc<InvoiceApprovalService>>,
    Path(id): Path<String>,
) -> Response {
    match services.find_approval_by_invoice(&id).await {
        Ok(Some(approval)) => Json(dto::ApprovalView::from(&approval)).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("No approval found for invoice {id}."),
        ),
        Err(e) => errors::action_error(e, "Lookup failed", "looking up"),
    }
}
