use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::put,
};

use invoiceflow_application::InvoiceApprovalService;
use invoiceflow_core::AggregateRoot;

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/:id/approve", put(approve_invoice))
        .route("/:id/reject", put(reject_invoice))
}

/// `PUT /api/v1/approvals/:id/approve`
pub async fn approve_invoice(
    Extension(services): Extension<Arc<InvoiceApprovalService>>,
    Path(id): Path<String>,
) -> Response {
    match services.approve_invoice(&id).await {
        Ok(approval) => {
            tracing::info!(
                approval_id = %approval.id(),
                invoice_id = %approval.invoice_id(),
                status = %approval.status(),
                "invoice approved successfully via API"
            );
            Json(dto::ApprovalDecisionResponse::approved(&approval)).into_response()
        }
        Err(e) => errors::action_error(e, "Approval failed", "approving"),
    }
}

/// `PUT /api/v1/approvals/:id/reject`
pub async fn reject_invoice(
    Extension(services): Extension<Arc<InvoiceApprovalService>>,
    Path(id): Path<String>,
    body: Result<Json<dto::RejectInvoiceRequest>, JsonRejection>,
) -> Response {
    let body = match errors::body_or_default(body) {
        Ok(body) => body,
        Err(response) => return response,
    };
    let reason = match body.validate() {
        Ok(reason) => reason,
        Err(e) => return errors::validation_error(e),
    };

    match services.reject_invoice(&id, &reason).await {
        Ok(approval) => {
            tracing::info!(
                approval_id = %approval.id(),
                invoice_id = %approval.invoice_id(),
                status = %approval.status(),
                reason = %reason,
                "invoice rejected successfully via API"
            );
            Json(dto::ApprovalDecisionResponse::rejected(&approval)).into_response()
        }
        Err(e) => errors::action_error(e, "Rejection failed", "rejecting"),
    }
}
