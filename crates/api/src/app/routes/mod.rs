use axum::Router;

pub mod approvals;
pub mod invoices;
pub mod system;

/// Versioned API routes, mounted under `/api/v1`.
pub fn router() -> Router {
    Router::new()
        .nest("/invoices", invoices::router())
        .nest("/approvals", approvals::router())
}
