use std::sync::Arc;

use invoiceflow_application::InvoiceApprovalService;
use invoiceflow_infra::{
    AppConfig, InMemoryApprovalRepository, InMemoryInvoiceRepository, PostgresApprovalRepository,
    PostgresInvoiceRepository, db,
};

/// Wire the workflow over the repositories selected by `config`.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<InvoiceApprovalService> {
    match &config.database {
        Some(database) => {
            let pool = db::connect(database).await?;
            tracing::info!("using Postgres repositories");
            Ok(InvoiceApprovalService::new(
                Arc::new(PostgresInvoiceRepository::new(pool.clone())),
                Arc::new(PostgresApprovalRepository::new(pool)),
            ))
        }
        None => {
            tracing::info!("using in-memory repositories");
            Ok(build_in_memory_services())
        }
    }
}

/// In-memory wiring (dev/test).
pub fn build_in_memory_services() -> InvoiceApprovalService {
    InvoiceApprovalService::new(
        Arc::new(InMemoryInvoiceRepository::new()),
        Arc::new(InMemoryApprovalRepository::new()),
    )
}
