//! Postgres-backed repositories.
//!
//! ## Error Mapping
//!
//! | SQLx error | PostgreSQL code | RepositoryError |
//! |---|---|---|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (other) | any other | `Storage` |
//! | PoolClosed / network / decode | n/a | `Storage` |
//!
//! Ids are stored as `UUID`. A lookup id that is not a UUID cannot match a row,
//! so it resolves to "not found" without querying.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use invoiceflow_approval::{Approval, ApprovalId, ApprovalRepository, InvoiceRef};
use invoiceflow_core::{AggregateRoot, RepositoryError, RepositoryResult};
use invoiceflow_invoicing::{Invoice, InvoiceId, InvoiceNumber, InvoiceRepository};

use super::rows::{ApprovalRow, InvoiceRow};

#[derive(Debug, Clone)]
pub struct PostgresInvoiceRepository {
    pool: Arc<PgPool>,
}

impl PostgresInvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
    /// Invoices are immutable: saving an already stored id is a no-op, and a
    /// number stored under another id violates the unique index (`Conflict`).
    #[instrument(skip(self, invoice), fields(invoice_id = %invoice.id()), err)]
    async fn save(&self, invoice: &Invoice) -> RepositoryResult<()> {
        let row = InvoiceRow::from(invoice);

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id,
                invoice_number,
                amount,
                submitter_id,
                supervisor_id,
                submitted_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(parse_uuid("invoices.id", &row.id)?)
        .bind(&row.invoice_number)
        .bind(row.amount)
        .bind(parse_uuid("invoices.submitter_id", &row.submitter_id)?)
        .bind(parse_uuid("invoices.supervisor_id", &row.supervisor_id)?)
        .bind(row.submitted_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_invoice", e))?;

        Ok(())
    }

    #[instrument(skip(self), fields(invoice_id = %id), err)]
    async fn find_by_id(&self, id: &InvoiceId) -> RepositoryResult<Option<Invoice>> {
        let Ok(uuid) = Uuid::parse_str(id.as_str()) else {
            return Ok(None);
        };

        let row = sqlx::query(
            r#"
            SELECT
                id,
                invoice_number,
                amount::float8 AS amount,
                submitter_id,
                supervisor_id,
                submitted_at
            FROM invoices
            WHERE id = $1
            "#,
        )
        .bind(uuid)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_invoice", e))?;

        row.map(|r| invoice_row(&r)?.into_invoice()).transpose()
    }

    #[instrument(skip(self), fields(invoice_number = %number), err)]
    async fn exists_by_number(&self, number: &InvoiceNumber) -> RepositoryResult<bool> {
        let row = sqlx::query(
            "SELECT EXISTS (SELECT 1 FROM invoices WHERE invoice_number = $1) AS taken",
        )
        .bind(number.as_str())
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("exists_by_number", e))?;

        row.try_get::<bool, _>("taken")
            .map_err(|e| RepositoryError::storage(format!("failed to read exists flag: {e}")))
    }
}

#[derive(Debug, Clone)]
pub struct PostgresApprovalRepository {
    pool: Arc<PgPool>,
}

impl PostgresApprovalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

const SELECT_APPROVAL: &str = r#"
    SELECT
        id,
        invoice_id,
        approver_id,
        status,
        rejection_reason,
        started_at,
        completed_at
    FROM approvals
"#;

#[async_trait]
impl ApprovalRepository for PostgresApprovalRepository {
    /// Insert a new approval, or update a stored one while it is still
    /// pending. Zero affected rows means another decision won (`Conflict`).
    #[instrument(
        skip(self, approval),
        fields(approval_id = %approval.id(), status = %approval.status()),
        err
    )]
    async fn save(&self, approval: &Approval) -> RepositoryResult<()> {
        let row = ApprovalRow::from(approval);

        let result = sqlx::query(
            r#"
            INSERT INTO approvals (
                id,
                invoice_id,
                approver_id,
                status,
                rejection_reason,
                started_at,
                completed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                rejection_reason = EXCLUDED.rejection_reason,
                completed_at = EXCLUDED.completed_at,
                updated_at = NOW()
            WHERE approvals.status = 'pending'
            "#,
        )
        .bind(parse_uuid("approvals.id", &row.id)?)
        .bind(parse_uuid("approvals.invoice_id", &row.invoice_id)?)
        .bind(parse_uuid("approvals.approver_id", &row.approver_id)?)
        .bind(&row.status)
        .bind(&row.rejection_reason)
        .bind(row.started_at)
        .bind(row.completed_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_approval", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::conflict(format!(
                "approval {} was already decided",
                row.id
            )));
        }
        Ok(())
    }

    #[instrument(skip(self), fields(approval_id = %id), err)]
    async fn find_by_id(&self, id: &ApprovalId) -> RepositoryResult<Option<Approval>> {
        let Ok(uuid) = Uuid::parse_str(id.as_str()) else {
            return Ok(None);
        };

        let row = sqlx::query(&format!("{SELECT_APPROVAL} WHERE id = $1"))
            .bind(uuid)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_approval", e))?;

        row.map(|r| approval_row(&r)?.into_approval()).transpose()
    }

    #[instrument(skip(self), fields(invoice_id = %invoice_id), err)]
    async fn find_by_invoice_id(
        &self,
        invoice_id: &InvoiceRef,
    ) -> RepositoryResult<Option<Approval>> {
        let Ok(uuid) = Uuid::parse_str(invoice_id.as_str()) else {
            return Ok(None);
        };

        let row = sqlx::query(&format!(
            "{SELECT_APPROVAL} WHERE invoice_id = $1 ORDER BY started_at ASC LIMIT 1"
        ))
        .bind(uuid)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_approval_by_invoice", e))?;

        row.map(|r| approval_row(&r)?.into_approval()).transpose()
    }
}

fn parse_uuid(column: &str, value: &str) -> RepositoryResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        RepositoryError::storage(format!("{column} must be a UUID, got `{value}`: {e}"))
    })
}

fn invoice_row(row: &PgRow) -> RepositoryResult<InvoiceRow> {
    let read =
        |e: sqlx::Error| RepositoryError::storage(format!("failed to read invoice row: {e}"));
    Ok(InvoiceRow {
        id: row.try_get::<Uuid, _>("id").map_err(read)?.to_string(),
        invoice_number: row.try_get("invoice_number").map_err(read)?,
        amount: row.try_get("amount").map_err(read)?,
        submitter_id: row.try_get::<Uuid, _>("submitter_id").map_err(read)?.to_string(),
        supervisor_id: row.try_get::<Uuid, _>("supervisor_id").map_err(read)?.to_string(),
        submitted_at: row.try_get::<DateTime<Utc>, _>("submitted_at").map_err(read)?,
    })
}

fn approval_row(row: &PgRow) -> RepositoryResult<ApprovalRow> {
    let read =
        |e: sqlx::Error| RepositoryError::storage(format!("failed to read approval row: {e}"));
    Ok(ApprovalRow {
        id: row.try_get::<Uuid, _>("id").map_err(read)?.to_string(),
        invoice_id: row.try_get::<Uuid, _>("invoice_id").map_err(read)?.to_string(),
        approver_id: row.try_get::<Uuid, _>("approver_id").map_err(read)?.to_string(),
        status: row.try_get("status").map_err(read)?,
        rejection_reason: row.try_get("rejection_reason").map_err(read)?,
        started_at: row.try_get("started_at").map_err(read)?,
        completed_at: row.try_get("completed_at").map_err(read)?,
    })
}

/// Map SQLx errors to `RepositoryError`.
fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") => RepositoryError::Conflict(msg),
                _ => RepositoryError::Storage(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            RepositoryError::storage(format!("connection pool closed in {}", operation))
        }
        _ => RepositoryError::storage(format!("sqlx error in {}: {}", operation, err)),
    }
}
