//! Database wiring: connection pool and schema bootstrap.

use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::DatabaseConfig;

/// Connect to Postgres and make sure the tables exist.
pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .context("failed to connect to Postgres")?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Create the `invoices` and `approvals` tables and their indexes if missing.
pub async fn ensure_schema(pool: &PgPool) -> anyhow::Result<()> {
    const STATEMENTS: &[(&str, &str)] = &[
        (
            "invoices",
            r#"
            CREATE TABLE IF NOT EXISTS invoices (
                id             UUID PRIMARY KEY,
                invoice_number VARCHAR(20) NOT NULL UNIQUE,
                amount         NUMERIC(15, 2) NOT NULL,
                submitter_id   UUID NOT NULL,
                supervisor_id  UUID NOT NULL,
                submitted_at   TIMESTAMPTZ NOT NULL,
                created_at     TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at     TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        ),
        (
            "invoices_submitter_id_index",
            "CREATE INDEX IF NOT EXISTS invoices_submitter_id_index ON invoices (submitter_id)",
        ),
        (
            "invoices_supervisor_id_index",
            "CREATE INDEX IF NOT EXISTS invoices_supervisor_id_index ON invoices (supervisor_id)",
        ),
        (
            "approvals",
            r#"
            CREATE TABLE IF NOT EXISTS approvals (
                id               UUID PRIMARY KEY,
                invoice_id       UUID NOT NULL,
                approver_id      UUID NOT NULL,
                status           VARCHAR(20) NOT NULL DEFAULT 'pending',
                rejection_reason TEXT NULL,
                started_at       TIMESTAMPTZ NOT NULL,
                completed_at     TIMESTAMPTZ NULL,
                created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        ),
        (
            "approvals_invoice_id_index",
            "CREATE INDEX IF NOT EXISTS approvals_invoice_id_index ON approvals (invoice_id)",
        ),
        (
            "approvals_approver_id_index",
            "CREATE INDEX IF NOT EXISTS approvals_approver_id_index ON approvals (approver_id)",
        ),
        (
            "approvals_status_index",
            "CREATE INDEX IF NOT EXISTS approvals_status_index ON approvals (status)",
        ),
    ];

    for (name, sql) in STATEMENTS {
        sqlx::query(sql)
            .execute(pool)
            .await
            .with_context(|| format!("failed to create {name}"))?;
    }

    tracing::info!("database schema ready");
    Ok(())
}
