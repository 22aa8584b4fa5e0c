use invoiceflow_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    invoiceflow_observability::init();

    let config = AppConfig::from_env()?;
    let services = invoiceflow_api::app::services::build_services(&config).await?;
    let app = invoiceflow_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        persistent = config.uses_persistent_stores(),
        "listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
