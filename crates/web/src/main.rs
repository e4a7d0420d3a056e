use anyhow::Context;

use detailing_web::config::WebConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    detailing_observability::init();

    let config = WebConfig::from_env().context("invalid configuration")?;
    let bind_addr = config.bind_addr;
    tracing::info!(api_url = %config.api_url, environment = ?config.environment, "starting");

    let app = detailing_web::app::build_app(config).context("failed to build application")?;

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
