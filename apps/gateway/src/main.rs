//! HTTP gateway for the encore SMS workflow.
//!
//! Exposes `POST /sms` mapping the transport's JSON 1:1 onto
//! [`SmsRequest`]/[`SmsResponse`]. All routing semantics live in
//! `encore-runtime`; this binary only wires configuration, transport,
//! and telemetry.

mod config;

use anyhow::Result;
use axum::{Json, Router, extract::State, routing::get, routing::post};
use clap::Parser;
use config::GatewayConfig;
use llm::OpenAiModel;
use runtime::{SmsRequest, SmsResponse, Workflow};
use std::{path::PathBuf, sync::Arc};
use store::{HttpLinkIssuer, RestStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "encore-gateway", about = "SMS inquiry routing gateway")]
struct Args {
    /// Path to the gateway config file.
    #[arg(long, default_value = "gateway.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = GatewayConfig::load(&args.config)?;

    let model = OpenAiModel::new(
        config.model.base_url.as_str(),
        GatewayConfig::secret(&config.model.api_key_env)?,
        config.model.model.as_str(),
    );
    let store = RestStore::new(
        config.store.base_url.as_str(),
        GatewayConfig::secret(&config.store.service_key_env)?,
    );
    let links = HttpLinkIssuer::new(config.links.endpoint.as_str());

    let workflow = Arc::new(Workflow::new(
        Arc::new(model),
        Arc::new(store),
        Arc::new(links),
        config.business.clone(),
    ));

    let app = Router::new()
        .route("/sms", post(handle_sms))
        .route("/healthz", get(healthz))
        .with_state(workflow);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!(bind = %config.bind, "gateway listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown())
        .await?;

    Ok(())
}

async fn handle_sms(
    State(workflow): State<Arc<Workflow>>,
    Json(request): Json<SmsRequest>,
) -> Json<SmsResponse> {
    Json(workflow.handle(request).await)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn shutdown() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
