use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

mod catalog;
mod config;
mod dashboard;
mod predictor;

use config::Config;
use dashboard::{AppState, ModelStatus};
use predictor::{LogisticPipeline, Predictor};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    // Load the model once; a failure leaves the form disabled for the
    // lifetime of the process.
    let model = match LogisticPipeline::load(&config.model_path) {
        Ok(pipeline) => {
            let width = pipeline.encoded_width();
            let predictor = Predictor::new(Arc::new(pipeline));
            info!(
                "Model '{}' loaded from {} ({} encoded features)",
                predictor.oracle_name(),
                config.model_path,
                width
            );
            ModelStatus::Ready(predictor)
        }
        Err(e) => {
            error!("Error loading model: {}", e);
            ModelStatus::Unavailable(format!("Error loading model: {e}"))
        }
    };

    let app = dashboard::router(AppState {
        model,
        model_path: config.model_path.clone(),
    });
    let addr: SocketAddr = config.listen_addr.parse()?;
    info!("Predictor listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
