use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use app_utils::{init_tracing, Config};
use classroom_api::client::Client;
use grader::completions::OpenAiCompletions;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::{router, AppState};

mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env()?;

    let completions = OpenAiCompletions::new(
        config.model_api_key.as_str(),
        config.model_api_base.as_deref(),
        config.model.clone(),
    );
    let classroom = Client::new()?;
    let state = Arc::new(AppState {
        classroom,
        completions,
    });

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    info!(%addr, "server is running");

    axum::serve(listener, router(state)).await?;

    Ok(())
}
