mod app;
mod request;

use anyhow::{Context, Result};
use restful_routing::{Config, EnglishInflector};
use std::env;
use std::sync::Arc;
use tracing::{info, warn};

use crate::app::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    info!("restful-server starting...");

    let config = Config::load_default().unwrap_or_else(|e| {
        warn!("Failed to load config: {:#}, using defaults", e);
        Config::default()
    });

    let host = env::var("RESTFUL_HOST").unwrap_or_else(|_| config.server.host.clone());
    let port = env::var("RESTFUL_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    // Registration ends here: the frozen table is read-only from now on
    let mut table = config.route_table();
    config.register(&mut table, Arc::new(EnglishInflector::new()));
    let table = table.freeze();

    info!("Registered {} routes", table.len());
    for route in table.iter() {
        info!("  {}", route);
    }

    let state = AppState::new(table, config.routing.method_override());
    let app = app::router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
