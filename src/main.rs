use std::sync::Arc;

use wishgate::config::ProviderConfig;
use wishgate::identity::HeaderIdentity;
use wishgate::provider::ProviderClient;
use wishgate::routes;
use wishgate::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Missing provider secrets are logged inside from_env but do not abort;
    // requests made against an empty config fail upstream instead.
    let config = ProviderConfig::from_env();
    let backend = ProviderClient::new(config).expect("HTTP client build failed");

    let state = AppState::new(Arc::new(backend), Arc::new(HeaderIdentity));
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "wishgate listening");
    axum::serve(listener, app).await.expect("server failed");
}
