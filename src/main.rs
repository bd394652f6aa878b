use hanami_api::config::AppConfig;
use hanami_api::routes::app;
use hanami_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    tracing::info!("Starting Hanami API in {:?} mode", config.environment);

    let port = config.server.port;
    let state = AppState::new(config);
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Hanami API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
