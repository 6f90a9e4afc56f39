use tower_http::trace::TraceLayer;
use yeda_api::{ApiConfig, ApiState, middleware::cors::cors_layer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    yeda_api::tracing::init_tracing(config.env);

    // Initialize the application state, selecting the storage backend
    let state = ApiState::new(&config).await?;

    // Create the application router
    let app = yeda_api::router::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.allowed_origins.as_deref()));

    // Start the server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
