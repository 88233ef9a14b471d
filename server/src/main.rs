mod config;
mod db;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "no .env file loaded");
    }

    let config = config::ServerConfig::from_env().expect("invalid server configuration");

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");

    // Seeding is non-fatal: the server still answers lookups for existing users.
    if let Some(seed) = &config.admin_seed {
        match services::users::upsert_user(&pool, &seed.username, &seed.password).await {
            Ok(id) => tracing::info!(%id, username = %seed.username, "admin user seeded"),
            Err(e) => tracing::warn!(error = %e, username = %seed.username, "admin user seed failed"),
        }
    }

    let state = state::AppState::new(pool);

    let app = routes::app(state).expect("leptos app init failed");
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "estate admin listening");
    axum::serve(listener, app).await.expect("server failed");
}
