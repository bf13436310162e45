/*
 * Responsibility
 * - Config → dependencies (user store, auth gate) → Router
 * - Apply cross-cutting middleware (HTTP, CORS)
 * - Serve with axum::serve until ctrl-c
 */
use std::sync::Arc;

use anyhow::Result;
use axum::{Router, routing::get};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::v1::dto::users::validate_email;
use crate::config::Config;
use crate::middleware;
use crate::repos::{MemoryUserStore, PgUserStore, RepoResult, Role, UserProfile, UserStore};
use crate::services::auth::SystemClock;
use crate::state::AppState;

fn init_tracing() {
    // RUST_LOG wins when set, e.g.
    // RUST_LOG=info,booking_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    info!(
        "starting booking-api in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

async fn build_state(config: &Config) -> Result<AppState> {
    let users: Arc<dyn UserStore> = match &config.database_url {
        Some(url) => Arc::new(PgUserStore::connect(url).await?),
        None => {
            warn!("DATABASE_URL not set; users are kept in memory and lost on restart");
            Arc::new(MemoryUserStore::new())
        }
    };
    info!(backend = users.backend_name(), "user store ready");

    seed_admins(users.as_ref(), &config.bootstrap_admin_emails).await?;

    Ok(AppState::new(&config.auth(), users, Arc::new(SystemClock)))
}

/// Upsert each configured email and give it the admin role.
async fn seed_admins(users: &dyn UserStore, emails: &[String]) -> RepoResult<()> {
    for email in emails {
        if let Err(reason) = validate_email(email) {
            warn!(email = %email, reason, "skipping invalid bootstrap admin email");
            continue;
        }
        users.upsert(email, UserProfile::default()).await?;
        users.set_role(email, Role::Admin).await?;
        info!(email = %email, "bootstrap admin ensured");
    }
    Ok(())
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/", get(api::v1::handlers::health::home))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
