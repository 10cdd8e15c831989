//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::domains::provisioning::context::ProvisioningContext;
use crate::domains::provisioning::routes::scim_routes;
use crate::domains::provisioning::service::{TenantAuthService, UserDirectoryService};
use crate::middleware::ObservabilityLayer;
use crate::repository::{
    organisation_token::OrganisationTokenRepositoryImpl, scim_user::ScimUserRepositoryImpl,
    user_attribute::UserAttributeRepositoryImpl,
};
use crate::state::{HasScimServices, HasServices};
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub tenant_auth_service: Arc<TenantAuthService<OrganisationTokenRepositoryImpl>>,
    pub user_directory_service:
        Arc<UserDirectoryService<ScimUserRepositoryImpl, UserAttributeRepositoryImpl>>,
}

impl AppState {
    /// Wire repositories and services over an existing pool.
    pub fn new(config: Config, db_pool: MySqlPool) -> Self {
        let token_repo = Arc::new(OrganisationTokenRepositoryImpl::new(db_pool.clone()));
        let user_repo = Arc::new(ScimUserRepositoryImpl::new(db_pool.clone()));
        let attribute_repo = Arc::new(UserAttributeRepositoryImpl::new(db_pool.clone()));

        Self {
            config: Arc::new(config),
            db_pool,
            tenant_auth_service: Arc::new(TenantAuthService::new(token_repo)),
            user_directory_service: Arc::new(UserDirectoryService::new(
                user_repo,
                attribute_repo,
            )),
        }
    }
}

impl HasServices for AppState {
    fn config(&self) -> &Config {
        &self.config
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

impl HasScimServices for AppState {
    type OrganisationTokenRepo = OrganisationTokenRepositoryImpl;
    type ScimUserRepo = ScimUserRepositoryImpl;
    type UserAttributeRepo = UserAttributeRepositoryImpl;

    fn tenant_auth_service(&self) -> &TenantAuthService<Self::OrganisationTokenRepo> {
        &self.tenant_auth_service
    }

    fn user_directory_service(
        &self,
    ) -> &UserDirectoryService<Self::ScimUserRepo, Self::UserAttributeRepo> {
        &self.user_directory_service
    }
}

/// Run the HTTP server until SIGINT/SIGTERM.
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    info!("Connected to database");

    let http_addr = config.http_addr();
    let state = AppState::new(config, db_pool);
    let app = build_router(state, prometheus_handle);

    let listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("Failed to bind {}", http_addr))?;
    info!("HTTP server started on {}", http_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Build the HTTP router with generic state type
///
/// Works with both the production `AppState` and test states. `/metrics` is
/// mounted only when a Prometheus handle is supplied.
pub fn build_router<S: ProvisioningContext>(
    state: S,
    prometheus_handle: Option<PrometheusHandle>,
) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .merge(scim_routes(state.clone()))
        .with_state(state);

    if let Some(handle) = prometheus_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(api::metrics::metrics_handler))
                .with_state(Arc::new(Some(handle))),
        );
    }

    router
        .layer(ObservabilityLayer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
