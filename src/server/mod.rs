//! Server initialization and routing

use crate::api;
use crate::config::{Config, CorsConfig};
use crate::jwt::TokenVerifier;
use crate::middleware::{normalize_error_response, ObservabilityLayer};
use crate::openapi::ApiDoc;
use crate::repository::DrinkRepositoryImpl;
use crate::service::DrinkService;
use crate::state::HasDrinks;
use anyhow::Result;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, patch},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub drink_service: Arc<DrinkService<DrinkRepositoryImpl>>,
    pub token_verifier: TokenVerifier,
}

impl HasDrinks for AppState {
    type DrinkRepo = DrinkRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn drink_service(&self) -> &DrinkService<Self::DrinkRepo> {
        &self.drink_service
    }

    fn token_verifier(&self) -> &TokenVerifier {
        &self.token_verifier
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

/// Run the HTTP server. The database must already be initialized.
pub async fn run(config: Config, metrics: Option<PrometheusHandle>) -> Result<()> {
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let drink_repo = Arc::new(DrinkRepositoryImpl::new(db_pool.clone()));
    let token_verifier = TokenVerifier::from_config(&config.auth);
    info!(jwks_url = %config.auth.jwks_url, "Token verification configured");

    let http_addr = config.http_addr();
    let state = AppState {
        config: Arc::new(config),
        db_pool,
        drink_service: Arc::new(DrinkService::new(drink_repo)),
        token_verifier,
    };

    let app = build_router(state).merge(metrics_router(metrics));

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP router with generic state type
///
/// Works with the production `AppState` and with any test state that
/// implements `HasDrinks`.
pub fn build_router<S: HasDrinks>(state: S) -> Router {
    let cors = cors_layer(&state.config().cors);

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        .route("/api-docs/openapi.json", get(openapi_json))
        // Drinks
        .route(
            "/drinks",
            get(api::drink::list::<S>).post(api::drink::create::<S>),
        )
        .route("/drinks-detail", get(api::drink::list_detail::<S>))
        .route(
            "/drinks/{id}",
            patch(api::drink::update::<S>).delete(api::drink::delete::<S>),
        )
        // Innermost first: envelope, then metrics, tracing, CORS
        .layer(axum::middleware::from_fn(normalize_error_response))
        .layer(ObservabilityLayer)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// `/metrics` route, served outside the request metrics layer
pub fn metrics_router(handle: Option<PrometheusHandle>) -> Router {
    Router::new()
        .route("/metrics", get(api::metrics::metrics_handler))
        .with_state(Arc::new(handle))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::build())
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
