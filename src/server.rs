// http server mode - what the browser extension talks to

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::core::{ClassificationResult, ConnectionReport, PageRequest};
use crate::settings::{ModelOption, ProviderConfig, Service, Settings, SettingsStore};
use crate::{Classifier, Error};

struct AppState {
    classifier: Classifier,
    store: SettingsStore,
    // latest saved settings, cloned out before every classification
    settings: RwLock<Settings>,
}

#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub struct Server;

impl Server {
    pub async fn run(store: SettingsStore, host: &str, port: u16) -> Result<(), Error> {
        let app = Self::router(store, Classifier::new())?;

        let addr = format!("{host}:{port}");
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        tracing::info!("server running at http://{addr}");

        axum::serve(listener, app)
            .await
            .map_err(|e| Error::Server(e.to_string()))?;

        Ok(())
    }

    /// Routes with settings loaded from `store`.
    pub fn router(store: SettingsStore, classifier: Classifier) -> Result<Router, Error> {
        let settings = store.load()?;
        tracing::debug!(path = %store.path().display(), ?settings, "settings loaded");

        let state = Arc::new(AppState {
            classifier,
            store,
            settings: RwLock::new(settings),
        });

        Ok(Router::new()
            .route("/health", get(health))
            .route("/classify", post(classify))
            .route("/settings", get(get_settings).post(update_settings))
            .route("/settings/test", post(test_connection))
            .route("/models/{service}", get(models))
            .layer(CorsLayer::permissive())
            .with_state(state))
    }
}

async fn health() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}

async fn classify(
    State(state): State<Arc<AppState>>,
    Json(page): Json<PageRequest>,
) -> Json<ClassificationResult> {
    // snapshot so the lock isn't held across the provider call
    let settings = state.settings.read().await.clone();
    Json(state.classifier.classify(&page, &settings).await)
}

async fn get_settings(State(state): State<Arc<AppState>>) -> Json<Settings> {
    Json(state.settings.read().await.masked())
}

async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(mut incoming): Json<Settings>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<ErrorResponse>)> {
    let mut current = state.settings.write().await;

    // a form filled from GET /settings posts the masked key back, keep the real one
    if current.ai_settings.has_api_key()
        && incoming.ai_settings.api_key == current.ai_settings.masked_key()
    {
        incoming.ai_settings.api_key = current.ai_settings.api_key.clone();
    }

    state.store.save(&incoming).map_err(|e| {
        tracing::error!(error = %e, "could not save settings");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    *current = incoming;
    tracing::info!(service = %current.ai_settings.service, "settings updated");

    Ok(Json(StatusResponse {
        status: "Settings updated",
    }))
}

async fn test_connection(
    State(state): State<Arc<AppState>>,
    Json(config): Json<ProviderConfig>,
) -> Json<ConnectionReport> {
    Json(state.classifier.test_connection(&config).await)
}

async fn models(
    Path(service): Path<String>,
) -> Result<Json<&'static [ModelOption]>, (StatusCode, Json<ErrorResponse>)> {
    let service: Service = service.parse().map_err(|e: Error| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;
    Ok(Json(service.models()))
}
