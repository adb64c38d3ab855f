use crate::error::Error;
use crate::providers::ProviderRegistry;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ProviderRegistry>,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    id: Option<String>,
}

/// `{"error": ..}` body with an HTTP status, the only error shape callers see.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match &err {
            Error::Configuration(detail) => error!("Server misconfiguration: {}", detail),
            Error::Http(source) => warn!("Upstream request failed: {}", source),
            _ => {}
        }

        Self {
            status: StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: err.public_message(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

pub fn router(registry: ProviderRegistry) -> Router {
    let state = AppState {
        registry: Arc::new(registry),
    };

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/{host}", get(lookup))
        .with_state(state)
}

pub async fn serve(listener: TcpListener, registry: ProviderRegistry) -> anyhow::Result<()> {
    info!("Gateway listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(registry))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", err);
    }
}

async fn healthz() -> &'static str {
    "ok"
}

async fn lookup(
    State(state): State<AppState>,
    Path(host): Path<String>,
    query: Result<Query<LookupQuery>, QueryRejection>,
) -> Result<Json<crate::core::VideoEntry>, ApiError> {
    // A query string serde cannot read gets the same answer as a missing id
    let id = match query {
        Ok(Query(query)) => query.id.unwrap_or_default(),
        Err(rejection) => {
            debug!("Rejected lookup query: {}", rejection);
            String::new()
        }
    };
    if id.is_empty() {
        return Err(Error::validation("Provide video link or Id").into());
    }

    let entry = state.registry.lookup(&host, &id).await?;
    Ok(Json(entry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_configuration_error_is_generic_500() {
        let response = ApiError::from(Error::Configuration("YOUTUBE_API_KEY is not set".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Unknown server error");
    }

    #[tokio::test]
    async fn test_upstream_status_passes_through() {
        let response = ApiError::from(Error::upstream(403, Some("quotaExceeded".into()))).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"], "quotaExceeded");
    }

    #[tokio::test]
    async fn test_missing_id_is_bad_request() {
        let state = AppState {
            registry: Arc::new(ProviderRegistry::new()),
        };
        let result = lookup(
            State(state),
            Path("youtube".to_string()),
            Ok(Query(LookupQuery { id: None })),
        )
        .await;

        let response = result.unwrap_err().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Provide video link or Id");
    }
}
