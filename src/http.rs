//! HTTP API server: flowchart and entity endpoints over axum.

use crate::acquire;
use crate::annotate::{Annotator, NamedEntity};
use crate::config::Config;
use crate::error::{Result, WordlitError};
use crate::pipeline;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Check if a port is available by attempting to bind to it
async fn check_port_available(port: u16) -> bool {
    tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .is_ok()
}

/// HTTP server wrapper
pub struct HttpServer {
    annotator: Arc<dyn Annotator>,
    config: Config,
}

impl HttpServer {
    pub fn new(annotator: Arc<dyn Annotator>, config: Config) -> Self {
        Self { annotator, config }
    }

    /// Run the HTTP server
    pub async fn run(&self, port: u16) -> Result<()> {
        let app = self.create_router();

        let addr = format!("127.0.0.1:{}", port);
        log::info!("Starting Wordlit HTTP server on http://{}", addr);
        log::info!("Flowchart endpoint: http://{}/api/flowchart", addr);

        if !check_port_available(port).await {
            return Err(WordlitError::Config(format!(
                "Port {} is already in use. Stop the other process or set http_server.port in config.toml.",
                port
            )));
        }

        let listener = tokio::net::TcpListener::bind(&addr).await?;

        axum::serve(listener, app).await.map_err(|e| {
            WordlitError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("HTTP server error: {}", e),
            ))
        })?;

        Ok(())
    }

    /// Create the axum router
    fn create_router(&self) -> Router {
        let allowed_origins = self.config.http_server.allowed_origins.clone();

        // Build CORS layer.
        // - If allowed_origins is configured: restrict to those origins.
        // - If empty (local dev): allow Any for convenience.
        let cors = if allowed_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<axum::http::HeaderValue> = allowed_origins
                .iter()
                .filter_map(|o| o.parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .route("/api/flowchart", post(handle_flowchart))
            .route("/api/entities", post(handle_entities))
            .route("/health", get(handle_health))
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
            .with_state(AppState::new(
                Arc::clone(&self.annotator),
                acquire::build_fetch_client(&self.config.fetch),
                self.config.annotator.entity_window_chars,
            ))
    }
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    annotator: Arc<dyn Annotator>,
    fetch_client: reqwest::Client,
    entity_window_chars: usize,
    /// Last raw input text, reused when a request carries no input.
    /// Presentation-layer session state; the core stays a pure function
    /// of the text passed to it.
    last_text: Arc<Mutex<Option<String>>>,
}

impl AppState {
    fn new(
        annotator: Arc<dyn Annotator>,
        fetch_client: reqwest::Client,
        entity_window_chars: usize,
    ) -> Self {
        Self {
            annotator,
            fetch_client,
            entity_window_chars,
            last_text: Arc::new(Mutex::new(None)),
        }
    }

    /// Resolve the input text for a request: inline text wins, then URL
    /// fetch, then the cached last submission.
    async fn resolve_text(&self, text: Option<String>, url: Option<String>) -> Result<String> {
        let resolved = if let Some(text) = text {
            text
        } else if let Some(url) = url {
            acquire::fetch_url(&self.fetch_client, &url).await?
        } else {
            self.last_text.lock().unwrap().clone().ok_or_else(|| {
                WordlitError::InvalidInput(
                    "No input: provide \"text\" or \"url\" (no previous submission to reuse)"
                        .to_string(),
                )
            })?
        };

        *self.last_text.lock().unwrap() = Some(resolved.clone());
        Ok(resolved)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FlowchartRequest {
    text: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct EdgeBody {
    source: String,
    target: String,
}

#[derive(Debug, Serialize)]
struct FlowchartResponse {
    nodes: Vec<String>,
    edges: Vec<EdgeBody>,
    /// Processing time in seconds, rounded to two decimals
    seconds: f64,
    dot: String,
}

#[derive(Debug, Default, Deserialize)]
struct EntitiesRequest {
    text: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Round fractional seconds to two decimals for display.
fn round_seconds(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

/// Map a core error to an HTTP status + message body.
fn error_response(err: WordlitError) -> (StatusCode, String) {
    let status = match &err {
        WordlitError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        WordlitError::Acquire(_) | WordlitError::Annotate(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

async fn handle_flowchart(
    State(state): State<AppState>,
    Json(request): Json<FlowchartRequest>,
) -> std::result::Result<Json<FlowchartResponse>, (StatusCode, String)> {
    let text = state
        .resolve_text(request.text, request.url)
        .await
        .map_err(error_response)?;

    let flowchart = pipeline::build_flowchart(state.annotator.as_ref(), &text)
        .await
        .map_err(error_response)?;

    let edges = flowchart
        .graph
        .edges()
        .map(|(source, target)| EdgeBody {
            source: source.to_string(),
            target: target.to_string(),
        })
        .collect();

    Ok(Json(FlowchartResponse {
        nodes: flowchart.graph.nodes().to_vec(),
        edges,
        seconds: round_seconds(flowchart.elapsed_seconds()),
        dot: flowchart.graph.to_dot(),
    }))
}

async fn handle_entities(
    State(state): State<AppState>,
    Json(request): Json<EntitiesRequest>,
) -> std::result::Result<Json<Vec<NamedEntity>>, (StatusCode, String)> {
    let text = state
        .resolve_text(request.text, request.url)
        .await
        .map_err(error_response)?;

    let entities =
        pipeline::list_entities(state.annotator.as_ref(), &text, state.entity_window_chars)
            .await
            .map_err(error_response)?;

    Ok(Json(entities))
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::{Document, DocumentBuilder};
    use crate::config::FetchConfig;
    use async_trait::async_trait;

    struct StubAnnotator {
        doc: Document,
    }

    #[async_trait]
    impl Annotator for StubAnnotator {
        async fn parse(&self, _text: &str) -> Result<Document> {
            Ok(self.doc.clone())
        }

        async fn entities(&self, _text: &str) -> Result<Vec<NamedEntity>> {
            Ok(vec![NamedEntity {
                text: "Alice".to_string(),
                label: "PERSON".to_string(),
            }])
        }
    }

    fn alice_doc() -> Document {
        let mut b = DocumentBuilder::new();
        let alice = b.push("Alice", "nsubj");
        let bought = b.push("bought", "ROOT");
        let car = b.push("car", "dobj");
        b.attach_left(bought, alice);
        b.attach_right(bought, car);
        b.build()
    }

    fn test_state() -> AppState {
        AppState::new(
            Arc::new(StubAnnotator { doc: alice_doc() }),
            acquire::build_fetch_client(&FetchConfig::default()),
            6000,
        )
    }

    #[test]
    fn test_round_seconds() {
        assert_eq!(round_seconds(0.12345), 0.12);
        assert_eq!(round_seconds(1.999), 2.0);
        assert_eq!(round_seconds(0.0), 0.0);
    }

    #[tokio::test]
    async fn test_flowchart_handler_with_text() {
        let state = test_state();
        let request = FlowchartRequest {
            text: Some("Alice bought a car.".to_string()),
            url: None,
        };
        let Json(body) = handle_flowchart(State(state), Json(request)).await.unwrap();
        assert_eq!(body.nodes, vec!["Alice", "car"]);
        assert_eq!(body.edges.len(), 1);
        assert_eq!(body.edges[0].source, "Alice");
        assert_eq!(body.edges[0].target, "car");
        assert!(body.seconds >= 0.0);
        assert!(body.dot.contains("\"Alice\" -> \"car\""));
    }

    #[tokio::test]
    async fn test_missing_input_is_bad_request() {
        let state = test_state();
        let result = handle_flowchart(State(state), Json(FlowchartRequest::default())).await;
        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_last_text_reused_across_requests() {
        let state = test_state();

        let first = FlowchartRequest {
            text: Some("Alice bought a car.".to_string()),
            url: None,
        };
        handle_flowchart(State(state.clone()), Json(first))
            .await
            .unwrap();

        // No input this time: the cached submission is reused
        let Json(body) = handle_flowchart(State(state), Json(FlowchartRequest::default()))
            .await
            .unwrap();
        assert_eq!(body.nodes, vec!["Alice", "car"]);
    }

    #[tokio::test]
    async fn test_entities_handler() {
        let state = test_state();
        let request = EntitiesRequest {
            text: Some("Alice bought a car.".to_string()),
            url: None,
        };
        let Json(entities) = handle_entities(State(state), Json(request)).await.unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "Alice");
        assert_eq!(entities[0].label, "PERSON");
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(body) = handle_health().await;
        assert_eq!(body.status, "ok");
    }
}
