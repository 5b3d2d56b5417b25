//! Axum application setup.

use axum::{
    Router,
    http::{HeaderValue, request::Parts},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Only pages served from this machine may call the API
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _: &Parts| {
            is_local_origin(origin)
        }))
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Dataset
        .route("/load", post(handlers::load_dataset))
        .route("/sample", post(handlers::load_sample))
        // View
        .route("/view", get(handlers::get_view))
        .route("/search", post(handlers::set_search))
        .route("/sort", post(handlers::request_sort))
        .route("/page", post(handlers::go_to_page))
        .route("/page-size", post(handlers::set_page_size))
        .route("/mode", post(handlers::set_mode))
        // Columns
        .route("/columns", get(handlers::get_columns))
        .route("/columns/toggle", post(handlers::toggle_column))
        .route("/columns/all", post(handlers::set_all_columns))
        .route("/columns/reorder", post(handlers::reorder_columns))
        // Export
        .route("/export/json", get(handlers::export_json))
        .route("/export/csv", get(handlers::export_csv))
        .route("/clipboard", get(handlers::get_clipboard));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// `http://localhost`, `http://127.0.0.1` or `http://[::1]`, with any port.
fn is_local_origin(origin: &HeaderValue) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    let Some(authority) = origin.strip_prefix("http://") else {
        return false;
    };
    let host = match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            host
        }
        _ => authority,
    };
    matches!(host, "localhost" | "127.0.0.1" | "[::1]")
}

/// Start the web server and run until Ctrl+C.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tabview::Session;
    use tabview::persistence::{MemoryStore, PreferenceGateway};
    use tower::ServiceExt;

    fn router() -> Router {
        let session = Session::new(PreferenceGateway::new(Arc::new(MemoryStore::new())));
        create_router(AppState::new(session))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let (status, bytes) = send(app, Request::get(uri).body(Body::empty()).unwrap()).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn load_people(app: &Router) {
        let mut text = String::from("id,name\n");
        for i in 1..=12 {
            text.push_str(&format!("{i},person{i}\n"));
        }
        let (status, _) = post(app, "/api/load", json!({"name": "people.csv", "text": text})).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_local_origins() {
        for origin in ["http://localhost:3141", "http://127.0.0.1", "http://[::1]:8080"] {
            assert!(is_local_origin(&HeaderValue::from_static(origin)), "{origin}");
        }
        for origin in [
            "https://evil.example",
            "http://localhost.evil.example",
            "https://localhost:3141",
            "null",
        ] {
            assert!(!is_local_origin(&HeaderValue::from_static(origin)), "{origin}");
        }
    }

    #[tokio::test]
    async fn test_cross_origin_path_load_is_refused() {
        let dir = tempfile::TempDir::new().unwrap();
        let secret = dir.path().join("secret.txt");
        std::fs::write(&secret, "token\nhunter2\n").unwrap();

        let app = router();
        let request = Request::post("/api/load")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ORIGIN, "https://evil.example")
            .body(Body::from(json!({"path": secret}).to_string()))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(
            !response
                .headers()
                .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!String::from_utf8_lossy(&body).contains("hunter2"));

        let (status, _) = get_json(&app, "/api/view").await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_local_origin_is_allowed() {
        let app = router();
        let request = Request::post("/api/sample")
            .header(header::ORIGIN, "http://localhost:3141")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3141"
        );
    }

    #[tokio::test]
    async fn test_view_without_dataset_is_conflict() {
        let app = router();
        let (status, body) = get_json(&app, "/api/view").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "no_dataset");
    }

    #[tokio::test]
    async fn test_sample_then_view() {
        let app = router();
        let (status, body) = post(&app, "/api/sample", json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["identity"], "sample_data.csv");
        assert_eq!(body["summary"]["total_rows"], 3);
        assert_eq!(body["rows"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_search_sort_and_page() {
        let app = router();
        load_people(&app).await;

        let (_, body) = post(&app, "/api/page", json!({"to": "last"})).await;
        assert_eq!(body["page"]["index"], 2);
        assert_eq!(body["page"]["range"], json!([11, 12]));

        let (_, body) = post(&app, "/api/search", json!({"term": "PERSON1"})).await;
        assert_eq!(body["page"]["index"], 1);
        assert_eq!(body["summary"]["matched_rows"], 4);

        post(&app, "/api/sort", json!({"field": "id"})).await;
        let (_, body) = post(&app, "/api/sort", json!({"field": "id"})).await;
        assert_eq!(body["sort"]["direction"], "descending");
        assert_eq!(body["rows"][0]["cells"], json!(["12", "person12"]));
    }

    #[tokio::test]
    async fn test_unknown_sort_field_is_not_found() {
        let app = router();
        load_people(&app).await;
        let (status, body) = post(&app, "/api/sort", json!({"field": "nope"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "unknown_field");
    }

    #[tokio::test]
    async fn test_failed_load_keeps_dataset() {
        let app = router();
        load_people(&app).await;

        let (status, _) = post(&app, "/api/load", json!({"name": "dup.csv", "text": "a,a\n1,2"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, body) = get_json(&app, "/api/view").await;
        assert_eq!(body["identity"], "people.csv");
    }

    #[tokio::test]
    async fn test_columns_toggle_and_reorder() {
        let app = router();
        load_people(&app).await;

        let (_, body) = post(&app, "/api/columns/reorder", json!({"from": 1, "to": 0})).await;
        assert_eq!(body["columns"][0]["name"], "name");

        let (_, body) = post(&app, "/api/columns/toggle", json!({"field": "id"})).await;
        assert_eq!(body["visible_count"], 1);

        let (status, _) = post(&app, "/api/columns/reorder", json!({"from": 0, "to": 5})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = get_json(&app, "/api/view").await;
        assert_eq!(body["columns"], json!(["name"]));
    }

    #[tokio::test]
    async fn test_csv_export_download() {
        let app = router();
        load_people(&app).await;
        post(&app, "/api/search", json!({"term": "person12"})).await;

        let response = app
            .clone()
            .oneshot(Request::get("/api/export/csv").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"people_export.csv\""
        );
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"id,name\r\n12,person12");
    }

    #[tokio::test]
    async fn test_empty_export_is_unprocessable() {
        let app = router();
        load_people(&app).await;
        post(&app, "/api/search", json!({"term": "zzz"})).await;

        let (status, body) = get_json(&app, "/api/export/json").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "empty_data");
    }

    #[tokio::test]
    async fn test_json_mode_includes_payload() {
        let app = router();
        load_people(&app).await;
        post(&app, "/api/page-size", json!({"page_size": 1})).await;

        let (_, body) = post(&app, "/api/mode", json!({"mode": "json"})).await;
        let payload: Value = serde_json::from_str(body["json"].as_str().unwrap()).unwrap();
        assert_eq!(payload, json!([{"id": "1", "name": "person1"}]));

        let (_, clip) = get_json(&app, "/api/clipboard").await;
        assert_eq!(clip["text"], body["json"]);
    }
}
