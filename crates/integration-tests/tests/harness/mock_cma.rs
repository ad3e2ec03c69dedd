//! Mock Content Management API server for integration tests
//!
//! Serves a single space ("playground") with canned entries and returns the
//! API's documented error bodies for everything else

use std::net::SocketAddr;

use axum::Router;
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::{Json, routing};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Space id the mock knows about
pub const SPACE_ID: &str = "playground";

/// Entry id the mock knows about
pub const ENTRY_ID: &str = "nyancat";

/// Mock management API backend with predictable responses
pub struct MockCma {
    addr: SocketAddr,
    shutdown: CancellationToken,
}

impl MockCma {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None).await
    }

    /// Start a mock that answers every request with 429 and a reset header
    pub async fn start_rate_limited(reset_seconds: u64) -> anyhow::Result<Self> {
        Self::start_inner(Some(reset_seconds)).await
    }

    async fn start_inner(rate_limit_reset: Option<u64>) -> anyhow::Result<Self> {
        let app = if let Some(reset) = rate_limit_reset {
            Router::new().fallback(move || async move { rate_limited(reset) })
        } else {
            Router::new()
                .route("/spaces/{space_id}", routing::get(handle_space))
                .route(
                    "/spaces/{space_id}/environments/{env}/entries",
                    routing::get(handle_entries).post(handle_create_entry),
                )
                .route(
                    "/spaces/{space_id}/environments/{env}/entries/{entry_id}",
                    routing::get(handle_entry).put(handle_update_entry),
                )
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown })
    }

    /// Base URL for pointing a client at the mock
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for MockCma {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

// -- Canned resources --

fn space_json(space_id: &str) -> Value {
    json!({
        "sys": {"id": space_id, "type": "Space", "version": 2},
        "name": "Playground",
    })
}

fn entry_json(entry_id: &str) -> Value {
    json!({
        "sys": {
            "id": entry_id,
            "type": "Entry",
            "version": 4,
            "publishedVersion": 3,
            "contentType": {
                "sys": {"id": "cat", "type": "Link", "linkType": "ContentType"},
            },
        },
        "fields": {
            "name": {"en-US": "Nyan Cat"},
        },
    })
}

// -- Error bodies, matching the documented wire shapes --

fn not_found(resource_type: &str, id: &str) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "The resource could not be found.",
            "details": {"type": resource_type, "id": id},
            "requestId": "mock-req-1",
        })),
    )
}

fn rate_limited(reset_seconds: u64) -> impl IntoResponse {
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-contentful-ratelimit-reset",
        reset_seconds.to_string().parse().expect("valid header"),
    );

    (
        StatusCode::TOO_MANY_REQUESTS,
        headers,
        Json(json!({
            "message": "You are sending too many requests.",
            "requestId": "mock-req-2",
        })),
    )
}

// -- Handlers --

async fn handle_space(Path(space_id): Path<String>) -> axum::response::Response {
    if space_id == SPACE_ID {
        Json(space_json(&space_id)).into_response()
    } else {
        not_found("Space", &space_id).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct Pagination {
    #[serde(default)]
    skip: u64,
    #[serde(default = "default_limit")]
    limit: u64,
}

const fn default_limit() -> u64 {
    100
}

async fn handle_entries(
    Path((space_id, _env)): Path<(String, String)>,
    Query(pagination): Query<Pagination>,
) -> axum::response::Response {
    if space_id != SPACE_ID {
        return not_found("Space", &space_id).into_response();
    }

    Json(json!({
        "total": 1,
        "skip": pagination.skip,
        "limit": pagination.limit,
        "items": [entry_json(ENTRY_ID)],
    }))
    .into_response()
}

async fn handle_entry(
    Path((space_id, _env, entry_id)): Path<(String, String, String)>,
) -> axum::response::Response {
    if space_id != SPACE_ID {
        return not_found("Space", &space_id).into_response();
    }
    if entry_id != ENTRY_ID {
        return not_found("Entry", &entry_id).into_response();
    }

    Json(entry_json(&entry_id)).into_response()
}

/// Rejects entries missing a `name` field, mimicking schema validation
async fn handle_create_entry(
    Path((space_id, _env)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    if space_id != SPACE_ID {
        return not_found("Space", &space_id).into_response();
    }

    let has_name = body
        .get("fields")
        .and_then(|fields| fields.get("name"))
        .is_some();

    if has_name {
        return (StatusCode::CREATED, Json(entry_json("generated-id"))).into_response();
    }

    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "message": "Validation error",
            "details": {
                "errors": [
                    {"name": "required", "path": "fields.name"},
                ],
            },
            "requestId": "mock-req-3",
        })),
    )
        .into_response()
}

/// Rejects updates whose version header does not match the stored version
async fn handle_update_entry(
    Path((space_id, _env, entry_id)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(_body): Json<Value>,
) -> axum::response::Response {
    if space_id != SPACE_ID || entry_id != ENTRY_ID {
        return not_found("Entry", &entry_id).into_response();
    }

    let version = headers
        .get("x-contentful-version")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u32>().ok());

    if version == Some(4) {
        Json(entry_json(&entry_id)).into_response()
    } else {
        (
            StatusCode::CONFLICT,
            Json(json!({
                "message": "Version mismatch",
                "requestId": "mock-req-4",
            })),
        )
            .into_response()
    }
}
