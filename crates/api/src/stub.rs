//! In-memory stand-in for the public `/users` service
//!
//! Mirrors the public service's observed behaviour, including the cases the
//! known-failure scenarios trip over: unknown users answer 404 on read and
//! 500 on replace, deletes always answer 200, and nothing is persisted.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use sitecheck_common::{Album, PersonRecord, Post, RecordGenerator, Todo};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::ApiResult;
use crate::scenarios::{ALBUMS_PER_USER, POSTS_PER_USER, TODOS_PER_USER, USER_COUNT};

const SEED: u64 = 0x5eed;

const TITLE_WORDS: &[&str] = &[
    "sunt", "aut", "facere", "repellat", "provident", "occaecati", "excepturi", "optio",
    "reprehenderit", "qui", "est", "esse", "dolorem", "ipsum", "nesciunt", "quas",
];

/// Fixture data served by the stub
#[derive(Debug)]
pub struct StubState {
    users: Vec<PersonRecord>,
    posts: Vec<Post>,
    todos: Vec<Todo>,
    albums: Vec<Album>,
}

impl StubState {
    /// Deterministic fixtures: ten users, each with posts, todos and albums
    pub fn seeded() -> Self {
        let mut generator = RecordGenerator::seeded(SEED);
        let users: Vec<PersonRecord> = (1..=USER_COUNT as u32)
            .map(|id| generator.person().with_id(id))
            .collect();

        let mut posts = Vec::new();
        let mut todos = Vec::new();
        let mut albums = Vec::new();
        for user_id in 1..=USER_COUNT as u32 {
            for n in 0..POSTS_PER_USER as u32 {
                let id = (user_id - 1) * POSTS_PER_USER as u32 + n + 1;
                posts.push(Post {
                    user_id,
                    id,
                    title: title(id),
                    body: format!("{}\n{}", title(id + 1), title(id + 2)),
                });
            }
            for n in 0..TODOS_PER_USER as u32 {
                let id = (user_id - 1) * TODOS_PER_USER as u32 + n + 1;
                todos.push(Todo {
                    user_id,
                    id,
                    title: title(id),
                    completed: id % 3 == 0,
                });
            }
            for n in 0..ALBUMS_PER_USER as u32 {
                let id = (user_id - 1) * ALBUMS_PER_USER as u32 + n + 1;
                albums.push(Album {
                    user_id,
                    id,
                    title: title(id),
                });
            }
        }

        Self {
            users,
            posts,
            todos,
            albums,
        }
    }

    pub fn users(&self) -> &[PersonRecord] {
        &self.users
    }

    fn user(&self, id: u32) -> Option<&PersonRecord> {
        self.users.iter().find(|u| u.id == Some(id))
    }

    fn next_id(&self) -> u32 {
        self.users.len() as u32 + 1
    }
}

fn title(seed: u32) -> String {
    let len = TITLE_WORDS.len() as u32;
    (0..4)
        .map(|i| TITLE_WORDS[((seed * 7 + i * 5) % len) as usize])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Router serving the `/users` resource
pub fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route(
            "/users/:user_id",
            get(get_user_handler)
                .post(post_user_path_handler)
                .put(replace_user_handler)
                .patch(patch_user_handler)
                .delete(delete_user_handler),
        )
        .route("/users/:user_id/posts", get(list_posts_handler))
        .route("/users/:user_id/todos", get(list_todos_handler))
        .route("/users/:user_id/albums", get(list_albums_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the stub on an already bound listener until the task is dropped
pub async fn serve(listener: TcpListener) -> ApiResult<()> {
    let state = Arc::new(StubState::seeded());
    info!("Stub service listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Stub running on a background task; aborted on drop
pub struct StubServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl StubServer {
    /// Bind `addr` (port 0 picks a free port) and serve in the background
    pub async fn spawn(addr: &str) -> ApiResult<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        let task = tokio::spawn(async move {
            if let Err(e) = serve(listener).await {
                error!("Stub service error: {}", e);
            }
        });
        Ok(Self { addr, task })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn empty(status: StatusCode) -> Response {
    (status, Json(json!({}))).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

async fn list_users_handler(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    Json(state.users.clone())
}

async fn get_user_handler(
    State(state): State<Arc<StubState>>,
    Path(user_id): Path<u32>,
) -> Response {
    match state.user(user_id) {
        Some(user) => (StatusCode::OK, Json(user.clone())).into_response(),
        None => empty(StatusCode::NOT_FOUND),
    }
}

async fn create_user_handler(
    State(state): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> Response {
    let mut created = match body {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    created.insert("id".to_string(), json!(state.next_id()));
    (StatusCode::CREATED, Json(Value::Object(created))).into_response()
}

async fn post_user_path_handler(Path(_user_id): Path<u32>) -> Response {
    empty(StatusCode::NOT_FOUND)
}

async fn replace_user_handler(
    State(state): State<Arc<StubState>>,
    Path(user_id): Path<u32>,
    Json(body): Json<Value>,
) -> Response {
    if state.user(user_id).is_none() {
        return empty(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let mut replaced = match body {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };
    replaced.insert("id".to_string(), json!(user_id));
    (StatusCode::OK, Json(Value::Object(replaced))).into_response()
}

async fn patch_user_handler(
    State(state): State<Arc<StubState>>,
    Path(user_id): Path<u32>,
    Json(body): Json<Value>,
) -> Response {
    let Some(user) = state.user(user_id) else {
        return empty(StatusCode::NOT_FOUND);
    };
    let mut merged = match serde_json::to_value(user) {
        Ok(Value::Object(map)) => map,
        _ => return empty(StatusCode::INTERNAL_SERVER_ERROR),
    };
    if let Value::Object(patch) = body {
        merged.extend(patch);
    }
    merged.insert("id".to_string(), json!(user_id));
    (StatusCode::OK, Json(Value::Object(merged))).into_response()
}

async fn delete_user_handler(Path(_user_id): Path<u32>) -> Response {
    empty(StatusCode::OK)
}

async fn list_posts_handler(
    State(state): State<Arc<StubState>>,
    Path(user_id): Path<u32>,
) -> impl IntoResponse {
    let posts: Vec<Post> = state.posts.iter().filter(|p| p.user_id == user_id).cloned().collect();
    Json(posts)
}

async fn list_todos_handler(
    State(state): State<Arc<StubState>>,
    Path(user_id): Path<u32>,
) -> impl IntoResponse {
    let todos: Vec<Todo> = state.todos.iter().filter(|t| t.user_id == user_id).cloned().collect();
    Json(todos)
}

async fn list_albums_handler(
    State(state): State<Arc<StubState>>,
    Path(user_id): Path<u32>,
) -> impl IntoResponse {
    let albums: Vec<Album> = state.albums.iter().filter(|a| a.user_id == user_id).cloned().collect();
    Json(albums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[test]
    fn test_fixture_counts() {
        let state = StubState::seeded();
        assert_eq!(state.users().len(), USER_COUNT);
        assert_eq!(state.posts.iter().filter(|p| p.user_id == 2).count(), POSTS_PER_USER);
        assert_eq!(state.todos.iter().filter(|t| t.user_id == 2).count(), TODOS_PER_USER);
        assert_eq!(state.albums.iter().filter(|a| a.user_id == 2).count(), ALBUMS_PER_USER);
        assert_eq!(state.next_id(), 11);
    }

    #[test]
    fn test_fixture_ids_are_unique() {
        let state = StubState::seeded();
        let mut ids: Vec<u32> = state.todos.iter().map(|t| t.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), USER_COUNT * TODOS_PER_USER);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let app = router(Arc::new(StubState::seeded()));
        let response = app
            .oneshot(Request::builder().uri("/users/11").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_always_ok() {
        let app = router(Arc::new(StubState::seeded()));
        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/users/11")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
