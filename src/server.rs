//! In-process user registry that `userload run` can be pointed at.
//!
//! `POST /user` registers a username once, `GET /user` lists the registered
//! keys and `GET /` answers a fixed greeting. Every request is logged through
//! `tower-http`'s trace layer.

use std::collections::BTreeSet;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{debug, info, Level};

use crate::ports::CreateUserRequest;

/// Prefix of every key listed by `GET /user`.
pub const USER_KEY_PREFIX: &str = "user:";

/// Body of a `201` answer to `POST /user`.
pub const USER_CREATED: &str = "User created";

/// Body of a `409` answer to `POST /user`.
pub const USER_EXISTS: &str = "User already exists";

/// Registered usernames, shared by all handlers.
///
/// Check-and-insert happens under one lock, so two concurrent posts of the
/// same name never both succeed.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<Mutex<BTreeSet<String>>>,
}

impl UserStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `username`. Returns `false` if it was already registered.
    pub fn insert(&self, username: &str) -> bool {
        self.lock().insert(username.to_string())
    }

    /// Registered names as `user:<name>` keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.lock().iter().map(|name| format!("{USER_KEY_PREFIX}{name}")).collect()
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no name has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        // A set of strings cannot be left half-updated, so a poisoned lock is still usable.
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Builds the router with request logging attached.
#[must_use]
pub fn router(store: UserStore) -> Router {
    Router::new()
        .route("/", get(hello))
        .route("/user", get(list_users).post(create_user))
        .with_state(store)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Serves the router on an already bound listener until the process stops.
///
/// # Errors
///
/// Returns an error if accepting connections fails.
pub async fn serve_on(listener: TcpListener, store: UserStore) -> io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "user server listening");
    }
    axum::serve(listener, router(store)).await
}

async fn hello() -> &'static str {
    "Hello, World!"
}

async fn list_users(State(store): State<UserStore>) -> Json<Vec<String>> {
    Json(store.keys())
}

async fn create_user(
    State(store): State<UserStore>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> (StatusCode, String) {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            debug!(%rejection, "rejected user body");
            return (StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    if store.insert(&request.username) {
        debug!(username = %request.username, "user created");
        (StatusCode::CREATED, USER_CREATED.to_string())
    } else {
        debug!(username = %request.username, "user already exists");
        (StatusCode::CONFLICT, USER_EXISTS.to_string())
    }
}
