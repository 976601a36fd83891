//! Hostel360 Backend
//!
//! A REST backend for the hostel-management dashboard: role-based sessions,
//! live leave/notice collections over SQLite, and file-backed local record
//! collections for the remaining modules.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod live;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use live::{LiveCollection, Snapshot};
use models::{Leave, Notice};
use store::LocalRecordStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub local: Arc<LocalRecordStore>,
    pub repo: Arc<Repository>,
    pub leaves: Arc<LiveCollection<Leave>>,
    pub notices: Arc<LiveCollection<Notice>>,
    pub sessions: Arc<auth::SessionStore>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Hostel360 Backend");
    tracing::info!("Data dir: {:?}", config.data_dir);
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Open the local record store and seed first-run demo content
    let local = Arc::new(LocalRecordStore::open(&config.data_dir)?);
    let items = local.seed_if_empty(store::keys::LOST_FOUND_ITEMS, store::default_lost_found_items());
    tracing::info!("Lost & found collection ready ({} items)", items.len());
    let requests = local.seed_if_empty(store::keys::HELP_REQUESTS, store::default_help_requests());
    tracing::info!("Peer help collection ready ({} requests)", requests.len());

    // Initialize the live-collection database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Publish the initial snapshots
    let revision = repo.get_revision_id().await?;
    let leaves = Arc::new(LiveCollection::new(Snapshot {
        revision,
        records: repo.list_leaves().await?,
    }));
    let notices = Arc::new(LiveCollection::new(Snapshot {
        revision,
        records: repo.list_notices().await?,
    }));
    tracing::info!("Live collections ready at revision {}", leaves.revision());

    // Create application state
    let state = AppState {
        local,
        repo,
        leaves,
        notices,
        sessions: Arc::new(auth::SessionStore::new()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the session store for the auth layer
    let sessions = state.sessions.clone();

    // Everything behind a session token
    let protected = Router::new()
        // Session
        .route("/auth/me", get(api::me))
        .route("/auth/logout", post(api::logout))
        // Leave management
        .route("/leaves", get(api::list_leaves))
        .route("/leaves", post(api::apply_leave))
        .route("/leaves/changes", get(api::leave_changes))
        .route("/leaves/{id}/decision", post(api::decide_leave))
        // Notice board
        .route("/notices", get(api::list_notices))
        .route("/notices", post(api::post_notice))
        .route("/notices/changes", get(api::notice_changes))
        .route("/notices/{id}/pin", post(api::toggle_pin))
        // Complaints
        .route("/complaints", get(api::list_complaints))
        .route("/complaints", post(api::create_complaint))
        .route("/complaints/{id}/status", post(api::update_complaint_status))
        // Attendance
        .route("/attendance", get(api::list_attendance))
        .route("/attendance/mark", post(api::mark_attendance))
        .route("/attendance/summary", get(api::attendance_summary))
        // Task checklist
        .route("/tasks", get(api::list_tasks))
        .route("/tasks", post(api::create_task))
        .route("/tasks/{id}/toggle", post(api::toggle_task))
        // Lost & found
        .route("/lost-found", get(api::list_items))
        .route("/lost-found", post(api::report_item))
        .route("/lost-found/{id}/resolve", post(api::resolve_item))
        // Peer help
        .route("/help-requests", get(api::list_help_requests))
        .route("/help-requests", post(api::create_help_request))
        .route("/help-requests/{id}/offer", post(api::offer_help))
        .route("/help-requests/{id}/solve", post(api::solve_help_request))
        // Apply session middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::session_auth_layer(sessions.clone(), req, next)
        }));

    // Login and signup issue the tokens, so they sit outside the layer
    let public = Router::new()
        .route("/auth/login", post(api::login))
        .route("/auth/signup", post(api::signup));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", public.merge(protected))
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
