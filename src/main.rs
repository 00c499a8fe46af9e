use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, patch, post},
    Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use plantnet_api::config;
use plantnet_api::db::Store;
use plantnet_api::handlers::{orders, plants, session, users};
use plantnet_api::middleware::auth::jwt_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up MONGODB_URI, ACCESS_TOKEN_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting PlantNet API in {:?} mode", config.environment);

    let store = match Store::connect(&config.database).await {
        Ok(store) => Arc::new(store),
        Err(err) => {
            tracing::error!("Could not reach the document store: {}", err);
            std::process::exit(1);
        }
    };

    let app = app(store.clone());

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("PlantNet API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server");

    // The router's state clones are dropped once serve returns
    match Arc::try_unwrap(store) {
        Ok(store) => store.close().await,
        Err(_) => tracing::warn!("Store still shared at shutdown, skipping close"),
    }
}

fn app(store: Arc<Store>) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(session_routes())
        .merge(user_routes())
        .merge(plant_routes())
        .merge(order_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

fn session_routes() -> Router<Arc<Store>> {
    Router::new()
        .route("/jwt", post(session::issue_token))
        .route("/logout", get(session::logout))
}

fn user_routes() -> Router<Arc<Store>> {
    Router::new()
        .route("/users/:email", post(users::upsert_user))
        .route("/users/role/:email", get(users::user_role))
        .route("/update-seller/:email", patch(users::update_seller_status))
}

fn plant_routes() -> Router<Arc<Store>> {
    Router::new()
        // POST is protected, GET stays open
        .route(
            "/plants",
            post(plants::create_plant)
                .route_layer(middleware::from_fn(jwt_auth_middleware))
                .get(plants::list_plants),
        )
        .route("/plants/:id", get(plants::get_plant))
        .route(
            "/plants/quantity/:id",
            patch(plants::adjust_quantity).route_layer(middleware::from_fn(jwt_auth_middleware)),
        )
}

fn order_routes() -> Router<Arc<Store>> {
    Router::new()
        .route(
            "/order",
            post(orders::place_order).route_layer(middleware::from_fn(jwt_auth_middleware)),
        )
        // One param name for both verbs: GET filters by email, DELETE by id
        .route(
            "/myoders/:key",
            get(orders::my_orders).delete(orders::delete_order),
        )
}

/// CORS restricted to the declared development origins, with credentialed
/// requests enabled so the token cookie travels cross-origin.
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = config::config()
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

async fn root() -> &'static str {
    "Hello from plantNet Server.."
}

async fn health(State(store): State<Arc<Store>>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
