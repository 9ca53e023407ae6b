mod order;
mod product;
mod review;
mod user;

use crate::errors::ErrorResponse;
use crate::state::AppState;
use crate::utils::shutdown_signal;
use anyhow::Result;
use axum::Router;
use axum::body::Body;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Json;
use prometheus_client::encoding::text::encode;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::order::order_routes;
pub use self::product::product_routes;
pub use self::review::review_routes;
pub use self::user::user_routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,

        user::get_users,
        user::get_user,
        user::create_user,
        user::update_user,
        user::delete_user,

        product::get_products,
        product::get_product,
        product::create_product,
        product::update_product,
        product::delete_product,

        review::get_product_reviews,
        review::create_product_review,
        review::delete_review,

        order::get_orders,
        order::get_order,
        order::create_order,
        order::update_order_status,
        order::delete_order,
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "User", description = "User endpoints"),
        (name = "Product", description = "Product endpoints"),
        (name = "Review", description = "Product review endpoints"),
        (name = "Order", description = "Order endpoints"),
    )
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service is alive"))
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "OK" })))
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut buffer = String::new();

    let registry = state.registry.lock().await;

    if let Err(e) = encode(&mut buffer, &registry) {
        return Response::builder()
            .status(StatusCode::INTERNAL_SERVER_ERROR)
            .body(Body::from(format!("Failed to encode metrics: {e}")))
            .unwrap();
    }

    Response::builder()
        .status(StatusCode::OK)
        .header(
            CONTENT_TYPE,
            "application/openmetrics-text; version=1.0.0; charset=utf-8",
        )
        .body(Body::from(buffer))
        .unwrap()
}

// Unmatched /api paths must never fall through to the static site.
async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            status: "error".into(),
            message: "Unknown API route".into(),
        }),
    )
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(app_state: AppState, static_dir: &Path) -> Router {
        let shared_state = Arc::new(app_state);

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/health", get(health_check))
            .route("/metrics", get(metrics_handler))
            .route("/api", any(api_not_found))
            .route("/api/{*path}", any(api_not_found))
            .with_state(shared_state.clone())
            .merge(user_routes(&shared_state.di_container))
            .merge(product_routes(&shared_state.di_container))
            .merge(review_routes(&shared_state.di_container))
            .merge(order_routes(&shared_state.di_container));

        let (app_router, api) = api_router.split_for_parts();

        let mut app = app_router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()));

        if static_dir.is_dir() {
            let index = static_dir.join("index.html");
            let spa_fallback = ServeDir::new(static_dir).fallback(ServeFile::new(index));

            app = app
                .nest_service("/static", ServeDir::new(static_dir))
                .fallback_service(spa_fallback);
        } else {
            warn!(
                "⚠️ Static directory {:?} not found. Frontend assets will not be served.",
                static_dir
            );
        }

        // Every origin/method/header is reflected and credentials are allowed.
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true);

        app.layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(250 * 1024 * 1024))
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    pub async fn serve(port: u16, app_state: AppState, static_dir: &Path) -> Result<()> {
        let app = Self::build(app_state, static_dir);

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr).await?;

        println!("🚀 Server running on http://{}", listener.local_addr()?);
        println!("📚 API Documentation available at:");
        println!("   📖 Swagger UI: http://localhost:{port}/swagger-ui");
        println!("   📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}
