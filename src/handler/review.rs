use crate::{
    abstract_trait::review::{DynReviewCommandService, DynReviewQueryService},
    di::DependenciesInject,
    domain::{
        requests::review::{CreateReviewRequest, FindProductReviews},
        responses::{
            api::{ApiResponse, ApiResponsePagination},
            review::ReviewResponse,
        },
    },
    errors::HttpError,
    middleware::validate::SimpleValidatedJson,
};
use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/products/{id}/reviews",
    tag = "Review",
    params(
        ("id" = i32, Path, description = "Product ID"),
        FindProductReviews
    ),
    responses(
        (status = 200, description = "Reviews for the product", body = ApiResponsePagination<Vec<ReviewResponse>>),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product_reviews(
    Extension(service): Extension<DynReviewQueryService>,
    Path(id): Path<i32>,
    Query(params): Query<FindProductReviews>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_by_product(id, &params).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/products/{id}/reviews",
    tag = "Review",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<ReviewResponse>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Product or user not found")
    )
)]
pub async fn create_product_review(
    Extension(service): Extension<DynReviewCommandService>,
    Path(id): Path<i32>,
    SimpleValidatedJson(body): SimpleValidatedJson<CreateReviewRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.create(id, &body).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/reviews/{id}",
    tag = "Review",
    params(("id" = i32, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted", body = serde_json::Value),
        (status = 404, description = "Review not found")
    )
)]
pub async fn delete_review(
    Extension(service): Extension<DynReviewCommandService>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.delete(id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn review_routes(di: &DependenciesInject) -> OpenApiRouter {
    OpenApiRouter::new()
        .route("/api/products/{id}/reviews", get(get_product_reviews))
        .route("/api/products/{id}/reviews", post(create_product_review))
        .route("/api/reviews/{id}", delete(delete_review))
        .layer(Extension(di.review_query.clone()))
        .layer(Extension(di.review_command.clone()))
}
