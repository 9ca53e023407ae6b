use crate::{
    domain::{
        requests::review::{CreateReviewRequest, FindProductReviews},
        responses::{
            api::{ApiResponse, ApiResponsePagination},
            review::ReviewResponse,
        },
    },
    errors::{RepositoryError, ServiceError},
    model::review::Review as ReviewModel,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynReviewQueryRepository = Arc<dyn ReviewQueryRepositoryTrait + Send + Sync>;
pub type DynReviewCommandRepository = Arc<dyn ReviewCommandRepositoryTrait + Send + Sync>;
pub type DynReviewQueryService = Arc<dyn ReviewQueryServiceTrait + Send + Sync>;
pub type DynReviewCommandService = Arc<dyn ReviewCommandServiceTrait + Send + Sync>;

#[async_trait]
pub trait ReviewQueryRepositoryTrait {
    async fn find_by_product(
        &self,
        product_id: i32,
        req: &FindProductReviews,
    ) -> Result<(Vec<ReviewModel>, i64), RepositoryError>;
}

#[async_trait]
pub trait ReviewCommandRepositoryTrait {
    async fn create(
        &self,
        product_id: i32,
        req: &CreateReviewRequest,
    ) -> Result<ReviewModel, RepositoryError>;
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ReviewQueryServiceTrait {
    async fn find_by_product(
        &self,
        product_id: i32,
        req: &FindProductReviews,
    ) -> Result<ApiResponsePagination<Vec<ReviewResponse>>, ServiceError>;
}

#[async_trait]
pub trait ReviewCommandServiceTrait {
    async fn create(
        &self,
        product_id: i32,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError>;
    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError>;
}
