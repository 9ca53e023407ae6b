use crate::{
    abstract_trait::{
        product::DynProductQueryRepository,
        review::{
            DynReviewCommandRepository, DynReviewQueryRepository, ReviewCommandServiceTrait,
            ReviewQueryServiceTrait,
        },
        user::DynUserQueryRepository,
    },
    domain::{
        requests::review::{CreateReviewRequest, FindProductReviews},
        responses::{
            api::{ApiResponse, ApiResponsePagination},
            pagination::Pagination,
            review::ReviewResponse,
        },
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status},
};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::info;

#[derive(Clone)]
pub struct ReviewQueryService {
    pub query: DynReviewQueryRepository,
    pub product_query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ReviewQueryService {
    pub fn new(
        query: DynReviewQueryRepository,
        product_query: DynProductQueryRepository,
        metrics: Metrics,
    ) -> Self {
        Self {
            query,
            product_query,
            metrics,
        }
    }
}

#[async_trait]
impl ReviewQueryServiceTrait for ReviewQueryService {
    async fn find_by_product(
        &self,
        product_id: i32,
        req: &FindProductReviews,
    ) -> Result<ApiResponsePagination<Vec<ReviewResponse>>, ServiceError> {
        info!("🔍 Finding reviews for product {product_id}");

        let started = Instant::now();
        let page = req.page.max(1);
        let page_size = req.page_size.max(1);

        let normalized = FindProductReviews { page, page_size };

        let result = async {
            self.product_query
                .find_by_id(product_id)
                .await?
                .ok_or(RepositoryError::NotFound)?;

            self.query.find_by_product(product_id, &normalized).await
        }
        .await;

        match result {
            Ok((reviews, total)) => {
                self.metrics
                    .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponsePagination {
                    status: "success".to_string(),
                    message: "Reviews retrieved successfully".to_string(),
                    data: reviews.into_iter().map(ReviewResponse::from).collect(),
                    pagination: Pagination::new(page, page_size, total),
                })
            }
            Err(err) => {
                self.metrics
                    .record(Method::Get, Status::Error, started.elapsed().as_secs_f64());
                Err(err.into())
            }
        }
    }
}

#[derive(Clone)]
pub struct ReviewCommandService {
    pub command: DynReviewCommandRepository,
    pub product_query: DynProductQueryRepository,
    pub user_query: DynUserQueryRepository,
    pub metrics: Metrics,
}

impl ReviewCommandService {
    pub fn new(
        command: DynReviewCommandRepository,
        product_query: DynProductQueryRepository,
        user_query: DynUserQueryRepository,
        metrics: Metrics,
    ) -> Self {
        Self {
            command,
            product_query,
            user_query,
            metrics,
        }
    }
}

#[async_trait]
impl ReviewCommandServiceTrait for ReviewCommandService {
    async fn create(
        &self,
        product_id: i32,
        req: &CreateReviewRequest,
    ) -> Result<ApiResponse<ReviewResponse>, ServiceError> {
        info!(
            "⭐ Creating review for product {product_id} by user {}",
            req.user_id
        );

        let started = Instant::now();

        let result = async {
            self.product_query
                .find_by_id(product_id)
                .await?
                .ok_or(RepositoryError::NotFound)?;

            self.user_query
                .find_by_id(req.user_id)
                .await?
                .ok_or(RepositoryError::NotFound)?;

            self.command.create(product_id, req).await
        }
        .await;

        match result {
            Ok(review) => {
                self.metrics
                    .record(Method::Post, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Review created successfully".to_string(),
                    data: review.into(),
                })
            }
            Err(err) => {
                self.metrics
                    .record(Method::Post, Status::Error, started.elapsed().as_secs_f64());
                Err(err.into())
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting review ID {id}");

        let started = Instant::now();

        match self.command.delete(id).await {
            Ok(()) => {
                self.metrics.record(
                    Method::Delete,
                    Status::Success,
                    started.elapsed().as_secs_f64(),
                );

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Review deleted successfully".to_string(),
                    data: (),
                })
            }
            Err(err) => {
                self.metrics.record(
                    Method::Delete,
                    Status::Error,
                    started.elapsed().as_secs_f64(),
                );
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstract_trait::{
        product::ProductQueryRepositoryTrait, review::ReviewCommandRepositoryTrait,
        user::UserQueryRepositoryTrait,
    };
    use crate::domain::requests::product::FindAllProducts;
    use crate::domain::requests::user::FindAllUsers;
    use crate::model::{
        product::Product as ProductModel, review::Review as ReviewModel, user::User as UserModel,
    };
    use std::sync::Arc;

    struct StubProductQueryRepo {
        known_id: i32,
    }

    #[async_trait]
    impl ProductQueryRepositoryTrait for StubProductQueryRepo {
        async fn find_all(
            &self,
            _req: &FindAllProducts,
        ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
            Ok((Vec::new(), 0))
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<ProductModel>, RepositoryError> {
            if id == self.known_id {
                Ok(Some(ProductModel {
                    product_id: id,
                    name: "Smartphone".into(),
                    description: String::new(),
                    price: 999.99,
                    stock: 5,
                    created_at: None,
                    updated_at: None,
                }))
            } else {
                Ok(None)
            }
        }
    }

    struct StubUserQueryRepo {
        known_id: i32,
    }

    #[async_trait]
    impl UserQueryRepositoryTrait for StubUserQueryRepo {
        async fn find_all(
            &self,
            _req: &FindAllUsers,
        ) -> Result<(Vec<UserModel>, i64), RepositoryError> {
            Ok((Vec::new(), 0))
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
            if id == self.known_id {
                Ok(Some(UserModel {
                    user_id: id,
                    username: "knight".into(),
                    email: "knight@example.com".into(),
                    password: "hash".into(),
                    created_at: None,
                    updated_at: None,
                }))
            } else {
                Ok(None)
            }
        }
    }

    struct EchoReviewCommandRepo;

    #[async_trait]
    impl ReviewCommandRepositoryTrait for EchoReviewCommandRepo {
        async fn create(
            &self,
            product_id: i32,
            req: &CreateReviewRequest,
        ) -> Result<ReviewModel, RepositoryError> {
            Ok(ReviewModel {
                review_id: 1,
                product_id,
                user_id: req.user_id,
                rating: req.rating,
                comment: req.comment.clone(),
                created_at: None,
            })
        }

        async fn delete(&self, _id: i32) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    fn service() -> ReviewCommandService {
        ReviewCommandService::new(
            Arc::new(EchoReviewCommandRepo),
            Arc::new(StubProductQueryRepo { known_id: 7 }),
            Arc::new(StubUserQueryRepo { known_id: 3 }),
            Metrics::new(),
        )
    }

    #[tokio::test]
    async fn review_for_unknown_product_is_not_found() {
        let req = CreateReviewRequest {
            user_id: 3,
            rating: 4,
            comment: None,
        };

        let err = service().create(99, &req).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repo(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn review_for_unknown_user_is_not_found() {
        let req = CreateReviewRequest {
            user_id: 42,
            rating: 4,
            comment: None,
        };

        let err = service().create(7, &req).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repo(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn review_create_echoes_the_submitted_fields() {
        let req = CreateReviewRequest {
            user_id: 3,
            rating: 5,
            comment: Some("great".into()),
        };

        let response = service().create(7, &req).await.unwrap();
        assert_eq!(response.data.product_id, 7);
        assert_eq!(response.data.user_id, 3);
        assert_eq!(response.data.rating, 5);
        assert_eq!(response.data.comment.as_deref(), Some("great"));
    }
}
