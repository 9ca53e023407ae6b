use crate::{
    abstract_trait::product::{
        DynProductCommandRepository, DynProductQueryRepository, ProductCommandServiceTrait,
        ProductQueryServiceTrait,
    },
    domain::{
        requests::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest},
        responses::{
            api::{ApiResponse, ApiResponsePagination},
            pagination::Pagination,
            product::ProductResponse,
        },
    },
    errors::{RepositoryError, ServiceError},
    utils::{Method, Metrics, Status},
};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::info;

#[derive(Clone)]
pub struct ProductQueryService {
    pub query: DynProductQueryRepository,
    pub metrics: Metrics,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository, metrics: Metrics) -> Self {
        Self { query, metrics }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        info!(
            "🔍 Finding all products | Page: {}, Size: {}, Search: '{}'",
            req.page, req.page_size, req.search
        );

        let started = Instant::now();
        let page = req.page.max(1);
        let page_size = req.page_size.max(1);

        let normalized = FindAllProducts {
            page,
            page_size,
            search: req.search.clone(),
        };

        match self.query.find_all(&normalized).await {
            Ok((products, total)) => {
                self.metrics
                    .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponsePagination {
                    status: "success".to_string(),
                    message: "Products retrieved successfully".to_string(),
                    data: products.into_iter().map(ProductResponse::from).collect(),
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

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔍 Finding product by ID: {id}");

        let started = Instant::now();

        let result = self
            .query
            .find_by_id(id)
            .await
            .and_then(|product| product.ok_or(RepositoryError::NotFound));

        match result {
            Ok(product) => {
                self.metrics
                    .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Product retrieved successfully".to_string(),
                    data: product.into(),
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
pub struct ProductCommandService {
    pub command: DynProductCommandRepository,
    pub metrics: Metrics,
}

impl ProductCommandService {
    pub fn new(command: DynProductCommandRepository, metrics: Metrics) -> Self {
        Self { command, metrics }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create(
        &self,
        req: &CreateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("📦 Creating product '{}'", req.name);

        let started = Instant::now();

        match self.command.create(req).await {
            Ok(product) => {
                self.metrics
                    .record(Method::Post, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Product created successfully".to_string(),
                    data: product.into(),
                })
            }
            Err(err) => {
                self.metrics
                    .record(Method::Post, Status::Error, started.elapsed().as_secs_f64());
                Err(err.into())
            }
        }
    }

    async fn update(
        &self,
        id: i32,
        req: &UpdateProductRequest,
    ) -> Result<ApiResponse<ProductResponse>, ServiceError> {
        info!("🔄 Updating product ID {id}");

        let started = Instant::now();

        match self.command.update(id, req).await {
            Ok(product) => {
                self.metrics
                    .record(Method::Put, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Product updated successfully".to_string(),
                    data: product.into(),
                })
            }
            Err(err) => {
                self.metrics
                    .record(Method::Put, Status::Error, started.elapsed().as_secs_f64());
                Err(err.into())
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting product ID {id}");

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
                    message: "Product deleted successfully".to_string(),
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
    use crate::abstract_trait::product::ProductQueryRepositoryTrait;
    use crate::model::product::Product as ProductModel;
    use std::sync::Arc;

    struct EmptyProductQueryRepo;

    #[async_trait]
    impl ProductQueryRepositoryTrait for EmptyProductQueryRepo {
        async fn find_all(
            &self,
            _req: &FindAllProducts,
        ) -> Result<(Vec<ProductModel>, i64), RepositoryError> {
            Ok((Vec::new(), 0))
        }

        async fn find_by_id(&self, _id: i32) -> Result<Option<ProductModel>, RepositoryError> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn find_by_id_maps_missing_row_to_not_found() {
        let service = ProductQueryService::new(Arc::new(EmptyProductQueryRepo), Metrics::new());

        let err = service.find_by_id(99).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Repo(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn find_all_normalizes_non_positive_paging() {
        let service = ProductQueryService::new(Arc::new(EmptyProductQueryRepo), Metrics::new());

        let response = service
            .find_all(&FindAllProducts {
                page: -3,
                page_size: 0,
                search: String::new(),
            })
            .await
            .unwrap();

        assert_eq!(response.pagination.page, 1);
        assert_eq!(response.pagination.page_size, 1);
    }
}
