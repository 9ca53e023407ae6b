use crate::{
    abstract_trait::{
        hashing::DynHashing,
        order::{DynOrderCommandService, DynOrderQueryService},
        product::{DynProductCommandService, DynProductQueryService},
        review::{DynReviewCommandService, DynReviewQueryService},
        user::{DynUserCommandService, DynUserQueryService},
    },
    config::{ConnectionPool, Hashing},
    repository::{
        order::{OrderCommandRepository, OrderQueryRepository},
        product::{ProductCommandRepository, ProductQueryRepository},
        review::{ReviewCommandRepository, ReviewQueryRepository},
        user::{UserCommandRepository, UserQueryRepository},
    },
    service::{
        order::{OrderCommandService, OrderCommandServiceDeps, OrderQueryService},
        product::{ProductCommandService, ProductQueryService},
        review::{ReviewCommandService, ReviewQueryService},
        user::{UserCommandService, UserQueryService},
    },
    utils::Metrics,
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub user_query: DynUserQueryService,
    pub user_command: DynUserCommandService,
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
    pub review_query: DynReviewQueryService,
    pub review_command: DynReviewCommandService,
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("user_query", &"UserQueryService")
            .field("user_command", &"UserCommandService")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .field("review_query", &"ReviewQueryService")
            .field("review_command", &"ReviewCommandService")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .finish()
    }
}

impl DependenciesInject {
    pub fn new(pool: ConnectionPool, metrics: Metrics) -> Self {
        let user_query_repo = Arc::new(UserQueryRepository::new(pool.clone()));
        let user_command_repo = Arc::new(UserCommandRepository::new(pool.clone()));
        let product_query_repo = Arc::new(ProductQueryRepository::new(pool.clone()));
        let product_command_repo = Arc::new(ProductCommandRepository::new(pool.clone()));
        let review_query_repo = Arc::new(ReviewQueryRepository::new(pool.clone()));
        let review_command_repo = Arc::new(ReviewCommandRepository::new(pool.clone()));
        let order_query_repo = Arc::new(OrderQueryRepository::new(pool.clone()));
        let order_command_repo = Arc::new(OrderCommandRepository::new(pool));

        let hashing: DynHashing = Arc::new(Hashing::new());

        let user_query =
            Arc::new(UserQueryService::new(user_query_repo.clone(), metrics.clone()))
                as DynUserQueryService;

        let user_command = Arc::new(UserCommandService::new(
            user_command_repo,
            hashing,
            metrics.clone(),
        )) as DynUserCommandService;

        let product_query = Arc::new(ProductQueryService::new(
            product_query_repo.clone(),
            metrics.clone(),
        )) as DynProductQueryService;

        let product_command = Arc::new(ProductCommandService::new(
            product_command_repo,
            metrics.clone(),
        )) as DynProductCommandService;

        let review_query = Arc::new(ReviewQueryService::new(
            review_query_repo,
            product_query_repo.clone(),
            metrics.clone(),
        )) as DynReviewQueryService;

        let review_command = Arc::new(ReviewCommandService::new(
            review_command_repo,
            product_query_repo.clone(),
            user_query_repo.clone(),
            metrics.clone(),
        )) as DynReviewCommandService;

        let order_query = Arc::new(OrderQueryService::new(
            order_query_repo.clone(),
            metrics.clone(),
        )) as DynOrderQueryService;

        let order_command = Arc::new(OrderCommandService::new(OrderCommandServiceDeps {
            command: order_command_repo,
            query: order_query_repo,
            product_query: product_query_repo,
            user_query: user_query_repo,
            metrics,
        })) as DynOrderCommandService;

        Self {
            user_query,
            user_command,
            product_query,
            product_command,
            review_query,
            review_command,
            order_query,
            order_command,
        }
    }
}
