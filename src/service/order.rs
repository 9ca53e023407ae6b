use crate::{
    abstract_trait::{
        order::{
            DynOrderCommandRepository, DynOrderQueryRepository, OrderCommandServiceTrait,
            OrderQueryServiceTrait,
        },
        product::DynProductQueryRepository,
        user::DynUserQueryRepository,
    },
    domain::{
        requests::order::{
            CreateOrderRecordRequest, CreateOrderRequest, FindAllOrders, OrderItemRecord,
            UpdateOrderStatusRequest,
        },
        responses::{
            api::{ApiResponse, ApiResponsePagination},
            order::OrderResponse,
            pagination::Pagination,
        },
        status::OrderStatus,
    },
    errors::{RepositoryError, ServiceError},
    model::order_item::OrderItem as OrderItemModel,
    utils::{Method, Metrics, Status},
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::time::Instant;
use tracing::info;

#[derive(Clone)]
pub struct OrderQueryService {
    pub query: DynOrderQueryRepository,
    pub metrics: Metrics,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, metrics: Metrics) -> Self {
        Self { query, metrics }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn find_all(
        &self,
        req: &FindAllOrders,
    ) -> Result<ApiResponsePagination<Vec<OrderResponse>>, ServiceError> {
        info!(
            "🔍 Finding all orders | Page: {}, Size: {}, User: {:?}",
            req.page, req.page_size, req.user_id
        );

        let started = Instant::now();
        let page = req.page.max(1);
        let page_size = req.page_size.max(1);

        let normalized = FindAllOrders {
            page,
            page_size,
            user_id: req.user_id,
        };

        let result = async {
            let (orders, total) = self.query.find_all(&normalized).await?;

            let order_ids: Vec<i32> = orders.iter().map(|o| o.order_id).collect();
            let items = self.query.find_items_for_orders(&order_ids).await?;

            let mut items_by_order: HashMap<i32, Vec<OrderItemModel>> = HashMap::new();
            for item in items {
                items_by_order.entry(item.order_id).or_default().push(item);
            }

            let data = orders
                .into_iter()
                .map(|order| {
                    let items = items_by_order.remove(&order.order_id).unwrap_or_default();
                    OrderResponse::from((order, items))
                })
                .collect::<Vec<_>>();

            Ok::<_, RepositoryError>((data, total))
        }
        .await;

        match result {
            Ok((data, total)) => {
                self.metrics
                    .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponsePagination {
                    status: "success".to_string(),
                    message: "Orders retrieved successfully".to_string(),
                    data,
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

    async fn find_by_id(&self, id: i32) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🔍 Finding order by ID: {id}");

        let started = Instant::now();

        let result = async {
            let order = self
                .query
                .find_by_id(id)
                .await?
                .ok_or(RepositoryError::NotFound)?;

            let items = self.query.find_items_for_orders(&[id]).await?;
            Ok::<_, RepositoryError>(OrderResponse::from((order, items)))
        }
        .await;

        match result {
            Ok(order) => {
                self.metrics
                    .record(Method::Get, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Order retrieved successfully".to_string(),
                    data: order,
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
pub struct OrderCommandService {
    pub command: DynOrderCommandRepository,
    pub query: DynOrderQueryRepository,
    pub product_query: DynProductQueryRepository,
    pub user_query: DynUserQueryRepository,
    pub metrics: Metrics,
}

pub struct OrderCommandServiceDeps {
    pub command: DynOrderCommandRepository,
    pub query: DynOrderQueryRepository,
    pub product_query: DynProductQueryRepository,
    pub user_query: DynUserQueryRepository,
    pub metrics: Metrics,
}

impl OrderCommandService {
    pub fn new(deps: OrderCommandServiceDeps) -> Self {
        let OrderCommandServiceDeps {
            command,
            query,
            product_query,
            user_query,
            metrics,
        } = deps;

        Self {
            command,
            query,
            product_query,
            user_query,
            metrics,
        }
    }

    /// Resolves the requested product ids into priced items. Repeated ids
    /// collapse into a single item with a higher quantity.
    async fn build_items(
        &self,
        product_ids: &[i32],
    ) -> Result<Vec<OrderItemRecord>, RepositoryError> {
        let mut items: Vec<OrderItemRecord> = Vec::new();

        for product_id in product_ids {
            if let Some(existing) = items.iter_mut().find(|i| i.product_id == *product_id) {
                existing.quantity += 1;
                continue;
            }

            let product = self
                .product_query
                .find_by_id(*product_id)
                .await?
                .ok_or(RepositoryError::NotFound)?;

            items.push(OrderItemRecord {
                product_id: *product_id,
                quantity: 1,
                price: product.price,
            });
        }

        Ok(items)
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn create(
        &self,
        req: &CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!(
            "🛒 Creating order for user {} with {} product id(s)",
            req.user_id,
            req.product_ids.len()
        );

        let started = Instant::now();

        let result = async {
            self.user_query
                .find_by_id(req.user_id)
                .await?
                .ok_or(RepositoryError::NotFound)?;

            let items = self.build_items(&req.product_ids).await?;

            let total_amount = items
                .iter()
                .map(|item| item.price * item.quantity as f64)
                .sum();

            let record = CreateOrderRecordRequest {
                user_id: req.user_id,
                total_amount,
                status: OrderStatus::Pending.to_string(),
                items,
            };

            self.command.create(&record).await
        }
        .await;

        match result {
            Ok((order, items)) => {
                self.metrics
                    .record(Method::Post, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Order created successfully".to_string(),
                    data: OrderResponse::from((order, items)),
                })
            }
            Err(err) => {
                self.metrics
                    .record(Method::Post, Status::Error, started.elapsed().as_secs_f64());
                Err(err.into())
            }
        }
    }

    async fn update_status(
        &self,
        id: i32,
        req: &UpdateOrderStatusRequest,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        info!("🔄 Moving order ID {id} to status '{}'", req.status);

        let started = Instant::now();

        let result = async {
            let order = self
                .query
                .find_by_id(id)
                .await
                .map_err(ServiceError::from)?
                .ok_or(RepositoryError::NotFound)
                .map_err(ServiceError::from)?;

            let current: OrderStatus = order
                .status
                .parse()
                .map_err(|e: String| ServiceError::Internal(e))?;

            let next: OrderStatus = req
                .status
                .parse()
                .map_err(ServiceError::InvalidStatusTransition)?;

            if !current.can_transition_to(next) {
                return Err(ServiceError::InvalidStatusTransition(format!(
                    "Order cannot move from '{current}' to '{next}'"
                )));
            }

            let updated = self
                .command
                .update_status(id, next.as_str())
                .await
                .map_err(ServiceError::from)?;

            let items = self
                .query
                .find_items_for_orders(&[id])
                .await
                .map_err(ServiceError::from)?;

            Ok::<_, ServiceError>(OrderResponse::from((updated, items)))
        }
        .await;

        match result {
            Ok(order) => {
                self.metrics
                    .record(Method::Put, Status::Success, started.elapsed().as_secs_f64());

                Ok(ApiResponse {
                    status: "success".to_string(),
                    message: "Order status updated successfully".to_string(),
                    data: order,
                })
            }
            Err(err) => {
                self.metrics
                    .record(Method::Put, Status::Error, started.elapsed().as_secs_f64());
                Err(err)
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<ApiResponse<()>, ServiceError> {
        info!("🗑️ Deleting order ID {id}");

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
                    message: "Order deleted successfully".to_string(),
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
        order::{OrderCommandRepositoryTrait, OrderQueryRepositoryTrait},
        product::ProductQueryRepositoryTrait,
        user::UserQueryRepositoryTrait,
    };
    use crate::domain::requests::product::FindAllProducts;
    use crate::domain::requests::user::FindAllUsers;
    use crate::model::{
        order::Order as OrderModel, product::Product as ProductModel, user::User as UserModel,
    };
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    struct StubProductQueryRepo {
        prices: Vec<(i32, f64)>,
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
            Ok(self
                .prices
                .iter()
                .find(|(pid, _)| *pid == id)
                .map(|(pid, price)| ProductModel {
                    product_id: *pid,
                    name: format!("product-{pid}"),
                    description: String::new(),
                    price: *price,
                    stock: 10,
                    created_at: None,
                    updated_at: None,
                }))
        }
    }

    struct StubUserQueryRepo;

    #[async_trait]
    impl UserQueryRepositoryTrait for StubUserQueryRepo {
        async fn find_all(
            &self,
            _req: &FindAllUsers,
        ) -> Result<(Vec<UserModel>, i64), RepositoryError> {
            Ok((Vec::new(), 0))
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<UserModel>, RepositoryError> {
            Ok(Some(UserModel {
                user_id: id,
                username: "knight".into(),
                email: "knight@example.com".into(),
                password: "hash".into(),
                created_at: None,
                updated_at: None,
            }))
        }
    }

    #[derive(Default)]
    struct RecordingOrderCommandRepo {
        created: Mutex<Vec<CreateOrderRecordRequest>>,
    }

    #[async_trait]
    impl OrderCommandRepositoryTrait for RecordingOrderCommandRepo {
        async fn create(
            &self,
            req: &CreateOrderRecordRequest,
        ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
            self.created.lock().unwrap().push(req.clone());

            let order = OrderModel {
                order_id: 1,
                user_id: req.user_id,
                total_amount: req.total_amount,
                status: req.status.clone(),
                created_at: None,
                updated_at: None,
            };

            let items = req
                .items
                .iter()
                .enumerate()
                .map(|(i, item)| OrderItemModel {
                    order_item_id: i as i32 + 1,
                    order_id: 1,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect();

            Ok((order, items))
        }

        async fn update_status(
            &self,
            id: i32,
            status: &str,
        ) -> Result<OrderModel, RepositoryError> {
            Ok(OrderModel {
                order_id: id,
                user_id: 1,
                total_amount: 0.0,
                status: status.to_string(),
                created_at: None,
                updated_at: None,
            })
        }

        async fn delete(&self, _id: i32) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    struct StubOrderQueryRepo {
        status: &'static str,
    }

    #[async_trait]
    impl OrderQueryRepositoryTrait for StubOrderQueryRepo {
        async fn find_all(
            &self,
            _req: &FindAllOrders,
        ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
            Ok((Vec::new(), 0))
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
            Ok(Some(OrderModel {
                order_id: id,
                user_id: 1,
                total_amount: 0.0,
                status: self.status.to_string(),
                created_at: None,
                updated_at: None,
            }))
        }

        async fn find_items_for_orders(
            &self,
            _order_ids: &[i32],
        ) -> Result<Vec<OrderItemModel>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    fn command_service(
        prices: Vec<(i32, f64)>,
        current_status: &'static str,
    ) -> (OrderCommandService, Arc<RecordingOrderCommandRepo>) {
        let command = Arc::new(RecordingOrderCommandRepo::default());
        let service = OrderCommandService::new(OrderCommandServiceDeps {
            command: command.clone(),
            query: Arc::new(StubOrderQueryRepo {
                status: current_status,
            }),
            product_query: Arc::new(StubProductQueryRepo { prices }),
            user_query: Arc::new(StubUserQueryRepo),
            metrics: Metrics::new(),
        });

        (service, command)
    }

    #[tokio::test]
    async fn order_items_cover_the_requested_product_set() {
        let (service, _) = command_service(vec![(1, 10.0), (2, 20.0)], "pending");

        let response = service
            .create(&CreateOrderRequest {
                user_id: 1,
                product_ids: vec![1, 2],
            })
            .await
            .unwrap();

        let ids: HashSet<i32> = response
            .data
            .order_items
            .iter()
            .map(|i| i.product_id)
            .collect();

        assert_eq!(ids, HashSet::from([1, 2]));
        assert_eq!(response.data.status, "pending");
    }

    #[tokio::test]
    async fn duplicate_product_ids_aggregate_and_total_adds_up() {
        let (service, command) = command_service(vec![(1, 10.0), (2, 2.5)], "pending");

        let response = service
            .create(&CreateOrderRequest {
                user_id: 1,
                product_ids: vec![1, 2, 2, 2],
            })
            .await
            .unwrap();

        let created = command.created.lock().unwrap();
        let record = &created[0];

        assert_eq!(record.items.len(), 2);
        let doubled = record.items.iter().find(|i| i.product_id == 2).unwrap();
        assert_eq!(doubled.quantity, 3);

        // 1×10.0 + 3×2.5
        assert_eq!(record.total_amount, 17.5);
        assert_eq!(response.data.total_amount, 17.5);
    }

    #[tokio::test]
    async fn order_with_unknown_product_is_not_found() {
        let (service, _) = command_service(vec![(1, 10.0)], "pending");

        let err = service
            .create(&CreateOrderRequest {
                user_id: 1,
                product_ids: vec![1, 99],
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Repo(RepositoryError::NotFound)
        ));
    }

    #[tokio::test]
    async fn lifecycle_transition_forward_is_accepted() {
        let (service, _) = command_service(vec![], "pending");

        let response = service
            .update_status(
                1,
                &UpdateOrderStatusRequest {
                    status: "paid".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(response.data.status, "paid");
    }

    #[tokio::test]
    async fn lifecycle_transition_backwards_is_rejected() {
        let (service, _) = command_service(vec![], "shipped");

        let err = service
            .update_status(
                1,
                &UpdateOrderStatusRequest {
                    status: "pending".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidStatusTransition(_)));
    }

    #[tokio::test]
    async fn unknown_target_status_is_rejected() {
        let (service, _) = command_service(vec![], "pending");

        let err = service
            .update_status(
                1,
                &UpdateOrderStatusRequest {
                    status: "refunded".into(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::InvalidStatusTransition(_)));
    }
}
