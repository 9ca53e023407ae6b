use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllOrders {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    pub user_id: Option<i32>,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateOrderRequest {
    #[validate(range(min = 1, message = "User ID is required"))]
    #[schema(example = 1)]
    pub user_id: i32,

    #[validate(length(min = 1, message = "At least one product is required"))]
    #[schema(example = json!([1, 2, 2]))]
    pub product_ids: Vec<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    #[schema(example = "paid")]
    pub status: String,
}

/// Repository-level payload for the transactional order insert, with the
/// unit price of every item already captured.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderRecordRequest {
    pub user_id: i32,
    pub total_amount: f64,
    pub status: String,
    pub items: Vec<OrderItemRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemRecord {
    pub product_id: i32,
    pub quantity: i32,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_requires_at_least_one_product() {
        let req = CreateOrderRequest {
            user_id: 1,
            product_ids: vec![],
        };
        assert!(req.validate().is_err());

        let req = CreateOrderRequest {
            user_id: 1,
            product_ids: vec![7],
        };
        assert!(req.validate().is_ok());
    }
}
