use crate::model::{order::Order as OrderModel, order_item::OrderItem as OrderItemModel};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderResponse {
    pub id: i32,
    pub user_id: i32,
    pub total_amount: f64,
    pub status: String,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub updated_at: Option<String>,
    pub order_items: Vec<OrderItemResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct OrderItemResponse {
    pub product_id: i32,
    pub quantity: i32,
    pub price: f64,
}

impl From<(OrderModel, Vec<OrderItemModel>)> for OrderResponse {
    fn from((order, items): (OrderModel, Vec<OrderItemModel>)) -> Self {
        OrderResponse {
            id: order.order_id,
            user_id: order.user_id,
            total_amount: order.total_amount,
            status: order.status,
            created_at: order.created_at.map(|dt| dt.to_string()),
            updated_at: order.updated_at.map(|dt| dt.to_string()),
            order_items: items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

impl From<OrderItemModel> for OrderItemResponse {
    fn from(value: OrderItemModel) -> Self {
        OrderItemResponse {
            product_id: value.product_id,
            quantity: value.quantity,
            price: value.price,
        }
    }
}
