use crate::model::product::Product as ProductModel;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    #[serde(rename = "created_at")]
    pub created_at: Option<String>,
    #[serde(rename = "updated_at")]
    pub updated_at: Option<String>,
}

impl From<ProductModel> for ProductResponse {
    fn from(value: ProductModel) -> Self {
        ProductResponse {
            id: value.product_id,
            name: value.name,
            description: value.description,
            price: value.price,
            stock: value.stock,
            created_at: value.created_at.map(|dt| dt.to_string()),
            updated_at: value.updated_at.map(|dt| dt.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_fields_round_trip_unchanged() {
        let model = ProductModel {
            product_id: 3,
            name: "Smartphone".into(),
            description: "A 6.1 inch OLED smartphone".into(),
            price: 999.99,
            stock: 100,
            created_at: None,
            updated_at: None,
        };

        let response = ProductResponse::from(model);

        assert_eq!(response.id, 3);
        assert_eq!(response.name, "Smartphone");
        assert_eq!(response.description, "A 6.1 inch OLED smartphone");
        assert_eq!(response.price, 999.99);
        assert_eq!(response.stock, 100);
    }
}
