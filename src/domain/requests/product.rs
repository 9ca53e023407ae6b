use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllProducts {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,

    #[serde(default)]
    pub search: String,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Smartphone")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "A 6.1 inch OLED smartphone")]
    pub description: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 999.99)]
    pub price: f64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 100)]
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Smartphone")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "A 6.1 inch OLED smartphone")]
    pub description: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 999.99)]
    pub price: f64,

    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    #[schema(example = 100)]
    pub stock: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_product_rejects_negative_price_and_stock() {
        let req = CreateProductRequest {
            name: "Smartphone".into(),
            description: String::new(),
            price: -1.0,
            stock: 10,
        };
        assert!(req.validate().is_err());

        let req = CreateProductRequest {
            name: "Smartphone".into(),
            description: String::new(),
            price: 1.0,
            stock: -10,
        };
        assert!(req.validate().is_err());
    }
}
