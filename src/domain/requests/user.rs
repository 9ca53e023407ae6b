use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindAllUsers {
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
pub struct CreateUserRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    #[schema(example = "dragon_knight")]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "knight@example.com")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    #[schema(example = "dragon_knight")]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "knight@example.com")]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_rejects_malformed_email() {
        let req = CreateUserRequest {
            username: "knight".into(),
            email: "not-an-email".into(),
            password: "hunter22".into(),
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn update_user_accepts_absent_password() {
        let req = UpdateUserRequest {
            username: "knight".into(),
            email: "knight@example.com".into(),
            password: None,
        };

        assert!(req.validate().is_ok());
    }
}
