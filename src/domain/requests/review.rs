use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct FindProductReviews {
    #[serde(default = "default_page")]
    pub page: i32,

    #[serde(default = "default_page_size")]
    pub page_size: i32,
}

fn default_page() -> i32 {
    1
}

fn default_page_size() -> i32 {
    10
}

// The author is carried in the body since there is no session to infer it from.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, message = "User ID is required"))]
    #[schema(example = 1)]
    pub user_id: i32,

    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    #[schema(example = 4)]
    pub rating: i32,

    #[schema(example = "Solid build quality, battery could be better")]
    pub comment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_must_stay_within_bounds() {
        for rating in [0, 6, -3] {
            let req = CreateReviewRequest {
                user_id: 1,
                rating,
                comment: None,
            };
            assert!(req.validate().is_err(), "rating {rating} should be rejected");
        }

        let req = CreateReviewRequest {
            user_id: 1,
            rating: 5,
            comment: Some("great".into()),
        };
        assert!(req.validate().is_ok());
    }
}
