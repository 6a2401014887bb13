use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::review::NewReview;
use crate::domain::types::{BusinessId, ReviewComment, ReviewRating, TypeConstraintError, UserId};

/// Review request. `user_id` is the already authenticated caller.
#[derive(Debug, Deserialize, Validate)]
pub struct AddReviewForm {
    #[validate(range(min = 1))]
    pub user_id: i32,
    #[validate(range(min = 1.0, max = 5.0))]
    pub rating: f64,
    #[validate(length(min = 1))]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddReviewPayload {
    pub user_id: UserId,
    pub rating: ReviewRating,
    pub comment: ReviewComment,
}

impl AddReviewPayload {
    /// Stamps the review with the current time.
    pub fn into_new_review(self, business_id: BusinessId) -> NewReview {
        NewReview {
            business_id,
            user_id: self.user_id,
            rating: self.rating,
            comment: self.comment,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReviewFormError {
    #[error("Review form validation failed: {0}")]
    Validation(String),
    #[error("Review form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for ReviewFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for ReviewFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddReviewForm> for AddReviewPayload {
    type Error = ReviewFormError;

    fn try_from(value: AddReviewForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            user_id: UserId::new(value.user_id)?,
            rating: ReviewRating::new(value.rating)?,
            comment: ReviewComment::new(value.comment)?,
        })
    }
}
