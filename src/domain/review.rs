use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BusinessId, EmailAddress, ReviewComment, ReviewRating, UserId, UserName};

/// A review embedded in a business. At most one exists per user and business.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub user_id: UserId,
    pub rating: ReviewRating,
    pub comment: ReviewComment,
    pub created_at: NaiveDateTime,
}

/// Data required to append a [`Review`] to a business.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewReview {
    pub business_id: BusinessId,
    pub user_id: UserId,
    pub rating: ReviewRating,
    pub comment: ReviewComment,
    pub created_at: NaiveDateTime,
}

#[cfg(test)]
impl From<NewReview> for Review {
    fn from(review: NewReview) -> Self {
        Self {
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

/// Display fields of the user who wrote a review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewAuthor {
    pub name: UserName,
    pub email: EmailAddress,
}

/// A review with its author widened for display. `author` is `None` when the
/// user record no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewWithAuthor {
    pub review: Review,
    pub author: Option<ReviewAuthor>,
}
