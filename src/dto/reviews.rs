use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::review::{Review, ReviewAuthor, ReviewWithAuthor};

/// Review as embedded in a business document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDto {
    pub user_id: i32,
    pub rating: f64,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

impl From<Review> for ReviewDto {
    fn from(value: Review) -> Self {
        Self {
            user_id: value.user_id.get(),
            rating: value.rating.get(),
            comment: value.comment.into_inner(),
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewAuthorDto {
    pub name: String,
    pub email: String,
}

impl From<ReviewAuthor> for ReviewAuthorDto {
    fn from(value: ReviewAuthor) -> Self {
        Self {
            name: value.name.into_inner(),
            email: value.email.into_inner(),
        }
    }
}

/// Review with its author widened to `{name, email}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewWithAuthorDto {
    pub user_id: i32,
    pub user: Option<ReviewAuthorDto>,
    pub rating: f64,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

impl From<ReviewWithAuthor> for ReviewWithAuthorDto {
    fn from(value: ReviewWithAuthor) -> Self {
        let review = ReviewDto::from(value.review);
        Self {
            user_id: review.user_id,
            user: value.author.map(Into::into),
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}
