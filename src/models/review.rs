use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::review::{NewReview as DomainNewReview, Review as DomainReview};
use crate::domain::types::{ReviewComment, ReviewRating, TypeConstraintError};

/// Diesel model representing the `reviews` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct Review {
    pub id: i32,
    pub business_id: i32,
    pub user_id: i32,
    pub rating: f64,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Review`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview {
    pub business_id: i32,
    pub user_id: i32,
    pub rating: f64,
    pub comment: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Review> for DomainReview {
    type Error = TypeConstraintError;

    fn try_from(review: Review) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: review.user_id.try_into()?,
            rating: ReviewRating::new(review.rating)?,
            comment: ReviewComment::new(review.comment)?,
            created_at: review.created_at,
        })
    }
}

impl From<&DomainNewReview> for NewReview {
    fn from(review: &DomainNewReview) -> Self {
        Self {
            business_id: review.business_id.get(),
            user_id: review.user_id.get(),
            rating: review.rating.get(),
            comment: review.comment.as_str().to_string(),
            created_at: review.created_at,
        }
    }
}
