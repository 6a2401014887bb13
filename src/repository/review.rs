use diesel::prelude::*;

use crate::domain::review::{NewReview, Review, ReviewAuthor, ReviewWithAuthor};
use crate::domain::types::BusinessId;
use crate::models::review::{NewReview as DbNewReview, Review as DbReview};
use crate::models::user::User as DbUser;
use crate::repository::{DieselRepository, RepositoryResult, ReviewReader, ReviewWriter};

impl ReviewReader for DieselRepository {
    fn list_reviews(&self, business_id: BusinessId) -> RepositoryResult<Vec<ReviewWithAuthor>> {
        use crate::schema::{reviews, users};

        let mut conn = self.conn()?;

        let rows = reviews::table
            .left_join(users::table)
            .filter(reviews::business_id.eq(business_id.get()))
            .order((reviews::created_at.asc(), reviews::id.asc()))
            .load::<(DbReview, Option<DbUser>)>(&mut conn)?;

        let mut items = Vec::with_capacity(rows.len());
        for (review, user) in rows {
            items.push(ReviewWithAuthor {
                review: Review::try_from(review)?,
                // Users are owned by the identity service; a record that
                // fails validation is shown without an author.
                author: user.and_then(|user| ReviewAuthor::try_from(user).ok()),
            });
        }
        Ok(items)
    }
}

impl ReviewWriter for DieselRepository {
    fn add_review(&self, review: &NewReview) -> RepositoryResult<usize> {
        use crate::schema::reviews;

        let mut conn = self.conn()?;

        // The unique (business_id, user_id) index turns this insert into a
        // conditional append: a concurrent duplicate fails with a
        // constraint violation instead of adding a second review.
        let affected = diesel::insert_into(reviews::table)
            .values(DbNewReview::from(review))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
