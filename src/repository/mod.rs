use std::collections::HashMap;

use crate::db::{DbConnection, DbPool};
use crate::domain::business::{
    Business, BusinessListing, BusinessSearchResult, BusinessUpdate, NewBusiness,
};
use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::review::{NewReview, ReviewWithAuthor};
use crate::domain::search::SearchQuery;
use crate::domain::types::{BusinessId, CategoryId};

pub mod business;
pub mod category;
pub mod errors;
pub mod review;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Find the category whose name or slug equals `reference` exactly.
    ///
    /// When the name of one category and the slug of another both match, the
    /// name match wins.
    fn find_category_by_reference(&self, reference: &str) -> RepositoryResult<Option<Category>>;
    /// Number of businesses referencing each category. Categories without
    /// businesses are absent from the map.
    fn count_businesses_by_category(&self) -> RepositoryResult<HashMap<CategoryId, usize>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category and return the stored record.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Apply a partial update. Returns `None` if the category does not exist.
    fn update_category(
        &self,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> RepositoryResult<Option<Category>>;
    /// Delete a category without touching businesses that reference it.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for business entities.
pub trait BusinessReader {
    /// List every business joined with its category summary.
    fn list_businesses(&self) -> RepositoryResult<Vec<BusinessListing>>;
    /// Retrieve a business joined with its category summary.
    fn get_business_by_id(&self, id: BusinessId) -> RepositoryResult<Option<BusinessListing>>;
    /// List businesses whose category reference equals `category_id`.
    fn list_businesses_by_category(
        &self,
        category_id: CategoryId,
    ) -> RepositoryResult<Vec<BusinessListing>>;
    /// Businesses joined with their full category that match `query`, in
    /// store order. Businesses with a dangling category never match.
    fn search_businesses(&self, query: &SearchQuery)
    -> RepositoryResult<Vec<BusinessSearchResult>>;
}

/// Write operations for business entities.
pub trait BusinessWriter {
    /// Persist a new business together with its photos.
    fn create_business(&self, business: &NewBusiness) -> RepositoryResult<Business>;
    /// Apply a partial update. Returns `None` if the business does not exist.
    fn update_business(
        &self,
        id: BusinessId,
        update: &BusinessUpdate,
    ) -> RepositoryResult<Option<Business>>;
    /// Delete a business along with its photos and reviews.
    fn delete_business(&self, id: BusinessId) -> RepositoryResult<usize>;
}

/// Read-only operations for the review ledger.
pub trait ReviewReader {
    /// Reviews of a business, oldest first, with authors widened.
    fn list_reviews(&self, business_id: BusinessId) -> RepositoryResult<Vec<ReviewWithAuthor>>;
}

/// Append operations for the review ledger.
pub trait ReviewWriter {
    /// Append a review.
    ///
    /// Fails with [`RepositoryError::ConstraintViolation`] if the user already
    /// reviewed the business.
    fn add_review(&self, review: &NewReview) -> RepositoryResult<usize>;
}
