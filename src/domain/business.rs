use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, CategorySummary};
use crate::domain::review::Review;
use crate::domain::types::{
    BusinessAddress, BusinessDescription, BusinessId, BusinessName, BusinessPhone,
    BusinessPhotos, CategoryId, EmailAddress, UserId, WebsiteUrl,
};

/// A listed business. `category_id` is the resolved owning category and may
/// dangle once that category is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Business {
    pub id: BusinessId,
    pub category_id: CategoryId,
    pub name: BusinessName,
    pub description: BusinessDescription,
    pub address: BusinessAddress,
    pub phone: BusinessPhone,
    pub email: Option<EmailAddress>,
    pub website: Option<WebsiteUrl>,
    pub photos: BusinessPhotos,
    /// Append-only review ledger, oldest first.
    pub reviews: Vec<Review>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Business {
    /// Returns `true` if `user_id` already reviewed this business.
    pub fn has_review_from(&self, user_id: UserId) -> bool {
        self.reviews.iter().any(|review| review.user_id == user_id)
    }
}

/// Information required to create a new [`Business`]. The category must
/// already be resolved to its identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBusiness {
    pub category_id: CategoryId,
    pub name: BusinessName,
    pub description: BusinessDescription,
    pub address: BusinessAddress,
    pub phone: BusinessPhone,
    pub email: Option<EmailAddress>,
    pub website: Option<WebsiteUrl>,
    pub photos: BusinessPhotos,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`Business`]; `None` leaves the field untouched.
///
/// Reviews are never part of an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BusinessUpdate {
    pub category_id: Option<CategoryId>,
    pub name: Option<BusinessName>,
    pub description: Option<BusinessDescription>,
    pub address: Option<BusinessAddress>,
    pub phone: Option<BusinessPhone>,
    pub email: Option<EmailAddress>,
    pub website: Option<WebsiteUrl>,
    pub photos: Option<BusinessPhotos>,
}

/// A business joined with the light projection of its category.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessListing {
    pub business: Business,
    /// `None` when the referenced category no longer exists.
    pub category: Option<CategorySummary>,
}

/// Projection returned by search: the full category document replaces the
/// category reference and reviews are left out.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessSearchResult {
    pub id: BusinessId,
    pub name: BusinessName,
    pub description: BusinessDescription,
    pub address: BusinessAddress,
    pub phone: BusinessPhone,
    pub email: Option<EmailAddress>,
    pub website: Option<WebsiteUrl>,
    pub photos: BusinessPhotos,
    pub category: Category,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl BusinessSearchResult {
    /// Builds the search projection of `business` joined with `category`.
    pub fn new(business: Business, category: Category) -> Self {
        Self {
            id: business.id,
            name: business.name,
            description: business.description,
            address: business.address,
            phone: business.phone,
            email: business.email,
            website: business.website,
            photos: business.photos,
            category,
            created_at: business.created_at,
            updated_at: business.updated_at,
        }
    }
}

/// A category together with every business that references it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBusinesses {
    pub category: Category,
    pub businesses: Vec<BusinessListing>,
    pub count: usize,
}
