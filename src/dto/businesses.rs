use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::business::{BusinessListing, BusinessSearchResult, CategoryBusinesses};
use crate::dto::categories::{CategoryDto, CategorySummaryDto};
use crate::dto::reviews::ReviewDto;

/// Business joined with the light `{id, name, slug, icon}` category
/// projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessDto {
    pub id: i32,
    pub category_id: i32,
    /// `None` when the category was deleted after the business was created.
    pub category: Option<CategorySummaryDto>,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub photos: Vec<String>,
    pub reviews: Vec<ReviewDto>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BusinessListing> for BusinessDto {
    fn from(value: BusinessListing) -> Self {
        let business = value.business;
        Self {
            id: business.id.get(),
            category_id: business.category_id.get(),
            category: value.category.map(Into::into),
            name: business.name.into_inner(),
            description: business.description.into_inner(),
            address: business.address.into_inner(),
            phone: business.phone.into_inner(),
            email: business.email.map(Into::into),
            website: business.website.map(Into::into),
            photos: business.photos.into_inner().into_iter().map(Into::into).collect(),
            reviews: business.reviews.into_iter().map(Into::into).collect(),
            created_at: business.created_at,
            updated_at: business.updated_at,
        }
    }
}

/// Search hit carrying the full category document. Reviews are not part of
/// this projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessSearchResultDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub email: Option<String>,
    pub phone: String,
    pub website: Option<String>,
    pub photos: Vec<String>,
    pub category: CategoryDto,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<BusinessSearchResult> for BusinessSearchResultDto {
    fn from(value: BusinessSearchResult) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description.into_inner(),
            address: value.address.into_inner(),
            email: value.email.map(Into::into),
            phone: value.phone.into_inner(),
            website: value.website.map(Into::into),
            photos: value.photos.into_inner().into_iter().map(Into::into).collect(),
            category: value.category.into(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBusinessesDto {
    pub category: CategoryDto,
    pub businesses: Vec<BusinessDto>,
    pub count: usize,
}

impl From<CategoryBusinesses> for CategoryBusinessesDto {
    fn from(value: CategoryBusinesses) -> Self {
        Self {
            category: value.category.into(),
            businesses: value.businesses.into_iter().map(Into::into).collect(),
            count: value.count,
        }
    }
}
