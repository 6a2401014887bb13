use crate::domain::business::{BusinessListing, CategoryBusinesses};
use crate::domain::category::Category;
use crate::domain::search::SearchQuery;
use crate::domain::types::{BusinessId, CategoryId, CategoryReference};
use crate::dto::businesses::{BusinessDto, BusinessSearchResultDto, CategoryBusinessesDto};
use crate::forms::businesses::{CreateBusinessPayload, UpdateBusinessPayload};
use crate::repository::{BusinessReader, BusinessWriter, CategoryReader};

use super::{ServiceError, ServiceResult};

pub(crate) fn business_id(raw: i32) -> ServiceResult<BusinessId> {
    BusinessId::new(raw).map_err(|_| ServiceError::NotFound("business"))
}

/// Resolves a free-text category reference to the stored category.
///
/// The reference must equal a category name or slug exactly.
pub fn resolve_category<R>(reference: &CategoryReference, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    match repo.find_category_by_reference(reference.as_str()) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => {
            log::warn!("Category reference `{reference}` matched nothing");
            Err(ServiceError::NotFound("category"))
        }
        Err(e) => {
            log::error!("Failed to resolve category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Loads the joined listing of a business; absence is `NotFound`.
pub(crate) fn load_listing<R>(id: BusinessId, repo: &R) -> ServiceResult<BusinessListing>
where
    R: BusinessReader,
{
    match repo.get_business_by_id(id) {
        Ok(Some(listing)) => Ok(listing),
        Ok(None) => Err(ServiceError::NotFound("business")),
        Err(e) => {
            log::error!("Failed to get business: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn create_business<R>(payload: CreateBusinessPayload, repo: &R) -> ServiceResult<BusinessDto>
where
    R: CategoryReader + BusinessWriter,
{
    let category = resolve_category(&payload.category, repo)?;
    let business = payload.into_new_business(category.id);

    match repo.create_business(&business) {
        Ok(business) => Ok(BusinessListing {
            business,
            category: Some(category.into()),
        }
        .into()),
        Err(e) => {
            log::error!("Failed to create business: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_businesses<R>(repo: &R) -> ServiceResult<Vec<BusinessDto>>
where
    R: BusinessReader,
{
    match repo.list_businesses() {
        Ok(listings) => Ok(listings.into_iter().map(BusinessDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list businesses: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn get_business<R>(id: i32, repo: &R) -> ServiceResult<BusinessDto>
where
    R: BusinessReader,
{
    let id = business_id(id)?;
    load_listing(id, repo).map(BusinessDto::from)
}

/// Applies a partial update. A supplied category reference is resolved
/// before anything is written.
pub fn update_business<R>(
    id: i32,
    payload: UpdateBusinessPayload,
    repo: &R,
) -> ServiceResult<BusinessDto>
where
    R: CategoryReader + BusinessReader + BusinessWriter,
{
    let id = business_id(id)?;
    let category_id = match &payload.category {
        Some(reference) => Some(resolve_category(reference, repo)?.id),
        None => None,
    };
    let update = payload.into_update(category_id);

    match repo.update_business(id, &update) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound("business")),
        Err(e) => {
            log::error!("Failed to update business: {e}");
            return Err(ServiceError::Internal);
        }
    }

    load_listing(id, repo).map(BusinessDto::from)
}

/// Deletes a business together with its photos and reviews.
pub fn delete_business<R>(id: i32, repo: &R) -> ServiceResult<()>
where
    R: BusinessWriter,
{
    let id = business_id(id)?;
    match repo.delete_business(id) {
        Ok(0) => Err(ServiceError::NotFound("business")),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete business: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The category identified by `raw_id` with every business referencing it.
pub fn list_by_category<R>(raw_id: &str, repo: &R) -> ServiceResult<CategoryBusinessesDto>
where
    R: CategoryReader + BusinessReader,
{
    let category_id = CategoryId::parse(raw_id)
        .map_err(|e| ServiceError::InvalidArgument(format!("category id `{raw_id}`: {e}")))?;

    let category = match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => category,
        Ok(None) => return Err(ServiceError::NotFound("category")),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let businesses = repo
        .list_businesses_by_category(category_id)
        .map_err(|e| {
            log::error!("Failed to list businesses by category: {e}");
            ServiceError::Internal
        })?;

    let count = businesses.len();
    Ok(CategoryBusinesses {
        category,
        businesses,
        count,
    }
    .into())
}

/// Case-insensitive substring search over businesses and their categories.
///
/// Blank queries return nothing without touching the store.
pub fn search_businesses<R>(raw_query: &str, repo: &R) -> ServiceResult<Vec<BusinessSearchResultDto>>
where
    R: BusinessReader,
{
    let Some(query) = SearchQuery::parse(raw_query) else {
        return Ok(Vec::new());
    };

    match repo.search_businesses(&query) {
        Ok(results) => Ok(results
            .into_iter()
            .map(BusinessSearchResultDto::from)
            .collect()),
        Err(e) => {
            log::error!("Failed to search businesses: {e}");
            Err(ServiceError::Internal)
        }
    }
}
