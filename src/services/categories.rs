use crate::domain::category::attach_business_counts;
use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoryDto, CategoryWithCountDto};
use crate::forms::categories::{CreateCategoryPayload, UpdateCategoryPayload};
use crate::repository::{CategoryReader, CategoryWriter, RepositoryError};

use super::{ServiceError, ServiceResult};

const DUPLICATE_CATEGORY: &str = "category name or slug already exists";

fn category_id(raw: i32) -> ServiceResult<CategoryId> {
    CategoryId::new(raw).map_err(|_| ServiceError::NotFound("category"))
}

pub fn create_category<R>(payload: CreateCategoryPayload, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    let category = payload.into_new_category();
    match repo.create_category(&category) {
        Ok(created) => Ok(created.into()),
        Err(RepositoryError::ConstraintViolation(e)) => {
            log::warn!("Rejected category `{}`: {e}", category.name);
            Err(ServiceError::Conflict(DUPLICATE_CATEGORY.to_string()))
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Every category with a live count of the businesses referencing it.
pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryWithCountDto>>
where
    R: CategoryReader,
{
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;
    let counts = repo.count_businesses_by_category().map_err(|e| {
        log::error!("Failed to count businesses per category: {e}");
        ServiceError::Internal
    })?;

    Ok(attach_business_counts(categories, &counts)
        .into_iter()
        .map(CategoryWithCountDto::from)
        .collect())
}

pub fn get_category<R>(id: i32, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryReader,
{
    let id = category_id(id)?;
    match repo.get_category_by_id(id) {
        Ok(Some(category)) => Ok(category.into()),
        Ok(None) => Err(ServiceError::NotFound("category")),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_category<R>(
    id: i32,
    payload: UpdateCategoryPayload,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    let id = category_id(id)?;
    match repo.update_category(id, &payload.update) {
        Ok(Some(category)) => Ok(category.into()),
        Ok(None) => Err(ServiceError::NotFound("category")),
        Err(RepositoryError::ConstraintViolation(e)) => {
            log::warn!("Rejected update of category {id}: {e}");
            Err(ServiceError::Conflict(DUPLICATE_CATEGORY.to_string()))
        }
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deletes the category only. Businesses keep their now dangling reference.
pub fn delete_category<R>(id: i32, repo: &R) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    let id = category_id(id)?;
    match repo.delete_category(id) {
        Ok(0) => Err(ServiceError::NotFound("category")),
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category: {e}");
            Err(ServiceError::Internal)
        }
    }
}
