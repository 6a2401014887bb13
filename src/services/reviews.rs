use crate::dto::businesses::BusinessDto;
use crate::dto::reviews::ReviewWithAuthorDto;
use crate::forms::reviews::AddReviewPayload;
use crate::repository::{BusinessReader, RepositoryError, ReviewReader, ReviewWriter};

use super::businesses::{business_id, load_listing};
use super::{ServiceError, ServiceResult};

const ALREADY_REVIEWED: &str = "already reviewed";

/// Appends a review unless the user already reviewed the business.
///
/// The ledger scan rejects the common case; the store's unique index rejects
/// a concurrent duplicate that slipped past the scan.
pub fn add_review<R>(id: i32, payload: AddReviewPayload, repo: &R) -> ServiceResult<BusinessDto>
where
    R: BusinessReader + ReviewWriter,
{
    let id = business_id(id)?;
    let listing = load_listing(id, repo)?;

    if listing.business.has_review_from(payload.user_id) {
        log::warn!("User {} already reviewed business {id}", payload.user_id);
        return Err(ServiceError::Conflict(ALREADY_REVIEWED.to_string()));
    }

    let review = payload.into_new_review(id);
    match repo.add_review(&review) {
        Ok(_) => {}
        Err(RepositoryError::ConstraintViolation(e)) => {
            log::warn!("Duplicate review of business {id}: {e}");
            return Err(ServiceError::Conflict(ALREADY_REVIEWED.to_string()));
        }
        Err(RepositoryError::NotFound) => return Err(ServiceError::NotFound("business")),
        Err(e) => {
            log::error!("Failed to add review: {e}");
            return Err(ServiceError::Internal);
        }
    }

    load_listing(id, repo).map(BusinessDto::from)
}

/// Reviews of a business with their authors widened to `{name, email}`.
pub fn list_reviews<R>(id: i32, repo: &R) -> ServiceResult<Vec<ReviewWithAuthorDto>>
where
    R: BusinessReader + ReviewReader,
{
    let id = business_id(id)?;
    load_listing(id, repo)?;

    match repo.list_reviews(id) {
        Ok(reviews) => Ok(reviews.into_iter().map(ReviewWithAuthorDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list reviews: {e}");
            Err(ServiceError::Internal)
        }
    }
}
