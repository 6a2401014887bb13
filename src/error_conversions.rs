//! Conversions from domain and form errors into [`ServiceError`].
//!
//! Kept apart from the domain layer so that `data`-only consumers do not pull
//! in the service types.

use crate::domain::types::TypeConstraintError;
use crate::forms::businesses::BusinessFormError;
use crate::forms::categories::CategoryFormError;
use crate::forms::reviews::ReviewFormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<CategoryFormError> for ServiceError {
    fn from(val: CategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<BusinessFormError> for ServiceError {
    fn from(val: BusinessFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<ReviewFormError> for ServiceError {
    fn from(val: ReviewFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
