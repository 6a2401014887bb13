use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{CategoryUpdate, NewCategory};
use crate::domain::types::{
    CategoryDescription, CategoryIcon, CategoryName, CategorySlug, TypeConstraintError,
};
use crate::forms::non_blank;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
    /// Derived from `name` when omitted.
    pub slug: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCategoryPayload {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub icon: Option<CategoryIcon>,
    pub description: Option<CategoryDescription>,
}

impl CreateCategoryPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            slug: self.slug,
            icon: self.icon,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate, Default)]
pub struct UpdateCategoryForm {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryPayload {
    pub update: CategoryUpdate,
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(String),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateCategoryForm> for CreateCategoryPayload {
    type Error = CategoryFormError;

    fn try_from(value: CreateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = CategoryName::new(value.name)?;
        let slug = match non_blank(value.slug) {
            Some(slug) => CategorySlug::new(slug)?,
            None => CategorySlug::from_name(&name)?,
        };

        Ok(Self {
            name,
            slug,
            icon: non_blank(value.icon).map(CategoryIcon::new).transpose()?,
            description: non_blank(value.description)
                .map(CategoryDescription::new)
                .transpose()?,
        })
    }
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryPayload {
    type Error = CategoryFormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            update: CategoryUpdate {
                name: value.name.map(CategoryName::new).transpose()?,
                description: non_blank(value.description)
                    .map(CategoryDescription::new)
                    .transpose()?,
            },
        })
    }
}
