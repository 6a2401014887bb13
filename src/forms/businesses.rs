use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::business::{BusinessUpdate, NewBusiness};
use crate::domain::types::{
    BusinessAddress, BusinessDescription, BusinessName, BusinessPhone, BusinessPhotos, CategoryId,
    CategoryReference, EmailAddress, TypeConstraintError, WebsiteUrl,
};
use crate::forms::non_blank;

/// New business request. `category` is a category name or slug; `photos`
/// are URLs already produced by the upload pipeline.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBusinessForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    #[serde(default)]
    #[validate(length(max = 5))]
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateBusinessPayload {
    pub category: CategoryReference,
    pub name: BusinessName,
    pub description: BusinessDescription,
    pub address: BusinessAddress,
    pub phone: BusinessPhone,
    pub email: Option<EmailAddress>,
    pub website: Option<WebsiteUrl>,
    pub photos: BusinessPhotos,
}

impl CreateBusinessPayload {
    /// Builds the insertable business once `category` has been resolved.
    pub fn into_new_business(self, category_id: CategoryId) -> NewBusiness {
        let now = Utc::now().naive_utc();
        NewBusiness {
            category_id,
            name: self.name,
            description: self.description,
            address: self.address,
            phone: self.phone,
            email: self.email,
            website: self.website,
            photos: self.photos,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial business update. Every field is optional; reviews cannot be
/// changed here.
#[derive(Debug, Deserialize, Validate, Default)]
pub struct UpdateBusinessForm {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub category: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(length(min = 1))]
    pub address: Option<String>,
    #[validate(length(min = 1))]
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    #[validate(length(max = 5))]
    pub photos: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateBusinessPayload {
    pub category: Option<CategoryReference>,
    pub name: Option<BusinessName>,
    pub description: Option<BusinessDescription>,
    pub address: Option<BusinessAddress>,
    pub phone: Option<BusinessPhone>,
    pub email: Option<EmailAddress>,
    pub website: Option<WebsiteUrl>,
    pub photos: Option<BusinessPhotos>,
}

impl UpdateBusinessPayload {
    /// Builds the changeset; `category_id` is the resolved `category`, if any.
    pub fn into_update(self, category_id: Option<CategoryId>) -> BusinessUpdate {
        BusinessUpdate {
            category_id,
            name: self.name,
            description: self.description,
            address: self.address,
            phone: self.phone,
            email: self.email,
            website: self.website,
            photos: self.photos,
        }
    }
}

#[derive(Debug, Error)]
pub enum BusinessFormError {
    #[error("Business form validation failed: {0}")]
    Validation(String),
    #[error("Business form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for BusinessFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for BusinessFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateBusinessForm> for CreateBusinessPayload {
    type Error = BusinessFormError;

    fn try_from(value: CreateBusinessForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            category: CategoryReference::new(value.category)?,
            name: BusinessName::new(value.name)?,
            description: BusinessDescription::new(value.description)?,
            address: BusinessAddress::new(value.address)?,
            phone: BusinessPhone::new(value.phone)?,
            email: non_blank(value.email).map(EmailAddress::new).transpose()?,
            website: non_blank(value.website).map(WebsiteUrl::new).transpose()?,
            photos: BusinessPhotos::try_from(value.photos)?,
        })
    }
}

impl TryFrom<UpdateBusinessForm> for UpdateBusinessPayload {
    type Error = BusinessFormError;

    fn try_from(value: UpdateBusinessForm) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(Self {
            category: value.category.map(CategoryReference::new).transpose()?,
            name: value.name.map(BusinessName::new).transpose()?,
            description: value.description.map(BusinessDescription::new).transpose()?,
            address: value.address.map(BusinessAddress::new).transpose()?,
            phone: value.phone.map(BusinessPhone::new).transpose()?,
            email: non_blank(value.email).map(EmailAddress::new).transpose()?,
            website: non_blank(value.website).map(WebsiteUrl::new).transpose()?,
            photos: value.photos.map(BusinessPhotos::try_from).transpose()?,
        })
    }
}
