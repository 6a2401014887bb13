use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::business::{
    Business as DomainBusiness, BusinessUpdate as DomainBusinessUpdate,
    NewBusiness as DomainNewBusiness,
};
use crate::domain::review::Review as DomainReview;
use crate::domain::types::{
    BusinessAddress, BusinessDescription, BusinessName, BusinessPhone, BusinessPhotos,
    EmailAddress, PhotoUrl, TypeConstraintError, WebsiteUrl,
};
use crate::models::business_photo::BusinessPhoto;
use crate::models::review::Review;

/// Diesel model representing the `businesses` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::businesses)]
pub struct Business {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Business`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::businesses)]
pub struct NewBusiness {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub address: String,
    pub phone: String,
    pub email: Option<String>,
    pub website: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial changeset for [`Business`]; `None` fields are skipped.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::businesses)]
pub struct BusinessChangeset {
    pub category_id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl Business {
    /// Assembles the domain entity from the row and its embedded collections.
    ///
    /// `photos` and `reviews` must belong to this business and be in their
    /// stored order.
    pub fn into_domain(
        self,
        photos: Vec<BusinessPhoto>,
        reviews: Vec<Review>,
    ) -> Result<DomainBusiness, TypeConstraintError> {
        let photos = photos
            .into_iter()
            .map(|photo| PhotoUrl::new(photo.url))
            .collect::<Result<Vec<_>, _>>()?;
        let reviews = reviews
            .into_iter()
            .map(DomainReview::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DomainBusiness {
            id: self.id.try_into()?,
            category_id: self.category_id.try_into()?,
            name: BusinessName::new(self.name)?,
            description: BusinessDescription::new(self.description)?,
            address: BusinessAddress::new(self.address)?,
            phone: BusinessPhone::new(self.phone)?,
            email: self.email.map(EmailAddress::new).transpose()?,
            website: self.website.map(WebsiteUrl::new).transpose()?,
            photos: BusinessPhotos::new(photos)?,
            reviews,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<&DomainNewBusiness> for NewBusiness {
    fn from(business: &DomainNewBusiness) -> Self {
        Self {
            category_id: business.category_id.get(),
            name: business.name.as_str().to_string(),
            description: business.description.as_str().to_string(),
            address: business.address.as_str().to_string(),
            phone: business.phone.as_str().to_string(),
            email: business.email.as_ref().map(|e| e.as_str().to_string()),
            website: business.website.as_ref().map(|w| w.as_str().to_string()),
            created_at: business.created_at,
            updated_at: business.updated_at,
        }
    }
}

impl BusinessChangeset {
    pub fn new(update: &DomainBusinessUpdate, updated_at: NaiveDateTime) -> Self {
        Self {
            category_id: update.category_id.map(|id| id.get()),
            name: update.name.as_ref().map(|v| v.as_str().to_string()),
            description: update.description.as_ref().map(|v| v.as_str().to_string()),
            address: update.address.as_ref().map(|v| v.as_str().to_string()),
            phone: update.phone.as_ref().map(|v| v.as_str().to_string()),
            email: update.email.as_ref().map(|v| v.as_str().to_string()),
            website: update.website.as_ref().map(|v| v.as_str().to_string()),
            updated_at,
        }
    }
}
