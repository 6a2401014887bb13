use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, CategoryUpdate as DomainCategoryUpdate,
    NewCategory as DomainNewCategory,
};
use crate::domain::types::{
    CategoryDescription, CategoryIcon, CategoryName, CategorySlug, TypeConstraintError,
};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial changeset for [`Category`]; `None` fields are skipped.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.name)?,
            slug: CategorySlug::new(category.slug)?,
            icon: category.icon.map(CategoryIcon::new).transpose()?,
            description: category
                .description
                .map(CategoryDescription::new)
                .transpose()?,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        Self {
            name: category.name.into_inner(),
            slug: category.slug.into_inner(),
            icon: category.icon.map(Into::into),
            description: category.description.map(Into::into),
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

impl CategoryChangeset {
    pub fn new(update: DomainCategoryUpdate, updated_at: NaiveDateTime) -> Self {
        Self {
            name: update.name.map(Into::into),
            description: update.description.map(Into::into),
            updated_at,
        }
    }
}
