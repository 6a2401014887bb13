use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::{Category, CategorySummary, CategoryWithCount};

/// Full category document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            slug: value.slug.into_inner(),
            icon: value.icon.map(Into::into),
            description: value.description.map(Into::into),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Category document annotated with its business count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithCountDto {
    #[serde(flatten)]
    pub category: CategoryDto,
    pub count: usize,
}

impl From<CategoryWithCount> for CategoryWithCountDto {
    fn from(value: CategoryWithCount) -> Self {
        Self {
            category: value.category.into(),
            count: value.count,
        }
    }
}

/// Light category projection embedded in business listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummaryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub icon: Option<String>,
}

impl From<CategorySummary> for CategorySummaryDto {
    fn from(value: CategorySummary) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            slug: value.slug.into_inner(),
            icon: value.icon.map(Into::into),
        }
    }
}
