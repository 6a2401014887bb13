use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryDescription, CategoryIcon, CategoryId, CategoryName, CategorySlug,
};

/// Canonical category record. Both `name` and `slug` are unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub icon: Option<CategoryIcon>,
    pub description: Option<CategoryDescription>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub icon: Option<CategoryIcon>,
    pub description: Option<CategoryDescription>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update of a [`Category`]; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryUpdate {
    pub name: Option<CategoryName>,
    pub description: Option<CategoryDescription>,
}

/// Light projection of a category embedded in business listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: CategoryName,
    pub slug: CategorySlug,
    pub icon: Option<CategoryIcon>,
}

impl From<Category> for CategorySummary {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            icon: category.icon,
        }
    }
}

/// A category annotated with the number of businesses referencing it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryWithCount {
    pub category: Category,
    pub count: usize,
}

/// Pairs every category with its business count. Categories missing from
/// `counts` report zero.
pub fn attach_business_counts(
    categories: Vec<Category>,
    counts: &HashMap<CategoryId, usize>,
) -> Vec<CategoryWithCount> {
    categories
        .into_iter()
        .map(|category| {
            let count = counts.get(&category.id).copied().unwrap_or(0);
            CategoryWithCount { category, count }
        })
        .collect()
}
