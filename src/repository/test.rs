use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::domain::business::{
    Business, BusinessListing, BusinessSearchResult, BusinessUpdate, NewBusiness,
};
use crate::domain::category::{Category, CategorySummary, CategoryUpdate, NewCategory};
use crate::domain::review::{NewReview, Review, ReviewAuthor, ReviewWithAuthor};
use crate::domain::search::SearchQuery;
use crate::domain::types::{
    BusinessAddress, BusinessDescription, BusinessId, BusinessName, BusinessPhone, BusinessPhotos,
    CategoryId, CategoryName, CategorySlug, UserId,
};
use crate::repository::{
    BusinessReader, BusinessWriter, CategoryReader, CategoryWriter, RepositoryError,
    RepositoryResult, ReviewReader, ReviewWriter,
};

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    businesses: Vec<Business>,
    users: HashMap<UserId, ReviewAuthor>,
}

impl State {
    fn summary(&self, id: CategoryId) -> Option<CategorySummary> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .map(CategorySummary::from)
    }

    fn listing(&self, business: &Business) -> BusinessListing {
        BusinessListing {
            business: business.clone(),
            category: self.summary(business.category_id),
        }
    }

    fn next_category_id(&self) -> CategoryId {
        let max = self.categories.iter().map(|c| c.id.get()).max().unwrap_or(0);
        CategoryId::new(max + 1).expect("positive id")
    }

    fn next_business_id(&self) -> BusinessId {
        let max = self.businesses.iter().map(|b| b.id.get()).max().unwrap_or(0);
        BusinessId::new(max + 1).expect("positive id")
    }
}

fn epoch() -> NaiveDateTime {
    DateTime::from_timestamp(0, 0)
        .expect("valid timestamp")
        .naive_utc()
}

/// Category fixture with the given identity.
pub fn sample_category(id: i32, name: &str, slug: &str) -> Category {
    Category {
        id: CategoryId::new(id).expect("positive id"),
        name: CategoryName::new(name).expect("valid name"),
        slug: CategorySlug::new(slug).expect("valid slug"),
        icon: None,
        description: None,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

/// Business fixture without photos or reviews.
pub fn sample_business(id: i32, category_id: i32, name: &str) -> Business {
    Business {
        id: BusinessId::new(id).expect("positive id"),
        category_id: CategoryId::new(category_id).expect("positive id"),
        name: BusinessName::new(name).expect("valid name"),
        description: BusinessDescription::new("Neighbourhood favourite").expect("valid text"),
        address: BusinessAddress::new("1 Harbour Road").expect("valid text"),
        phone: BusinessPhone::new("+1 555 0100").expect("valid text"),
        email: None,
        website: None,
        photos: BusinessPhotos::default(),
        reviews: Vec::new(),
        created_at: epoch(),
        updated_at: epoch(),
    }
}

/// Simple in-memory repository used for unit tests.
///
/// Mirrors the uniqueness constraints of the SQLite schema so that services
/// observe the same failures.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>, businesses: Vec<Business>) -> Self {
        Self {
            state: Mutex::new(State {
                categories,
                businesses,
                users: HashMap::new(),
            }),
        }
    }

    pub fn with_users(self, users: Vec<(UserId, ReviewAuthor)>) -> Self {
        self.state().users.extend(users);
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("test repository lock poisoned")
    }

    pub fn business_count(&self) -> usize {
        self.state().businesses.len()
    }

    pub fn category_count(&self) -> usize {
        self.state().categories.len()
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let mut items = self.state().categories.clone();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self
            .state()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    fn find_category_by_reference(&self, reference: &str) -> RepositoryResult<Option<Category>> {
        let state = self.state();
        let by_name = state.categories.iter().find(|c| c.name == reference);
        let by_slug = state.categories.iter().find(|c| c.slug == reference);
        Ok(by_name.or(by_slug).cloned())
    }

    fn count_businesses_by_category(&self) -> RepositoryResult<HashMap<CategoryId, usize>> {
        let mut counts = HashMap::new();
        for business in &self.state().businesses {
            *counts.entry(business.category_id).or_insert(0) += 1;
        }
        Ok(counts)
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let mut state = self.state();
        if state
            .categories
            .iter()
            .any(|c| c.name == category.name || c.slug == category.slug)
        {
            return Err(RepositoryError::ConstraintViolation(
                "UNIQUE constraint failed: categories".to_string(),
            ));
        }

        let created = Category {
            id: state.next_category_id(),
            name: category.name.clone(),
            slug: category.slug.clone(),
            icon: category.icon.clone(),
            description: category.description.clone(),
            created_at: category.created_at,
            updated_at: category.updated_at,
        };
        state.categories.push(created.clone());
        Ok(created)
    }

    fn update_category(
        &self,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> RepositoryResult<Option<Category>> {
        let mut state = self.state();
        if let Some(name) = &update.name
            && state.categories.iter().any(|c| c.id != id && &c.name == name)
        {
            return Err(RepositoryError::ConstraintViolation(
                "UNIQUE constraint failed: categories.name".to_string(),
            ));
        }

        let Some(category) = state.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &update.name {
            category.name = name.clone();
        }
        if let Some(description) = &update.description {
            category.description = Some(description.clone());
        }
        category.updated_at = Utc::now().naive_utc();
        Ok(Some(category.clone()))
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        let mut state = self.state();
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        Ok(before - state.categories.len())
    }
}

impl BusinessReader for TestRepository {
    fn list_businesses(&self) -> RepositoryResult<Vec<BusinessListing>> {
        let state = self.state();
        Ok(state.businesses.iter().map(|b| state.listing(b)).collect())
    }

    fn get_business_by_id(&self, id: BusinessId) -> RepositoryResult<Option<BusinessListing>> {
        let state = self.state();
        Ok(state
            .businesses
            .iter()
            .find(|b| b.id == id)
            .map(|b| state.listing(b)))
    }

    fn list_businesses_by_category(
        &self,
        category_id: CategoryId,
    ) -> RepositoryResult<Vec<BusinessListing>> {
        let state = self.state();
        Ok(state
            .businesses
            .iter()
            .filter(|b| b.category_id == category_id)
            .map(|b| state.listing(b))
            .collect())
    }

    fn search_businesses(
        &self,
        query: &SearchQuery,
    ) -> RepositoryResult<Vec<BusinessSearchResult>> {
        let state = self.state();
        Ok(state
            .businesses
            .iter()
            .filter_map(|b| {
                let category = state.categories.iter().find(|c| c.id == b.category_id)?;
                Some(BusinessSearchResult::new(b.clone(), category.clone()))
            })
            .filter(|result| query.matches(result))
            .collect())
    }
}

impl BusinessWriter for TestRepository {
    fn create_business(&self, business: &NewBusiness) -> RepositoryResult<Business> {
        let mut state = self.state();
        let created = Business {
            id: state.next_business_id(),
            category_id: business.category_id,
            name: business.name.clone(),
            description: business.description.clone(),
            address: business.address.clone(),
            phone: business.phone.clone(),
            email: business.email.clone(),
            website: business.website.clone(),
            photos: business.photos.clone(),
            reviews: Vec::new(),
            created_at: business.created_at,
            updated_at: business.updated_at,
        };
        state.businesses.push(created.clone());
        Ok(created)
    }

    fn update_business(
        &self,
        id: BusinessId,
        update: &BusinessUpdate,
    ) -> RepositoryResult<Option<Business>> {
        let mut state = self.state();
        let Some(business) = state.businesses.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };

        if let Some(category_id) = update.category_id {
            business.category_id = category_id;
        }
        if let Some(name) = &update.name {
            business.name = name.clone();
        }
        if let Some(description) = &update.description {
            business.description = description.clone();
        }
        if let Some(address) = &update.address {
            business.address = address.clone();
        }
        if let Some(phone) = &update.phone {
            business.phone = phone.clone();
        }
        if let Some(email) = &update.email {
            business.email = Some(email.clone());
        }
        if let Some(website) = &update.website {
            business.website = Some(website.clone());
        }
        if let Some(photos) = &update.photos {
            business.photos = photos.clone();
        }
        business.updated_at = Utc::now().naive_utc();
        Ok(Some(business.clone()))
    }

    fn delete_business(&self, id: BusinessId) -> RepositoryResult<usize> {
        let mut state = self.state();
        let before = state.businesses.len();
        state.businesses.retain(|b| b.id != id);
        Ok(before - state.businesses.len())
    }
}

impl ReviewReader for TestRepository {
    fn list_reviews(&self, business_id: BusinessId) -> RepositoryResult<Vec<ReviewWithAuthor>> {
        let state = self.state();
        let Some(business) = state.businesses.iter().find(|b| b.id == business_id) else {
            return Ok(Vec::new());
        };
        Ok(business
            .reviews
            .iter()
            .map(|review| ReviewWithAuthor {
                review: review.clone(),
                author: state.users.get(&review.user_id).cloned(),
            })
            .collect())
    }
}

impl ReviewWriter for TestRepository {
    fn add_review(&self, review: &NewReview) -> RepositoryResult<usize> {
        let mut state = self.state();
        let Some(business) = state
            .businesses
            .iter_mut()
            .find(|b| b.id == review.business_id)
        else {
            return Err(RepositoryError::NotFound);
        };
        if business.has_review_from(review.user_id) {
            return Err(RepositoryError::ConstraintViolation(
                "UNIQUE constraint failed: reviews.business_id, reviews.user_id".to_string(),
            ));
        }
        business.reviews.push(Review::from(review.clone()));
        Ok(1)
    }
}
