use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::business::{
    Business, BusinessListing, BusinessSearchResult, BusinessUpdate, NewBusiness,
};
use crate::domain::category::{Category, CategorySummary};
use crate::domain::search::SearchQuery;
use crate::domain::types::{BusinessId, BusinessPhotos, CategoryId, PhotoUrl};
use crate::models::business::{
    Business as DbBusiness, BusinessChangeset, NewBusiness as DbNewBusiness,
};
use crate::models::business_photo::{BusinessPhoto as DbBusinessPhoto, NewBusinessPhoto};
use crate::models::category::Category as DbCategory;
use crate::models::review::Review as DbReview;
use crate::repository::{
    BusinessReader, BusinessWriter, DieselRepository, RepositoryError, RepositoryResult,
};

fn load_photos(
    conn: &mut SqliteConnection,
    business_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DbBusinessPhoto>>> {
    use crate::schema::business_photos;

    let mut grouped: HashMap<i32, Vec<DbBusinessPhoto>> = HashMap::new();
    let photos = business_photos::table
        .filter(business_photos::business_id.eq_any(business_ids))
        .order(business_photos::id.asc())
        .load::<DbBusinessPhoto>(conn)?;
    for photo in photos {
        grouped.entry(photo.business_id).or_default().push(photo);
    }
    Ok(grouped)
}

fn load_reviews(
    conn: &mut SqliteConnection,
    business_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<DbReview>>> {
    use crate::schema::reviews;

    let mut grouped: HashMap<i32, Vec<DbReview>> = HashMap::new();
    let reviews = reviews::table
        .filter(reviews::business_id.eq_any(business_ids))
        .order((reviews::created_at.asc(), reviews::id.asc()))
        .load::<DbReview>(conn)?;
    for review in reviews {
        grouped.entry(review.business_id).or_default().push(review);
    }
    Ok(grouped)
}

/// Attaches photos and reviews to business rows, preserving row order.
fn assemble_businesses(
    conn: &mut SqliteConnection,
    rows: Vec<DbBusiness>,
) -> RepositoryResult<Vec<Business>> {
    let ids = rows.iter().map(|row| row.id).collect::<Vec<_>>();
    let mut photos = load_photos(conn, &ids)?;
    let mut reviews = load_reviews(conn, &ids)?;

    rows.into_iter()
        .map(|row| {
            let row_photos = photos.remove(&row.id).unwrap_or_default();
            let row_reviews = reviews.remove(&row.id).unwrap_or_default();
            row.into_domain(row_photos, row_reviews)
                .map_err(RepositoryError::from)
        })
        .collect()
}

fn assemble_listings(
    conn: &mut SqliteConnection,
    rows: Vec<(DbBusiness, Option<DbCategory>)>,
) -> RepositoryResult<Vec<BusinessListing>> {
    let (rows, categories): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
    let businesses = assemble_businesses(conn, rows)?;

    businesses
        .into_iter()
        .zip(categories)
        .map(|(business, category)| -> RepositoryResult<BusinessListing> {
            let category = category
                .map(|c| Category::try_from(c).map(CategorySummary::from))
                .transpose()?;
            Ok(BusinessListing { business, category })
        })
        .collect()
}

fn insert_photos(
    conn: &mut SqliteConnection,
    business_id: i32,
    photos: &BusinessPhotos,
) -> RepositoryResult<usize> {
    use crate::schema::business_photos;

    if photos.is_empty() {
        return Ok(0);
    }

    let rows = photos
        .as_slice()
        .iter()
        .map(|url: &PhotoUrl| NewBusinessPhoto {
            business_id,
            url: url.as_str().to_string(),
        })
        .collect::<Vec<_>>();

    let affected = diesel::insert_into(business_photos::table)
        .values(&rows)
        .execute(conn)?;
    Ok(affected)
}

fn reload_business(conn: &mut SqliteConnection, row: DbBusiness) -> RepositoryResult<Business> {
    let mut businesses = assemble_businesses(conn, vec![row])?;
    businesses.pop().ok_or(RepositoryError::NotFound)
}

impl BusinessReader for DieselRepository {
    fn list_businesses(&self) -> RepositoryResult<Vec<BusinessListing>> {
        use crate::schema::{businesses, categories};

        let mut conn = self.conn()?;

        let rows = businesses::table
            .left_join(categories::table)
            .order(businesses::id.asc())
            .load::<(DbBusiness, Option<DbCategory>)>(&mut conn)?;

        assemble_listings(&mut conn, rows)
    }

    fn get_business_by_id(&self, id: BusinessId) -> RepositoryResult<Option<BusinessListing>> {
        use crate::schema::{businesses, categories};

        let mut conn = self.conn()?;

        let row = businesses::table
            .left_join(categories::table)
            .filter(businesses::id.eq(id.get()))
            .first::<(DbBusiness, Option<DbCategory>)>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(assemble_listings(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn list_businesses_by_category(
        &self,
        category_id: CategoryId,
    ) -> RepositoryResult<Vec<BusinessListing>> {
        use crate::schema::{businesses, categories};

        let mut conn = self.conn()?;

        let rows = businesses::table
            .left_join(categories::table)
            .filter(businesses::category_id.eq(category_id.get()))
            .order(businesses::id.asc())
            .load::<(DbBusiness, Option<DbCategory>)>(&mut conn)?;

        assemble_listings(&mut conn, rows)
    }

    fn search_businesses(
        &self,
        query: &SearchQuery,
    ) -> RepositoryResult<Vec<BusinessSearchResult>> {
        use crate::schema::{businesses, categories};

        let mut conn = self.conn()?;

        let rows = businesses::table
            .inner_join(categories::table)
            .order(businesses::id.asc())
            .load::<(DbBusiness, DbCategory)>(&mut conn)?;

        // Match on the scalar fields first so photos are only loaded for hits.
        let mut matched = Vec::new();
        for (business, category) in rows {
            let category = Category::try_from(category)?;
            let business = business.into_domain(Vec::new(), Vec::new())?;
            let result = BusinessSearchResult::new(business, category);
            if query.matches(&result) {
                matched.push(result);
            }
        }

        let ids = matched.iter().map(|r| r.id.get()).collect::<Vec<_>>();
        let mut photos = load_photos(&mut conn, &ids)?;
        for result in &mut matched {
            let urls = photos
                .remove(&result.id.get())
                .unwrap_or_default()
                .into_iter()
                .map(|photo| PhotoUrl::new(photo.url))
                .collect::<Result<Vec<_>, _>>()?;
            result.photos = BusinessPhotos::new(urls)?;
        }

        Ok(matched)
    }
}

impl BusinessWriter for DieselRepository {
    fn create_business(&self, business: &NewBusiness) -> RepositoryResult<Business> {
        use crate::schema::businesses;

        let mut conn = self.conn()?;
        let db_business = DbNewBusiness::from(business);

        conn.transaction(|conn| {
            let row = diesel::insert_into(businesses::table)
                .values(&db_business)
                .get_result::<DbBusiness>(conn)?;
            insert_photos(conn, row.id, &business.photos)?;
            reload_business(conn, row)
        })
    }

    fn update_business(
        &self,
        id: BusinessId,
        update: &BusinessUpdate,
    ) -> RepositoryResult<Option<Business>> {
        use crate::schema::{business_photos, businesses};

        let mut conn = self.conn()?;
        let changeset = BusinessChangeset::new(update, Utc::now().naive_utc());

        conn.transaction(|conn| {
            let row = diesel::update(businesses::table.find(id.get()))
                .set(&changeset)
                .get_result::<DbBusiness>(conn)
                .optional()?;

            let Some(row) = row else {
                return Ok(None);
            };

            if let Some(photos) = &update.photos {
                diesel::delete(
                    business_photos::table.filter(business_photos::business_id.eq(row.id)),
                )
                .execute(conn)?;
                insert_photos(conn, row.id, photos)?;
            }

            reload_business(conn, row).map(Some)
        })
    }

    fn delete_business(&self, id: BusinessId) -> RepositoryResult<usize> {
        use crate::schema::{business_photos, businesses, reviews};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(reviews::table.filter(reviews::business_id.eq(id.get())))
                .execute(conn)?;
            diesel::delete(
                business_photos::table.filter(business_photos::business_id.eq(id.get())),
            )
            .execute(conn)?;
            let affected = diesel::delete(businesses::table.find(id.get())).execute(conn)?;
            Ok(affected)
        })?;

        Ok(affected)
    }
}
