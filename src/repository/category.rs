use std::collections::HashMap;

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{
    Category as DbCategory, CategoryChangeset, NewCategory as DbNewCategory,
};
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, RepositoryError, RepositoryResult,
};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id.get())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category: Option<Category> = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn find_category_by_reference(&self, reference: &str) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        // Unique indexes bound this to one name match and one slug match.
        let mut candidates = categories::table
            .filter(
                categories::name
                    .eq(reference)
                    .or(categories::slug.eq(reference)),
            )
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?;

        if candidates.is_empty() {
            return Ok(None);
        }

        let index = candidates
            .iter()
            .position(|c| c.name == reference)
            .unwrap_or(0);
        let category: Category = candidates.swap_remove(index).try_into()?;
        Ok(Some(category))
    }

    fn count_businesses_by_category(&self) -> RepositoryResult<HashMap<CategoryId, usize>> {
        use crate::schema::businesses;

        let mut conn = self.conn()?;

        let rows: Vec<(i32, i64)> = businesses::table
            .group_by(businesses::category_id)
            .select((businesses::category_id, diesel::dsl::count_star()))
            .load(&mut conn)?;

        let mut counts = HashMap::with_capacity(rows.len());
        for (category_id, count) in rows {
            let category_id = CategoryId::new(category_id).map_err(RepositoryError::from)?;
            counts.insert(category_id, count as usize);
        }
        Ok(counts)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let created = diesel::insert_into(categories::table)
            .values(&db_category)
            .get_result::<DbCategory>(&mut conn)?;

        let created: Category = created.try_into()?;
        Ok(created)
    }

    fn update_category(
        &self,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let changeset = CategoryChangeset::new(update.clone(), Utc::now().naive_utc());

        let updated = diesel::update(categories::table.find(id.get()))
            .set(&changeset)
            .get_result::<DbCategory>(&mut conn)
            .optional()?;

        let updated: Option<Category> = updated.map(TryInto::try_into).transpose()?;
        Ok(updated)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::delete(categories::table.find(id.get())).execute(&mut conn)?;

        Ok(affected)
    }
}
