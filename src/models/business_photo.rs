use diesel::prelude::*;

/// Diesel model representing the `business_photos` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::business_photos)]
pub struct BusinessPhoto {
    pub id: i32,
    pub business_id: i32,
    pub url: String,
}

/// Insertable form of [`BusinessPhoto`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::business_photos)]
pub struct NewBusinessPhoto {
    pub business_id: i32,
    pub url: String,
}
