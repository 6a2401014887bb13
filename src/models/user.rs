use diesel::prelude::*;

use crate::domain::review::ReviewAuthor;
use crate::domain::types::{EmailAddress, TypeConstraintError, UserName};

/// Diesel model representing the `users` table.
///
/// Rows are owned by the identity service; this crate only reads them.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl TryFrom<User> for ReviewAuthor {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            name: UserName::new(user.name)?,
            email: EmailAddress::new(user.email)?,
        })
    }
}
