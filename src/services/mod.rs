pub mod businesses;
pub mod categories;
pub mod errors;
pub mod reviews;

pub use errors::{ServiceError, ServiceResult};
