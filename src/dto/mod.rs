//! Serializable response shapes returned by the service layer.

pub mod businesses;
pub mod categories;
pub mod reviews;
