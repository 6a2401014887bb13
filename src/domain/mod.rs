//! Domain entities and value types, free of persistence and transport
//! concerns.

pub mod business;
pub mod category;
pub mod review;
pub mod search;
pub mod slug;
pub mod types;
