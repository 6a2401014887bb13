//! Diesel row types and their conversions to and from domain entities.

pub mod business;
pub mod business_photo;
pub mod category;
pub mod config;
pub mod review;
pub mod user;
