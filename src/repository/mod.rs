//! Data access layer (Repository pattern)

pub mod drink;

pub use drink::{DrinkRepository, DrinkRepositoryImpl};
