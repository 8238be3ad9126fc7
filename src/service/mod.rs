//! Business logic layer

pub mod drink;

pub use drink::DrinkService;
