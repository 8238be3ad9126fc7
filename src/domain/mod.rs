//! Domain models for the Drinks API

pub mod drink;

pub use drink::*;
