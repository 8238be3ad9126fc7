//! REST API handlers and shared response types

pub mod drink;
pub mod health;
pub mod metrics;

use crate::domain::{Drink, DrinkSummary};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// `GET /drinks` body: every drink in short form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinkSummariesResponse {
    pub success: bool,
    pub drinks: Vec<DrinkSummary>,
}

/// `GET /drinks-detail` body: every drink in long form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinksResponse {
    pub success: bool,
    pub drinks: Vec<Drink>,
}

/// Create and update body: the written drink in long form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinkResponse {
    pub success: bool,
    pub drinks: Drink,
}

/// `DELETE /drinks/{id}` body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    /// Id of the deleted drink
    pub id: i64,
}

impl DrinkSummariesResponse {
    pub fn new(drinks: Vec<DrinkSummary>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

impl DrinksResponse {
    pub fn new(drinks: Vec<Drink>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

impl DrinkResponse {
    pub fn new(drink: Drink) -> Self {
        Self {
            success: true,
            drinks: drink,
        }
    }
}

impl DeleteDrinkResponse {
    pub fn new(id: i64) -> Self {
        Self { success: true, id }
    }
}
