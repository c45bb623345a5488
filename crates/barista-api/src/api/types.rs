//! Request and response types for the drinks API
//!
//! The success envelope mirrors what the frontend already parses:
//! `{"success": true, "drinks": ...}`.

use crate::models::{Drink, DrinkShort, RecipeIngredient};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to create a new drink
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDrinkRequest {
    /// Unique drink title
    pub title: String,

    /// Full recipe
    pub recipe: Vec<RecipeIngredient>,
}

/// Request to update an existing drink; both fields are optional
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDrinkRequest {
    /// New title, when changing it
    pub title: Option<String>,

    /// New recipe, when changing it
    pub recipe: Option<Vec<RecipeIngredient>>,
}

/// Listing of drinks in short form
#[derive(Debug, Serialize, ToSchema)]
pub struct DrinksResponse {
    /// Always true for success responses
    pub success: bool,

    /// Drinks with ingredient names stripped
    pub drinks: Vec<DrinkShort>,
}

/// Listing of drinks with full recipes
#[derive(Debug, Serialize, ToSchema)]
pub struct DrinksDetailResponse {
    /// Always true for success responses
    pub success: bool,

    /// Drinks with their full recipes
    pub drinks: Vec<Drink>,
}

/// Response carrying a single drink in long form
#[derive(Debug, Serialize, ToSchema)]
pub struct DrinkResponse {
    /// Always true for success responses
    pub success: bool,

    /// The created or updated drink
    pub drinks: Drink,
}

/// Response after deleting a drink
#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteDrinkResponse {
    /// Always true for success responses
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheckResponse {
    /// Service status
    pub status: String,

    /// Running crate version
    pub version: String,
}
