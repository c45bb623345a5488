//! Domain model for the drinks menu

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One ingredient of a drink recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredient {
    /// Ingredient name
    pub name: String,

    /// Display color for the ingredient layer
    pub color: String,

    /// Relative parts of the ingredient in the drink
    pub parts: i64,
}

/// Short projection of an ingredient, with the name stripped.
///
/// The public menu only exposes the visual recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeIngredientShort {
    /// Display color for the ingredient layer
    pub color: String,

    /// Relative parts of the ingredient in the drink
    pub parts: i64,
}

/// A drink on the menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Drink {
    /// Row identifier
    pub id: i64,

    /// Unique drink title
    pub title: String,

    /// Full recipe
    pub recipe: Vec<RecipeIngredient>,
}

/// Short representation of a drink, as returned by the public listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DrinkShort {
    /// Row identifier
    pub id: i64,

    /// Unique drink title
    pub title: String,

    /// Recipe with ingredient names stripped
    pub recipe: Vec<RecipeIngredientShort>,
}

impl Drink {
    /// Short form: keeps only the color and parts of each ingredient.
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|ingredient| RecipeIngredientShort {
                    color: ingredient.color.clone(),
                    parts: ingredient.parts,
                })
                .collect(),
        }
    }

    /// Long form: the drink with its full recipe.
    pub fn long(&self) -> Drink {
        self.clone()
    }
}
