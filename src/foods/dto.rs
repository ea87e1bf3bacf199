use serde::{Deserialize, Serialize};

use super::repo::{Food, FoodPatch, NewFood};
use crate::nutrients::repo::{Nutrient, NutrientFacts};

/// Create payload: the food fields plus its nutrient facts, flat on the
/// wire.
#[derive(Debug, Deserialize)]
pub struct CreateFood {
    pub category_id: i64,
    pub brand_id: i64,
    pub name: String,
    pub weight: f64,
    #[serde(flatten)]
    pub facts: NutrientFacts,
}

impl CreateFood {
    pub fn split(self) -> (NewFood, NutrientFacts) {
        (
            NewFood {
                category_id: self.category_id,
                brand_id: self.brand_id,
                name: self.name,
                weight: self.weight,
            },
            self.facts,
        )
    }
}

/// Update payload: zero-valued fields are treated as "not provided".
#[derive(Debug, Default, Deserialize)]
pub struct UpdateFood {
    #[serde(default)]
    pub category_id: i64,
    #[serde(default)]
    pub brand_id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weight: f64,
    #[serde(flatten)]
    pub facts: NutrientFacts,
}

impl UpdateFood {
    pub fn split(self) -> (FoodPatch, NutrientFacts) {
        (
            FoodPatch {
                category_id: self.category_id,
                brand_id: self.brand_id,
                name: self.name,
                weight: self.weight,
            },
            self.facts,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct IdList {
    pub id_list: Vec<i64>,
}

/// A food joined with its nutrient row.
#[derive(Debug, Serialize)]
pub struct FoodWithNutrient {
    pub food: Food,
    pub nutrient: Nutrient,
}

#[derive(Debug, Serialize)]
pub struct FoodList {
    pub food_list: Vec<FoodWithNutrient>,
}

#[derive(Debug, Serialize)]
pub struct FoodPage {
    pub food_list: Vec<Food>,
}
