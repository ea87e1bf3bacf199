use serde::Serialize;
use sqlx::PgPool;

use super::repo::{self, Food};
use crate::brands::repo::Brand;
use crate::categories::repo::Category;
use crate::error::StoreError;
use crate::nutrients::repo::Nutrient;
use crate::{brands, categories, nutrients};

/// Brand fields carried by the composed view. A food whose brand is gone
/// gets the zero value instead of an error.
#[derive(Debug, Default, Serialize)]
pub struct BrandSummary {
    pub id: i64,
    pub name: String,
    pub img_src: String,
    pub category_id: Option<i64>,
}

impl From<Brand> for BrandSummary {
    fn from(b: Brand) -> Self {
        Self {
            id: b.id,
            name: b.name,
            img_src: b.img_src,
            category_id: b.category_id,
        }
    }
}

/// Read aggregate for a single food. Assembled per request, never stored.
#[derive(Debug, Serialize)]
pub struct FoodDetails {
    pub food: Food,
    pub nutrient: Nutrient,
    pub brand: BrandSummary,
    pub category: Category,
}

/// Assembles the food aggregate from independent lookups. The nutrient
/// must exist (1:1 invariant) and the category must be live; the brand is
/// optional. The first failure wins.
pub async fn food_details(db: &PgPool, id: i64) -> Result<FoodDetails, StoreError> {
    let food = repo::get(db, id).await?;

    let nutrient = match nutrients::repo::get_by_food(db, food.id).await {
        Err(StoreError::NotFound) => {
            return Err(StoreError::Inconsistent("food without nutrient"))
        }
        other => other?,
    };

    let brand = match brands::repo::get(db, food.brand_id).await {
        Ok(brand) => BrandSummary::from(brand),
        Err(StoreError::NotFound) => BrandSummary::default(),
        Err(err) => return Err(err),
    };

    let category = categories::repo::get(db, food.category_id).await?;

    Ok(FoodDetails {
        food,
        nutrient,
        brand,
        category,
    })
}
