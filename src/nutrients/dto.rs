use serde::{Deserialize, Serialize};

use super::repo::Nutrient;

#[derive(Debug, Deserialize)]
pub struct IdList {
    pub id_list: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct NutrientList {
    pub nutrient_list: Vec<Nutrient>,
}
