use serde::{Deserialize, Serialize};

use super::repo::Category;

#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct IdList {
    pub id_list: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub category_list: Vec<Category>,
}
