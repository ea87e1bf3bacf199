use serde::{Deserialize, Serialize};

use super::repo::Brand;

#[derive(Debug, Deserialize)]
pub struct IdList {
    pub id_list: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct BrandList {
    pub brand_list: Vec<Brand>,
}
