pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Nutrient rows are created and deleted through their owning food; this
/// router only reads them and patches the macro fields.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nutrients/list", post(handlers::get_list))
        .route("/nutrients/page", get(handlers::get_page))
        .route(
            "/nutrients/:id",
            get(handlers::get_by_id).put(handlers::update),
        )
}
