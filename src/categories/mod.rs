pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", post(handlers::create))
        .route("/categories/list", post(handlers::get_list))
        .route("/categories/page", get(handlers::get_page))
        .route(
            "/categories/:id",
            get(handlers::get_by_id)
                .put(handlers::update)
                .delete(handlers::delete),
        )
}
