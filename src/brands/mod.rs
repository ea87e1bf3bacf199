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
        .route("/brands", post(handlers::create))
        .route("/brands/list", post(handlers::get_list))
        .route("/brands/page", get(handlers::get_page))
        .route(
            "/brands/:id",
            get(handlers::get_by_id)
                .put(handlers::update)
                .delete(handlers::delete),
        )
}
