pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;
pub mod view;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/foods", post(handlers::create))
        .route("/foods/list", post(handlers::get_list))
        .route("/foods/page", get(handlers::get_page))
        .route(
            "/foods/:id",
            get(handlers::get_by_id)
                .put(handlers::update)
                .delete(handlers::delete),
        )
}
