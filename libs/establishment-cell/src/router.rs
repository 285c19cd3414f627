// libs/establishment-cell/src/router.rs
use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{self, EstablishmentState};

pub fn establishment_routes(state: EstablishmentState) -> Router {
    Router::new()
        .route("/{establishment_id}/settings", post(handlers::create_settings))
        .route("/{establishment_id}/settings", get(handlers::get_settings))
        .route("/{establishment_id}/settings", put(handlers::update_settings))
        .route("/settings/template", post(handlers::generate_template))
        .with_state(state)
}
