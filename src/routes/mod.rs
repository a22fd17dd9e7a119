pub mod destinations;
pub mod trips;
pub mod upload;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let upload_limit = upload::body_limit(state.uploads.max_bytes());

    Router::new()
        .nest("/trips", trips::router())
        .nest("/destinations", destinations::router())
        .merge(upload::router(upload_limit))
        .nest_service("/images", ServeDir::new(state.config.images_dir()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
