use axum::{
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::{
    resource::{self, ApiResponse, TripRequest},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(show).put(update).delete(remove))
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

async fn list(State(state): State<AppState>) -> ApiResponse {
    resource::handle(state.trips.as_ref(), TripRequest::List).await
}

async fn create(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    let request = TripRequest::Create {
        body: body.to_vec(),
    };
    resource::handle(state.trips.as_ref(), request).await
}

async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    resource::handle(state.trips.as_ref(), TripRequest::Get { id }).await
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResponse {
    let request = TripRequest::Update {
        id,
        body: body.to_vec(),
    };
    resource::handle(state.trips.as_ref(), request).await
}

async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    resource::handle(state.trips.as_ref(), TripRequest::Delete { id }).await
}
