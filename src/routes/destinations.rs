use axum::{extract::Query, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    images::{available_images, destination_image, AvailableImage},
    resource::Envelope,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/image", get(image_for_name))
        .route("/images", get(images))
}

#[derive(Deserialize)]
struct ImageQuery {
    name: Option<String>,
}

#[derive(Debug, Serialize)]
struct DestinationImage {
    name: String,
    image: &'static str,
}

async fn image_for_name(
    Query(query): Query<ImageQuery>,
) -> Result<Json<Envelope<DestinationImage>>, AppError> {
    let name = query
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::Validation("name is required".into()))?;
    let image = destination_image(&name);
    Ok(Json(Envelope::success(DestinationImage { name, image })))
}

async fn images() -> Json<Envelope<&'static [AvailableImage]>> {
    Json(Envelope::success(available_images()))
}
