//! The `/trips` resource as a plain function from a request value to a
//! response value. HTTP adapters only translate to and from these types.

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::{
    models::trip::{TripId, TripInput},
    repository::TripRepository,
    services::{trips, ServiceError, ServiceResult},
};

pub const TRIP_NOT_FOUND: &str = "Trip not found";

/// JSON body shared by every trip endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| "unknown error".to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripRequest {
    List,
    Create { body: Vec<u8> },
    Get { id: String },
    Update { id: String, body: Vec<u8> },
    Delete { id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    fn new<T: Serialize>(status: StatusCode, envelope: Envelope<T>) -> Self {
        let body = serde_json::to_value(envelope).unwrap_or_else(|err| {
            error!("could not serialize response: {err}");
            serde_json::json!({ "success": false, "error": "Internal server error" })
        });
        Self { status, body }
    }

    fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, Envelope::<()>::failure(message))
    }
}

pub async fn handle<R>(repo: &R, request: TripRequest) -> ApiResponse
where
    R: TripRepository + ?Sized,
{
    match request {
        TripRequest::List => respond(
            StatusCode::OK,
            "Failed to fetch trips",
            trips::list_trips(repo).await,
        ),
        TripRequest::Create { body } => {
            let result = match parse_body(&body) {
                Ok(input) => trips::create_trip(repo, input).await,
                Err(err) => Err(err),
            };
            respond(StatusCode::CREATED, "Failed to create trip", result)
        }
        TripRequest::Get { id } => {
            let result = match parse_id(&id) {
                Ok(id) => trips::get_trip(repo, id).await,
                Err(err) => Err(err),
            };
            respond(StatusCode::OK, "Failed to fetch trip", result)
        }
        TripRequest::Update { id, body } => {
            let result = match (parse_id(&id), parse_body(&body)) {
                (Ok(id), Ok(input)) => trips::update_trip(repo, id, input).await,
                (Err(err), _) | (_, Err(err)) => Err(err),
            };
            respond(StatusCode::OK, "Failed to update trip", result)
        }
        TripRequest::Delete { id } => {
            let result = match parse_id(&id) {
                Ok(id) => trips::delete_trip(repo, id).await,
                Err(err) => Err(err),
            };
            respond(StatusCode::OK, "Failed to delete trip", result)
        }
    }
}

fn respond<T: Serialize>(
    status: StatusCode,
    internal_message: &str,
    result: ServiceResult<T>,
) -> ApiResponse {
    match result {
        Ok(data) => ApiResponse::new(status, Envelope::success(data)),
        Err(ServiceError::NotFound) => ApiResponse::failure(StatusCode::NOT_FOUND, TRIP_NOT_FOUND),
        Err(ServiceError::Validation(message)) => {
            warn!("rejected trip request: {message}");
            ApiResponse::failure(StatusCode::BAD_REQUEST, message)
        }
        Err(ServiceError::Repository(err)) => {
            error!("{internal_message}: {err}");
            ApiResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, internal_message)
        }
    }
}

// Ids that are not integers cannot match a stored trip.
fn parse_id(raw: &str) -> ServiceResult<TripId> {
    raw.trim().parse().map_err(|_| ServiceError::NotFound)
}

fn parse_body(body: &[u8]) -> ServiceResult<TripInput> {
    serde_json::from_slice(body)
        .map_err(|err| ServiceError::Validation(format!("Invalid request body: {err}")))
}
