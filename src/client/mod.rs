//! Client-side view of the trip list.
//!
//! [`TripState`] is an immutable snapshot; the functions in [`actions`] take
//! an API handle and the current snapshot and return the next one, so every
//! change to the list goes through one auditable path.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::trip::{Trip, TripId, TripInput};

pub mod actions;
pub mod http;
pub mod state;

pub use http::HttpTripsApi;
pub use state::TripState;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
    #[error("{message} ({status})")]
    Api { status: u16, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// The resource operations the client depends on.
#[async_trait]
pub trait TripsApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Trip>>;
    async fn create(&self, input: &TripInput) -> ClientResult<Trip>;
    async fn update(&self, id: TripId, input: &TripInput) -> ClientResult<Trip>;
    async fn delete(&self, id: TripId) -> ClientResult<Trip>;
}
