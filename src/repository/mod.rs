use async_trait::async_trait;

use crate::{
    models::trip::{Trip, TripFields, TripId},
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod json;
pub mod sqlite;

pub use json::JsonTripRepository;
pub use sqlite::SqliteTripRepository;

/// Persistent collection of trips keyed by integer id.
///
/// Implementations stamp `created_at`/`updated_at` themselves and must reject
/// an insert whose id is already taken with
/// [`RepositoryError::ConstraintViolation`](errors::RepositoryError::ConstraintViolation).
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// All trips, newest first (ties broken by id, highest first).
    async fn list_trips(&self) -> RepositoryResult<Vec<Trip>>;

    async fn get_trip(&self, id: TripId) -> RepositoryResult<Option<Trip>>;

    /// Highest id currently stored.
    async fn latest_trip_id(&self) -> RepositoryResult<Option<TripId>>;

    async fn insert_trip(&self, id: TripId, fields: &TripFields) -> RepositoryResult<Trip>;

    /// Replaces the content of an existing trip. `None` when `id` is unknown.
    async fn update_trip(&self, id: TripId, fields: &TripFields) -> RepositoryResult<Option<Trip>>;

    /// Removes a trip and hands back what was stored.
    async fn delete_trip(&self, id: TripId) -> RepositoryResult<Option<Trip>>;

    /// Drops every trip, returning how many were removed.
    async fn clear_trips(&self) -> RepositoryResult<u64>;
}
