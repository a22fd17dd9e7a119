//! Trip operations behind the `/trips` resource.
//!
//! Each function is a single request/single response unit against a
//! [`TripRepository`]; nothing here retries or holds locks between calls.

use tracing::{info, warn};

use crate::{
    models::trip::{Trip, TripId, TripInput},
    repository::{errors::RepositoryError, TripRepository},
    services::{ServiceError, ServiceResult},
};

/// All trips, newest first.
pub async fn list_trips<R>(repo: &R) -> ServiceResult<Vec<Trip>>
where
    R: TripRepository + ?Sized,
{
    Ok(repo.list_trips().await?)
}

/// Creates a trip with the next sequential id.
///
/// The id is read and the insert performed as two separate store calls. Two
/// creates racing between those calls compute the same id and the second one
/// fails with a constraint violation from the store.
pub async fn create_trip<R>(repo: &R, input: TripInput) -> ServiceResult<Trip>
where
    R: TripRepository + ?Sized,
{
    let fields = input.into_new_fields()?;
    let id = next_trip_id(repo.latest_trip_id().await?)?;
    let trip = repo.insert_trip(id, &fields).await?;
    info!(id = trip.id, name = %trip.name, "created trip");
    Ok(trip)
}

fn next_trip_id(latest: Option<TripId>) -> ServiceResult<TripId> {
    match latest {
        None => Ok(1),
        Some(latest) => latest.checked_add(1).ok_or_else(|| {
            RepositoryError::Unexpected(format!("no trip id follows {latest}")).into()
        }),
    }
}

pub async fn get_trip<R>(repo: &R, id: TripId) -> ServiceResult<Trip>
where
    R: TripRepository + ?Sized,
{
    repo.get_trip(id).await?.ok_or(ServiceError::NotFound)
}

/// Applies the supplied fields to an existing trip. Unknown ids are reported
/// as not found and never create a record.
pub async fn update_trip<R>(repo: &R, id: TripId, input: TripInput) -> ServiceResult<Trip>
where
    R: TripRepository + ?Sized,
{
    let current = repo.get_trip(id).await?.ok_or(ServiceError::NotFound)?;
    let fields = current.fields().merged(input)?;
    let trip = repo
        .update_trip(id, &fields)
        .await?
        .ok_or(ServiceError::NotFound)?;
    info!(id, "updated trip");
    Ok(trip)
}

pub async fn delete_trip<R>(repo: &R, id: TripId) -> ServiceResult<Trip>
where
    R: TripRepository + ?Sized,
{
    match repo.delete_trip(id).await? {
        Some(trip) => {
            info!(id, "deleted trip");
            Ok(trip)
        }
        None => {
            warn!(id, "delete of unknown trip");
            Err(ServiceError::NotFound)
        }
    }
}
