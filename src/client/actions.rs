use tracing::warn;

use crate::{
    client::{ClientError, TripState, TripsApi},
    models::trip::{TripId, TripInput},
};

/// Initial fetch. A failure leaves the list empty rather than stale.
pub async fn load<A>(api: &A) -> TripState
where
    A: TripsApi + ?Sized,
{
    match api.list().await {
        Ok(trips) => TripState::loaded(trips),
        Err(err) => {
            warn!("loading trips failed: {err}");
            TripState::load_failed(message(&err))
        }
    }
}

/// Creates a trip and puts the stored record at the top of the list.
pub async fn add<A>(api: &A, state: &TripState, input: &TripInput) -> TripState
where
    A: TripsApi + ?Sized,
{
    match api.create(input).await {
        Ok(trip) => state.without_error().prepended(trip),
        Err(err) => failed(state, "adding trip", &err),
    }
}

pub async fn edit<A>(api: &A, state: &TripState, id: TripId, input: &TripInput) -> TripState
where
    A: TripsApi + ?Sized,
{
    match api.update(id, input).await {
        Ok(trip) => state.without_error().replaced(trip),
        Err(err) => failed(state, "editing trip", &err),
    }
}

pub async fn delete<A>(api: &A, state: &TripState, id: TripId) -> TripState
where
    A: TripsApi + ?Sized,
{
    match api.delete(id).await {
        Ok(_) => state.without_error().removed(id),
        Err(err) => failed(state, "deleting trip", &err),
    }
}

/// Local only; the order is not persisted anywhere.
pub fn reorder(state: &TripState, from: usize, to: usize) -> TripState {
    state.reordered(from, to)
}

pub fn dismiss_error(state: &TripState) -> TripState {
    state.without_error()
}

fn failed(state: &TripState, action: &str, err: &ClientError) -> TripState {
    warn!("{action} failed: {err}");
    state.with_error(message(err))
}

fn message(err: &ClientError) -> String {
    match err {
        ClientError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    };

    use async_trait::async_trait;

    use super::*;
    use crate::{
        client::{state::tests::trip, ClientResult},
        models::trip::Trip,
    };

    #[derive(Default)]
    struct FakeApi {
        trips: Mutex<Vec<Trip>>,
        failing: AtomicBool,
    }

    impl FakeApi {
        fn with(trips: Vec<Trip>) -> Self {
            Self {
                trips: Mutex::new(trips),
                failing: AtomicBool::new(false),
            }
        }

        fn fail(&self) -> ClientResult<()> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(ClientError::Api {
                    status: 500,
                    message: "Failed".into(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl TripsApi for FakeApi {
        async fn list(&self) -> ClientResult<Vec<Trip>> {
            self.fail()?;
            Ok(self.trips.lock().unwrap().clone())
        }

        async fn create(&self, input: &TripInput) -> ClientResult<Trip> {
            self.fail()?;
            let mut trips = self.trips.lock().unwrap();
            let id = trips.iter().map(|t| t.id).max().unwrap_or(0) + 1;
            let created = trip(id, input.name.as_deref().unwrap_or_default());
            trips.push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: TripId, input: &TripInput) -> ClientResult<Trip> {
            self.fail()?;
            let name = input.name.clone().unwrap_or_default();
            Ok(trip(id, &name))
        }

        async fn delete(&self, id: TripId) -> ClientResult<Trip> {
            self.fail()?;
            let mut trips = self.trips.lock().unwrap();
            let position = trips
                .iter()
                .position(|t| t.id == id)
                .ok_or(ClientError::Api {
                    status: 404,
                    message: "Trip not found".into(),
                })?;
            Ok(trips.remove(position))
        }
    }

    fn named(name: &str) -> TripInput {
        TripInput {
            name: Some(name.into()),
            ..TripInput::default()
        }
    }

    #[tokio::test]
    async fn load_replaces_the_list() {
        let api = FakeApi::with(vec![trip(1, "Paris"), trip(2, "Tokyo")]);
        let state = load(&api).await;
        assert!(state.is_loaded());
        assert_eq!(state.trips().len(), 2);
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn failed_load_is_flagged_and_empty() {
        let api = FakeApi::with(vec![trip(1, "Paris")]);
        api.failing.store(true, Ordering::SeqCst);
        let state = load(&api).await;
        assert!(state.trips().is_empty());
        assert_eq!(state.error(), Some("Failed"));
    }

    #[tokio::test]
    async fn add_prepends_and_failure_keeps_the_list() {
        let api = FakeApi::with(vec![trip(1, "Paris")]);
        let state = load(&api).await;

        let added = add(&api, &state, &named("Rome")).await;
        assert_eq!(added.trips()[0].name, "Rome");
        assert_eq!(added.trips()[0].id, 2);

        api.failing.store(true, Ordering::SeqCst);
        let failed = add(&api, &added, &named("Oslo")).await;
        assert_eq!(failed.trips(), added.trips());
        assert_eq!(failed.error(), Some("Failed"));
        assert_eq!(dismiss_error(&failed).error(), None);
    }

    #[tokio::test]
    async fn delete_removes_only_after_success() {
        let api = FakeApi::with(vec![trip(1, "Paris"), trip(2, "Tokyo")]);
        let state = load(&api).await;

        let missing = delete(&api, &state, 7).await;
        assert_eq!(missing.trips(), state.trips());
        assert_eq!(missing.error(), Some("Trip not found"));

        let deleted = delete(&api, &missing, 1).await;
        assert_eq!(deleted.error(), None);
        assert_eq!(deleted.trips().len(), 1);
        assert_eq!(deleted.trips()[0].id, 2);
    }

    #[tokio::test]
    async fn edit_keeps_position() {
        let api = FakeApi::with(vec![trip(1, "Paris"), trip(2, "Tokyo"), trip(3, "Rome")]);
        let state = reorder(&load(&api).await, 2, 0);
        let edited = edit(&api, &state, 1, &named("Lyon")).await;
        let names: Vec<_> = edited.trips().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Rome", "Lyon", "Tokyo"]);
    }
}
