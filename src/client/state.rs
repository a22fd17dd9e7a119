use crate::{
    models::trip::{Trip, TripId},
    reorder::{move_by_id, move_element},
};

/// Snapshot of the client's trip list. Transitions never mutate `self`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripState {
    trips: Vec<Trip>,
    error: Option<String>,
    loaded: bool,
}

impl TripState {
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Result of a successful initial fetch.
    pub fn loaded(trips: Vec<Trip>) -> Self {
        Self {
            trips,
            error: None,
            loaded: true,
        }
    }

    /// Result of a failed initial fetch: flagged, and empty.
    pub fn load_failed(message: impl Into<String>) -> Self {
        Self {
            trips: Vec::new(),
            error: Some(message.into()),
            loaded: true,
        }
    }

    pub fn with_error(&self, message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..self.clone()
        }
    }

    pub fn without_error(&self) -> Self {
        Self {
            error: None,
            ..self.clone()
        }
    }

    pub fn prepended(&self, trip: Trip) -> Self {
        let mut trips = Vec::with_capacity(self.trips.len() + 1);
        trips.push(trip);
        trips.extend(self.trips.iter().cloned());
        Self {
            trips,
            ..self.clone()
        }
    }

    pub fn removed(&self, id: TripId) -> Self {
        Self {
            trips: self
                .trips
                .iter()
                .filter(|trip| trip.id != id)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Swaps in an edited trip at its current position.
    pub fn replaced(&self, updated: Trip) -> Self {
        Self {
            trips: self
                .trips
                .iter()
                .map(|trip| {
                    if trip.id == updated.id {
                        updated.clone()
                    } else {
                        trip.clone()
                    }
                })
                .collect(),
            ..self.clone()
        }
    }

    pub fn reordered(&self, from: usize, to: usize) -> Self {
        Self {
            trips: move_element(&self.trips, from, to),
            ..self.clone()
        }
    }

    /// Applies a drag that started on `active` and ended over `over`.
    pub fn dragged(&self, active: TripId, over: Option<TripId>) -> Self {
        Self {
            trips: move_by_id(&self.trips, &active, over.as_ref(), |trip| &trip.id),
            ..self.clone()
        }
    }
}
