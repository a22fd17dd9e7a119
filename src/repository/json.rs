use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::{
    models::trip::{Trip, TripFields, TripId},
    repository::{
        errors::{RepositoryError, RepositoryResult},
        TripRepository,
    },
};

/// Trips kept as a pretty-printed JSON array in a single file.
///
/// Every operation reads the whole file. Load-modify-save cycles hold the write
/// side of `lock` and reads hold the read side, so a reader never observes a
/// half-written file from this process. The file itself is replaced by rename.
#[derive(Clone)]
pub struct JsonTripRepository {
    path: Arc<PathBuf>,
    lock: Arc<RwLock<()>>,
}

impl JsonTripRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path: Arc::new(path),
            lock: Arc::new(RwLock::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path()
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "trips.json".into());
        name.push(".tmp");
        self.path().with_file_name(name)
    }

    async fn load(&self) -> RepositoryResult<Vec<Trip>> {
        if !fs::try_exists(self.path()).await? {
            return Ok(Vec::new());
        }
        let raw = fs::read(self.path()).await?;
        if raw.is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn save(&self, trips: &[Trip]) -> RepositoryResult<()> {
        if let Some(parent) = self.path().parent() {
            fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(trips)?;
        let staging = self.staging_path();
        fs::write(&staging, data).await?;
        fs::rename(&staging, self.path()).await?;
        debug!(path = %self.path().display(), count = trips.len(), "saved trips");
        Ok(())
    }
}

#[async_trait]
impl TripRepository for JsonTripRepository {
    async fn list_trips(&self) -> RepositoryResult<Vec<Trip>> {
        let _guard = self.lock.read().await;
        let mut trips = self.load().await?;
        trips.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(trips)
    }

    async fn get_trip(&self, id: TripId) -> RepositoryResult<Option<Trip>> {
        let _guard = self.lock.read().await;
        let trips = self.load().await?;
        Ok(trips.into_iter().find(|trip| trip.id == id))
    }

    async fn latest_trip_id(&self) -> RepositoryResult<Option<TripId>> {
        let _guard = self.lock.read().await;
        let trips = self.load().await?;
        Ok(trips.iter().map(|trip| trip.id).max())
    }

    async fn insert_trip(&self, id: TripId, fields: &TripFields) -> RepositoryResult<Trip> {
        let _guard = self.lock.write().await;
        let mut trips = self.load().await?;
        if trips.iter().any(|trip| trip.id == id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "Unique constraint violation: trip id {id} already exists"
            )));
        }

        let now = Utc::now();
        let trip = Trip {
            id,
            name: fields.name.clone(),
            country: fields.country.clone(),
            description: fields.description.clone(),
            start_date: fields.start_date.clone(),
            end_date: fields.end_date.clone(),
            image: fields.image.clone(),
            attractions: fields.attractions.clone(),
            created_at: now,
            updated_at: now,
        };
        trips.push(trip.clone());
        self.save(&trips).await?;
        Ok(trip)
    }

    async fn update_trip(&self, id: TripId, fields: &TripFields) -> RepositoryResult<Option<Trip>> {
        let _guard = self.lock.write().await;
        let mut trips = self.load().await?;
        let Some(trip) = trips.iter_mut().find(|trip| trip.id == id) else {
            return Ok(None);
        };

        trip.name = fields.name.clone();
        trip.country = fields.country.clone();
        trip.description = fields.description.clone();
        trip.start_date = fields.start_date.clone();
        trip.end_date = fields.end_date.clone();
        trip.image = fields.image.clone();
        trip.attractions = fields.attractions.clone();
        trip.updated_at = Utc::now();
        let updated = trip.clone();

        self.save(&trips).await?;
        Ok(Some(updated))
    }

    async fn delete_trip(&self, id: TripId) -> RepositoryResult<Option<Trip>> {
        let _guard = self.lock.write().await;
        let mut trips = self.load().await?;
        let Some(position) = trips.iter().position(|trip| trip.id == id) else {
            return Ok(None);
        };
        let removed = trips.remove(position);
        self.save(&trips).await?;
        Ok(Some(removed))
    }

    async fn clear_trips(&self) -> RepositoryResult<u64> {
        let _guard = self.lock.write().await;
        let trips = self.load().await?;
        self.save(&[]).await?;
        Ok(trips.len() as u64)
    }
}
