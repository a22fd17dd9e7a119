use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::{
    db::DbPool,
    models::trip::{Trip, TripFields, TripId},
    repository::{
        errors::{RepositoryError, RepositoryResult},
        TripRepository,
    },
};

const COLUMNS: &str = "id, name, country, description, start_date, end_date, image, \
                       attractions, created_at, updated_at";

#[derive(Debug, FromRow)]
struct TripRow {
    id: i64,
    name: String,
    country: String,
    description: String,
    start_date: String,
    end_date: String,
    image: String,
    attractions: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TripRow> for Trip {
    type Error = RepositoryError;

    fn try_from(row: TripRow) -> Result<Self, Self::Error> {
        Ok(Trip {
            id: row.id,
            name: row.name,
            country: row.country,
            description: row.description,
            start_date: row.start_date,
            end_date: row.end_date,
            image: row.image,
            attractions: serde_json::from_str(&row.attractions)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Trips stored in the `trips` table of a SQLite database.
#[derive(Clone)]
pub struct SqliteTripRepository {
    pool: DbPool,
}

impl SqliteTripRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_trip(row: Option<TripRow>) -> RepositoryResult<Option<Trip>> {
    row.map(Trip::try_from).transpose()
}

#[async_trait]
impl TripRepository for SqliteTripRepository {
    async fn list_trips(&self) -> RepositoryResult<Vec<Trip>> {
        let sql = format!("SELECT {COLUMNS} FROM trips ORDER BY created_at DESC, id DESC");
        let rows = sqlx::query_as::<_, TripRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Trip::try_from).collect()
    }

    async fn get_trip(&self, id: TripId) -> RepositoryResult<Option<Trip>> {
        let sql = format!("SELECT {COLUMNS} FROM trips WHERE id = ?");
        let row = sqlx::query_as::<_, TripRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        into_trip(row)
    }

    async fn latest_trip_id(&self) -> RepositoryResult<Option<TripId>> {
        let latest = sqlx::query_scalar::<_, Option<i64>>("SELECT MAX(id) FROM trips")
            .fetch_one(&self.pool)
            .await?;
        Ok(latest)
    }

    async fn insert_trip(&self, id: TripId, fields: &TripFields) -> RepositoryResult<Trip> {
        let now = Utc::now();
        let attractions = serde_json::to_string(&fields.attractions)?;
        let sql = format!(
            "INSERT INTO trips ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TripRow>(&sql)
            .bind(id)
            .bind(&fields.name)
            .bind(&fields.country)
            .bind(&fields.description)
            .bind(&fields.start_date)
            .bind(&fields.end_date)
            .bind(&fields.image)
            .bind(attractions)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await?;
        Trip::try_from(row)
    }

    async fn update_trip(&self, id: TripId, fields: &TripFields) -> RepositoryResult<Option<Trip>> {
        let attractions = serde_json::to_string(&fields.attractions)?;
        let sql = format!(
            "UPDATE trips SET name = ?, country = ?, description = ?, start_date = ?, \
             end_date = ?, image = ?, attractions = ?, updated_at = ? \
             WHERE id = ? RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, TripRow>(&sql)
            .bind(&fields.name)
            .bind(&fields.country)
            .bind(&fields.description)
            .bind(&fields.start_date)
            .bind(&fields.end_date)
            .bind(&fields.image)
            .bind(attractions)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        into_trip(row)
    }

    async fn delete_trip(&self, id: TripId) -> RepositoryResult<Option<Trip>> {
        let sql = format!("DELETE FROM trips WHERE id = ? RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, TripRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        into_trip(row)
    }

    async fn clear_trips(&self) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM trips")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
