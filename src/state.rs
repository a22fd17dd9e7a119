use std::sync::Arc;

use tracing::info;

use crate::{
    config::{AppConfig, StoreBackend},
    db::{init_pool, run_migrations},
    error::AppError,
    repository::{JsonTripRepository, SqliteTripRepository, TripRepository},
    services::uploads::UploadService,
};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub trips: Arc<dyn TripRepository>,
    pub uploads: UploadService,
}

impl AppState {
    pub fn new(config: AppConfig, trips: Arc<dyn TripRepository>) -> Self {
        let uploads = UploadService::new(config.upload_dir(), config.upload_max_bytes);
        Self {
            config,
            trips,
            uploads,
        }
    }
}

/// Opens the store selected by `STORE_BACKEND`, running migrations for SQLite.
pub async fn open_repository(config: &AppConfig) -> Result<Arc<dyn TripRepository>, AppError> {
    match config.store_backend {
        StoreBackend::Sqlite => {
            let db = init_pool(&config.database_url).await?;
            run_migrations(&db).await?;
            info!("using sqlite store at {}", config.database_url);
            Ok(Arc::new(SqliteTripRepository::new(db)))
        }
        StoreBackend::Json => {
            info!("using json store at {}", config.trips_file.display());
            Ok(Arc::new(JsonTripRepository::new(config.trips_file.clone())))
        }
    }
}
