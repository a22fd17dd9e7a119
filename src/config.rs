use std::{env, net::SocketAddr, path::PathBuf, str::FromStr};

use crate::error::AppError;

pub const DEFAULT_UPLOAD_MAX_BYTES: usize = 5 * 1024 * 1024;

/// Log filter used when `RUST_LOG` is unset. Request spans come from `tower_http`.
pub const DEFAULT_LOG_FILTER: &str = "info,trips=debug,tower_http=debug";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Json,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "json" => Ok(StoreBackend::Json),
            other => Err(AppError::Config(format!(
                "invalid STORE_BACKEND: {other} (expected sqlite or json)"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub store_backend: StoreBackend,
    pub trips_file: PathBuf,
    pub public_root: PathBuf,
    pub upload_max_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://trips.db".to_string());
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let store_backend = env::var("STORE_BACKEND")
            .map(|value| value.parse())
            .unwrap_or(Ok(StoreBackend::Sqlite))?;

        let trips_file = env::var("TRIPS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/trips.json"));

        let public_root = env::var("PUBLIC_ROOT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("public"));

        let upload_max_bytes = match env::var("UPLOAD_MAX_BYTES") {
            Ok(raw) => raw
                .parse()
                .map_err(|err| AppError::Config(format!("invalid UPLOAD_MAX_BYTES: {err}")))?,
            Err(_) => DEFAULT_UPLOAD_MAX_BYTES,
        };

        Ok(Self {
            database_url,
            listen_addr,
            store_backend,
            trips_file,
            public_root,
            upload_max_bytes,
        })
    }

    /// Directory static images are served from.
    pub fn images_dir(&self) -> PathBuf {
        self.public_root.join("images")
    }

    /// Directory uploaded images are written to.
    pub fn upload_dir(&self) -> PathBuf {
        self.images_dir().join("uploads")
    }
}
