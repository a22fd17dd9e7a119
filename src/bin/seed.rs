//! Replaces the configured store's contents with the sample trips.

use anyhow::Context;
use tracing::info;
use trips::config::AppConfig;
use trips::models::trip::{Trip, TripFields};
use trips::repository::TripRepository;
use trips::state::open_repository;

fn sample(
    name: &str,
    country: &str,
    description: &str,
    dates: (&str, &str),
    image: &str,
    attractions: &[&str],
) -> TripFields {
    TripFields {
        name: name.into(),
        country: country.into(),
        description: description.into(),
        start_date: dates.0.into(),
        end_date: dates.1.into(),
        image: image.into(),
        attractions: attractions.iter().map(|a| a.to_string()).collect(),
    }
}

fn sample_trips() -> Vec<TripFields> {
    vec![
        sample(
            "Paris",
            "France",
            "The City of Light",
            ("2024-09-01", "2024-09-07"),
            "/images/Paris.jpeg",
            &["Eiffel Tower", "Louvre Museum", "Notre-Dame"],
        ),
        sample(
            "Tokyo",
            "Japan",
            "A blend of tradition and modernity",
            ("2024-10-10", "2024-10-20"),
            "/images/Tokyo.jpeg",
            &["Shibuya Crossing", "Sensoji Temple", "Tokyo Tower"],
        ),
        sample(
            "London",
            "United Kingdom",
            "A historic city blending royal heritage with modern culture",
            ("2025-09-15", "2025-09-22"),
            "/images/London.jpeg",
            &["Big Ben", "Tower Bridge", "British Museum", "Buckingham Palace"],
        ),
        sample(
            "Edinburgh",
            "Scotland",
            "A medieval city with stunning architecture and rich history",
            ("2025-10-05", "2025-10-12"),
            "/images/Edinburgh.jpeg",
            &["Edinburgh Castle", "Royal Mile", "Arthur's Seat", "Holyrood Palace"],
        ),
    ]
}

/// Clears `repo` and inserts the sample trips with ids counting up from 1.
async fn seed(repo: &dyn TripRepository) -> anyhow::Result<Vec<Trip>> {
    let cleared = repo.clear_trips().await.context("clear existing trips")?;
    info!("cleared {cleared} existing trips");

    let mut seeded = Vec::new();
    for (id, fields) in (1..).zip(sample_trips()) {
        let trip = repo
            .insert_trip(id, &fields)
            .await
            .with_context(|| format!("insert sample trip {}", fields.name))?;
        info!("- {}, {}", trip.name, trip.country);
        seeded.push(trip);
    }
    Ok(seeded)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_target(false).init();

    let config = AppConfig::from_env()?;
    let repo = open_repository(&config).await?;

    let seeded = seed(repo.as_ref()).await?;
    info!("seeded {} trips", seeded.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use trips::repository::JsonTripRepository;

    use super::*;

    #[tokio::test]
    async fn replaces_existing_trips_with_the_samples() {
        let dir = TempDir::new().unwrap();
        let repo = JsonTripRepository::new(dir.path().join("trips.json"));
        repo.insert_trip(9, &sample_trips()[0]).await.unwrap();

        let seeded = seed(&repo).await.unwrap();
        let ids: Vec<_> = seeded.iter().map(|trip| trip.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let mut names: Vec<String> = repo
            .list_trips()
            .await
            .unwrap()
            .into_iter()
            .map(|trip| trip.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Edinburgh", "London", "Paris", "Tokyo"]);
        assert_eq!(repo.latest_trip_id().await.unwrap(), Some(4));
    }
}
