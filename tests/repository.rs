use tempfile::TempDir;
use trips::{
    db::{init_pool, run_migrations},
    models::trip::TripFields,
    repository::{
        errors::RepositoryError, JsonTripRepository, SqliteTripRepository, TripRepository,
    },
};

fn fields(name: &str) -> TripFields {
    TripFields {
        name: name.into(),
        country: "Japan".into(),
        description: "A blend of tradition and modernity".into(),
        start_date: "2024-10-10".into(),
        end_date: "2024-10-20".into(),
        image: "/images/Tokyo.jpeg".into(),
        attractions: vec!["Shibuya Crossing".into(), "Sensoji Temple".into()],
    }
}

async fn sqlite(dir: &TempDir) -> SqliteTripRepository {
    let url = format!("sqlite://{}", dir.path().join("test.sqlite").to_string_lossy());
    let pool = init_pool(&url).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");
    SqliteTripRepository::new(pool)
}

fn json(dir: &TempDir) -> JsonTripRepository {
    JsonTripRepository::new(dir.path().join("nested").join("trips.json"))
}

async fn json_store(dir: &TempDir) -> JsonTripRepository {
    json(dir)
}

async fn insert_and_read_back(repo: &dyn TripRepository) {
    assert_eq!(repo.latest_trip_id().await.unwrap(), None);

    let stored = repo.insert_trip(1, &fields("Tokyo")).await.unwrap();
    assert_eq!(stored.id, 1);
    assert_eq!(stored.fields(), fields("Tokyo"));
    assert_eq!(stored.created_at, stored.updated_at);

    let fetched = repo.get_trip(1).await.unwrap().expect("stored trip");
    assert_eq!(fetched, stored);
    assert_eq!(repo.latest_trip_id().await.unwrap(), Some(1));
    assert!(repo.get_trip(2).await.unwrap().is_none());
}

async fn duplicate_ids_are_rejected(repo: &dyn TripRepository) {
    repo.insert_trip(5, &fields("Tokyo")).await.unwrap();
    let err = repo.insert_trip(5, &fields("Kyoto")).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)), "{err:?}");
    assert_eq!(repo.list_trips().await.unwrap().len(), 1);
}

async fn list_is_newest_first(repo: &dyn TripRepository) {
    for (id, name) in [(1, "Paris"), (2, "Tokyo"), (3, "London")] {
        repo.insert_trip(id, &fields(name)).await.unwrap();
    }
    let names: Vec<String> = repo
        .list_trips()
        .await
        .unwrap()
        .into_iter()
        .map(|trip| trip.name)
        .collect();
    assert_eq!(names, vec!["London", "Tokyo", "Paris"]);
}

async fn update_and_delete(repo: &dyn TripRepository) {
    let original = repo.insert_trip(1, &fields("Osaka")).await.unwrap();

    let mut changed = fields("Osaka");
    changed.attractions = vec!["Dotonbori".into()];
    let updated = repo.update_trip(1, &changed).await.unwrap().expect("updated");
    assert_eq!(updated.attractions, vec!["Dotonbori"]);
    assert_eq!(updated.created_at, original.created_at);
    assert!(updated.updated_at >= original.updated_at);

    assert!(repo.update_trip(2, &changed).await.unwrap().is_none());
    assert!(repo.get_trip(2).await.unwrap().is_none());

    let removed = repo.delete_trip(1).await.unwrap().expect("removed");
    assert_eq!(removed.id, 1);
    assert!(repo.delete_trip(1).await.unwrap().is_none());
    assert!(repo.get_trip(1).await.unwrap().is_none());
}

async fn clear_removes_everything(repo: &dyn TripRepository) {
    repo.insert_trip(1, &fields("Seoul")).await.unwrap();
    repo.insert_trip(2, &fields("Busan")).await.unwrap();
    assert_eq!(repo.clear_trips().await.unwrap(), 2);
    assert!(repo.list_trips().await.unwrap().is_empty());
    assert_eq!(repo.latest_trip_id().await.unwrap(), None);
}

macro_rules! backend_tests {
    ($backend:ident, $open:expr) => {
        mod $backend {
            use super::*;

            #[tokio::test]
            async fn insert_and_read_back() {
                let dir = TempDir::new().unwrap();
                let repo = $open(&dir).await;
                super::insert_and_read_back(&repo).await;
            }

            #[tokio::test]
            async fn duplicate_ids_are_rejected() {
                let dir = TempDir::new().unwrap();
                let repo = $open(&dir).await;
                super::duplicate_ids_are_rejected(&repo).await;
            }

            #[tokio::test]
            async fn list_is_newest_first() {
                let dir = TempDir::new().unwrap();
                let repo = $open(&dir).await;
                super::list_is_newest_first(&repo).await;
            }

            #[tokio::test]
            async fn update_and_delete() {
                let dir = TempDir::new().unwrap();
                let repo = $open(&dir).await;
                super::update_and_delete(&repo).await;
            }

            #[tokio::test]
            async fn clear_removes_everything() {
                let dir = TempDir::new().unwrap();
                let repo = $open(&dir).await;
                super::clear_removes_everything(&repo).await;
            }
        }
    };
}

backend_tests!(sqlite_backend, sqlite);
backend_tests!(json_backend, json_store);

#[tokio::test]
async fn json_store_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    json(&dir).insert_trip(1, &fields("Kyoto")).await.unwrap();

    let reopened = json(&dir);
    let trip = reopened.get_trip(1).await.unwrap().expect("persisted trip");
    assert_eq!(trip.name, "Kyoto");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn json_store_reads_never_see_a_partial_write() {
    let dir = TempDir::new().unwrap();
    let repo = json(&dir);
    for id in 1..=20 {
        repo.insert_trip(id, &fields("Nara")).await.unwrap();
    }

    let writer = {
        let repo = repo.clone();
        tokio::spawn(async move {
            for id in 21..=120 {
                repo.insert_trip(id, &fields("Kobe")).await.unwrap();
            }
        })
    };

    while !writer.is_finished() {
        let trips = repo.list_trips().await.unwrap();
        assert!(trips.len() >= 20, "list returned {} trips", trips.len());
        assert!(repo.latest_trip_id().await.unwrap() >= Some(20));
    }
    writer.await.unwrap();

    assert_eq!(repo.list_trips().await.unwrap().len(), 120);
    assert!(!dir.path().join("nested").join("trips.json.tmp").exists());
}
