//! PostgreSQL-backed store test.
//!
//! Runs only when `TEST_DATABASE_URL` points at a disposable database:
//!   TEST_DATABASE_URL=postgres://... cargo test --test test_postgres_store -- --nocapture

use cat_breeds_api::storage::{BreedStore, PgBreedStore, StoreError};
use cat_breeds_api::{BreedFilter, BreedPatch, NewBreed};

fn new_breed(name: &str, coat_length: f64) -> NewBreed {
    NewBreed {
        name: name.to_string(),
        location_of_origin: "Norway".to_string(),
        coat_length,
        body_type: "Large".to_string(),
        pattern: "Tabby".to_string(),
    }
}

#[tokio::test]
async fn test_postgres_store() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        println!("TEST_DATABASE_URL not set; skipping PostgreSQL store test");
        return Ok(());
    };

    let store = PgBreedStore::connect(&database_url, 2).await?;
    sqlx::query("TRUNCATE TABLE breed").execute(store.pool()).await?;

    // --- insert + unique constraint ---
    let first = store.insert(&new_breed("Forest", 5.0)).await?;
    assert!(matches!(
        store.insert(&new_breed("Forest", 6.0)).await,
        Err(StoreError::Duplicate)
    ));

    // --- batch is atomic ---
    let batch = vec![new_breed("Lynx", 4.0), new_breed("Forest", 1.0)];
    assert!(matches!(
        store.insert_many(&batch).await,
        Err(StoreError::Duplicate)
    ));
    assert!(store.find_by(&BreedFilter::by_name("Lynx")).await?.is_empty());

    let inserted = store
        .insert_many(&[new_breed("Lynx", 4.0), new_breed("Skogkatt", 4.5)])
        .await?;
    assert_eq!(inserted.len(), 2);
    assert!(inserted[0].id > first.id);

    // --- filters use AND semantics and id order ---
    let all = store.find_by(&BreedFilter::default()).await?;
    assert_eq!(
        all.iter().map(|b| b.name.as_str()).collect::<Vec<_>>(),
        vec!["Forest", "Lynx", "Skogkatt"]
    );
    let by_coat = store
        .find_by(&BreedFilter {
            coat_length: Some(4.5),
            pattern: Some("Tabby".to_string()),
            ..BreedFilter::default()
        })
        .await?;
    assert_eq!(by_coat.len(), 1);
    assert_eq!(by_coat[0].name, "Skogkatt");

    // --- partial update ---
    let patch = BreedPatch {
        body_type: Some("Muscular".to_string()),
        ..BreedPatch::default()
    };
    assert!(store.update_by_id(first.id, &patch).await?);
    let updated = store.find_by_id(first.id).await?.ok_or("missing row")?;
    assert_eq!(updated.body_type, "Muscular");
    assert_eq!(updated.name, "Forest");
    assert!(!store.update_by_id(i64::MAX, &patch).await?);

    let rename = BreedPatch {
        name: Some("Lynx".to_string()),
        ..BreedPatch::default()
    };
    assert!(matches!(
        store.update_by_id(first.id, &rename).await,
        Err(StoreError::Duplicate)
    ));

    // --- delete ---
    assert!(store.delete_by_id(first.id).await?);
    assert!(store.find_by_id(first.id).await?.is_none());
    assert!(!store.delete_by_id(first.id).await?);

    store.ping().await?;
    Ok(())
}
