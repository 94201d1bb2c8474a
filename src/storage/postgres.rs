//! Breed store implementation using PostgreSQL.

use crate::domain::{Breed, BreedFilter, BreedPatch, NewBreed};
use crate::storage::{BreedStore, StoreError};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};

pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS breed (
    id BIGSERIAL PRIMARY KEY,
    name VARCHAR(50) NOT NULL UNIQUE,
    location_of_origin TEXT NOT NULL,
    coat_length DOUBLE PRECISION NOT NULL CHECK (coat_length > 0),
    body_type TEXT NOT NULL,
    pattern TEXT NOT NULL
)";

const SELECT_COLUMNS: &str = "id, name, location_of_origin, coat_length, body_type, pattern";

/// A breed store backed by a PostgreSQL connection pool.
///
/// Every call checks a connection out of the pool for its own duration; batch
/// inserts hold one transaction that rolls back if dropped before commit.
#[derive(Clone)]
pub struct PgBreedStore {
    pool: PgPool,
}

impl PgBreedStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to `database_url` and creates the `breed` table if it is missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> anyhow::Result<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    fn insert_query(breed: &NewBreed) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(
            "INSERT INTO breed (name, location_of_origin, coat_length, body_type, pattern) VALUES (",
        );
        let mut values = qb.separated(", ");
        values.push_bind(breed.name.clone());
        values.push_bind(breed.location_of_origin.clone());
        values.push_bind(breed.coat_length);
        values.push_bind(breed.body_type.clone());
        values.push_bind(breed.pattern.clone());
        qb.push(") RETURNING ");
        qb.push(SELECT_COLUMNS);
        qb
    }
}

#[async_trait]
impl BreedStore for PgBreedStore {
    async fn insert(&self, breed: &NewBreed) -> Result<Breed, StoreError> {
        let row = Self::insert_query(breed)
            .build_query_as::<Breed>()
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_many(&self, breeds: &[NewBreed]) -> Result<Vec<Breed>, StoreError> {
        let mut transaction = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(breeds.len());
        for breed in breeds {
            let row = Self::insert_query(breed)
                .build_query_as::<Breed>()
                .fetch_one(&mut *transaction)
                .await?;
            inserted.push(row);
        }
        transaction.commit().await?;
        Ok(inserted)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Breed>, StoreError> {
        let sql = format!("SELECT {} FROM breed WHERE id = $1", SELECT_COLUMNS);
        let row = sqlx::query_as::<_, Breed>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by(&self, filter: &BreedFilter) -> Result<Vec<Breed>, StoreError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        qb.push(SELECT_COLUMNS);
        qb.push(" FROM breed WHERE TRUE");
        if let Some(name) = &filter.name {
            qb.push(" AND name = ").push_bind(name.clone());
        }
        if let Some(origin) = &filter.location_of_origin {
            qb.push(" AND location_of_origin = ").push_bind(origin.clone());
        }
        if let Some(coat_length) = filter.coat_length {
            qb.push(" AND coat_length = ").push_bind(coat_length);
        }
        if let Some(body_type) = &filter.body_type {
            qb.push(" AND body_type = ").push_bind(body_type.clone());
        }
        if let Some(pattern) = &filter.pattern {
            qb.push(" AND pattern = ").push_bind(pattern.clone());
        }
        qb.push(" ORDER BY id");

        let rows = qb.build_query_as::<Breed>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn update_by_id(&self, id: i64, changes: &BreedPatch) -> Result<bool, StoreError> {
        if changes.is_empty() {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM breed WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
            return Ok(exists);
        }

        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE breed SET ");
        {
            let mut sets = qb.separated(", ");
            if let Some(name) = &changes.name {
                sets.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(origin) = &changes.location_of_origin {
                sets.push("location_of_origin = ")
                    .push_bind_unseparated(origin.clone());
            }
            if let Some(coat_length) = changes.coat_length {
                sets.push("coat_length = ").push_bind_unseparated(coat_length);
            }
            if let Some(body_type) = &changes.body_type {
                sets.push("body_type = ").push_bind_unseparated(body_type.clone());
            }
            if let Some(pattern) = &changes.pattern {
                sets.push("pattern = ").push_bind_unseparated(pattern.clone());
            }
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM breed WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
