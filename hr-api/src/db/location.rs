//! Location Repository

use async_trait::async_trait;
use shared::models::{Location, LocationCreate, LocationField};

use super::{PgStore, RepoResult};

#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// All locations ordered by id
    async fn list_locations(&self) -> RepoResult<Vec<Location>>;
    async fn find_location(&self, id: i64) -> RepoResult<Option<Location>>;
    /// Insert and return the generated id
    async fn insert_location(&self, data: &LocationCreate) -> RepoResult<i64>;
    /// Write one column; `false` when no row has that id
    async fn update_location(&self, id: i64, field: &LocationField) -> RepoResult<bool>;
    async fn delete_location(&self, id: i64) -> RepoResult<bool>;
    /// Whether any department references the location
    async fn location_in_use(&self, id: i64) -> RepoResult<bool>;
}

#[async_trait]
impl LocationRepository for PgStore {
    async fn list_locations(&self) -> RepoResult<Vec<Location>> {
        let rows: Vec<Location> = sqlx::query_as("SELECT * FROM location ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_location(&self, id: i64) -> RepoResult<Option<Location>> {
        let row: Option<Location> = sqlx::query_as("SELECT * FROM location WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_location(&self, data: &LocationCreate) -> RepoResult<i64> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO location (name, address, postal_code, city, country)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.postal_code)
        .bind(&data.city)
        .bind(&data.country)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_location(&self, id: i64, field: &LocationField) -> RepoResult<bool> {
        // Column names come from a closed enum, never from input
        let sql = format!("UPDATE location SET {} = $1 WHERE id = $2", field.column());
        let result = sqlx::query(&sql)
            .bind(field.value())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_location(&self, id: i64) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM location WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn location_in_use(&self, id: i64) -> RepoResult<bool> {
        let used: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM department WHERE location_id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(used)
    }
}
