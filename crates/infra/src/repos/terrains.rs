use chrono::Utc;
use sqlx::{QueryBuilder, Result as SqlxResult, Sqlite, SqliteConnection};

use crate::{db::Db, models::TerrainRow};

#[derive(Clone)]
pub struct TerrainRepo {
    pool: Db,
}

impl TerrainRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    /// Insert `count` free courts numbered 1..=count for `complex_id`.
    ///
    /// Runs on the caller's connection so it can share the transaction that
    /// created the complex.
    pub async fn insert_numbered(
        conn: &mut SqliteConnection,
        complex_id: i64,
        count: u32,
    ) -> SqlxResult<()> {
        let now = Utc::now();
        for number in 1..=count {
            sqlx::query(
                "INSERT INTO terrains (complex_id, number, occupied, updated_at) VALUES (?, ?, 0, ?)",
            )
            .bind(complex_id)
            .bind(number)
            .bind(now)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    /// Courts belonging to any of `complex_ids`, ordered by complex then number.
    pub async fn list_by_complexes(&self, complex_ids: &[i64]) -> SqlxResult<Vec<TerrainRow>> {
        if complex_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, complex_id, number, occupied, updated_at FROM terrains WHERE complex_id IN (",
        );
        let mut ids = query.separated(", ");
        for id in complex_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(") ORDER BY complex_id ASC, number ASC, id ASC");

        query
            .build_query_as::<TerrainRow>()
            .fetch_all(&self.pool)
            .await
    }

    pub async fn get(&self, id: i64) -> SqlxResult<Option<TerrainRow>> {
        sqlx::query_as::<_, TerrainRow>(
            "SELECT id, complex_id, number, occupied, updated_at FROM terrains WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn occupied(&self, id: i64) -> SqlxResult<Option<bool>> {
        sqlx::query_scalar::<_, bool>("SELECT occupied FROM terrains WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Flip the occupied flag in a single statement and return the new value.
    ///
    /// `None` when the court does not exist.
    pub async fn toggle_occupation(&self, id: i64) -> SqlxResult<Option<bool>> {
        sqlx::query_scalar::<_, bool>(
            r#"
            UPDATE terrains
            SET occupied = NOT occupied,
                updated_at = ?
            WHERE id = ?
            RETURNING occupied
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn update_number(&self, id: i64, number: u32) -> SqlxResult<bool> {
        let result = sqlx::query("UPDATE terrains SET number = ? WHERE id = ?")
            .bind(number)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> SqlxResult<bool> {
        let result = sqlx::query("DELETE FROM terrains WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
