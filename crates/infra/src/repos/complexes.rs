use crate::{db::Db, models::ComplexRow, repos::terrains::TerrainRepo};
use sqlx::Result as SqlxResult;

#[derive(Debug, Clone)]
pub struct NewComplex {
    pub name: String,
    pub address: String,
    pub surface: String,
    pub court_count: u32,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub photo: Option<String>,
}

/// Full replacement of the editable columns. `photo: None` keeps the stored one.
#[derive(Debug, Clone)]
pub struct ComplexUpdate {
    pub name: String,
    pub address: String,
    pub surface: String,
    pub court_count: u32,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexFilter {
    pub validated: Option<bool>,
}

impl ComplexFilter {
    pub fn validated_only() -> Self {
        Self {
            validated: Some(true),
        }
    }
}

#[derive(Clone)]
pub struct ComplexRepo {
    pool: Db,
}

impl ComplexRepo {
    pub fn new(pool: Db) -> Self {
        Self { pool }
    }

    /// Insert the complex (unvalidated) and its courts numbered 1..=court_count
    /// in one transaction. Returns the generated complex id.
    pub async fn create_with_terrains(&self, data: NewComplex) -> SqlxResult<i64> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query(
            r#"
            INSERT INTO complexes (name, address, surface, court_count, lat, lng, photo)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.surface)
        .bind(data.court_count)
        .bind(data.lat)
        .bind(data.lng)
        .bind(&data.photo)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        TerrainRepo::insert_numbered(&mut tx, id, data.court_count).await?;

        tx.commit().await?;
        Ok(id)
    }

    pub async fn list(&self, filter: ComplexFilter) -> SqlxResult<Vec<ComplexRow>> {
        sqlx::query_as::<_, ComplexRow>(
            r#"
            SELECT id, name, address, surface, court_count, lat, lng, photo, validated
            FROM complexes
            WHERE (?1 IS NULL OR validated = ?1)
            ORDER BY id ASC
            "#,
        )
        .bind(filter.validated)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn get(&self, id: i64) -> SqlxResult<Option<ComplexRow>> {
        sqlx::query_as::<_, ComplexRow>(
            r#"
            SELECT id, name, address, surface, court_count, lat, lng, photo, validated
            FROM complexes
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Returns `false` when no complex has this id.
    pub async fn update(&self, id: i64, data: ComplexUpdate) -> SqlxResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE complexes
            SET name = ?,
                address = ?,
                surface = ?,
                court_count = ?,
                lat = ?,
                lng = ?,
                photo = COALESCE(?, photo)
            WHERE id = ?
            "#,
        )
        .bind(&data.name)
        .bind(&data.address)
        .bind(&data.surface)
        .bind(data.court_count)
        .bind(data.lat)
        .bind(data.lng)
        .bind(&data.photo)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Mark a complex as validated. Already validated complexes still match.
    pub async fn validate(&self, id: i64) -> SqlxResult<bool> {
        let result = sqlx::query("UPDATE complexes SET validated = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete the courts of a complex, then the complex itself.
    pub async fn delete(&self, id: i64) -> SqlxResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM terrains WHERE complex_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM complexes WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
