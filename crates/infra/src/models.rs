use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ComplexRow {
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub surface: Option<String>,
    pub court_count: Option<i64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub photo: Option<String>,
    pub validated: bool,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TerrainRow {
    pub id: i64,
    pub complex_id: i64,
    pub number: i64,
    pub occupied: bool,
    pub updated_at: DateTime<Utc>,
}
