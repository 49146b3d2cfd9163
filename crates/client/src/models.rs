use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terrain {
    pub id: i64,
    pub complex_id: i64,
    pub number: i64,
    pub occupied: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub id: i64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub surface: Option<String>,
    pub court_count: Option<i64>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub photo: Option<String>,
    pub validated: bool,
    #[serde(default)]
    pub terrains: Vec<Terrain>,
}

impl Complex {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }

    pub fn free_courts(&self) -> usize {
        self.terrains.iter().filter(|t| !t.occupied).count()
    }
}

/// Fields sent as a multipart form when creating or editing a complex.
#[derive(Debug, Clone, Default)]
pub struct ComplexSubmission {
    pub name: String,
    pub address: String,
    pub surface: String,
    pub court_count: u32,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub photo: Option<PathBuf>,
}

impl ComplexSubmission {
    /// Prefill an edit from the current server state. The photo is left out so
    /// the stored one is kept.
    pub fn from_complex(complex: &Complex) -> Self {
        Self {
            name: complex.name.clone().unwrap_or_default(),
            address: complex.address.clone().unwrap_or_default(),
            surface: complex.surface.clone().unwrap_or_default(),
            court_count: complex
                .court_count
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0),
            lat: complex.lat,
            lng: complex.lng,
            photo: None,
        }
    }

    pub fn has_coordinates(&self) -> bool {
        self.lat.is_some() && self.lng.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Created {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Occupation {
    pub occupied: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
