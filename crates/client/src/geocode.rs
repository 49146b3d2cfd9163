use serde::Deserialize;
use thiserror::Error;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// The lookup itself failed. A successful lookup with no match is `Ok(None)`.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("lookup failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("lookup failed: unexpected answer ({0})")]
    Malformed(String),
}

/// One search hit. Nominatim sends coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

/// Address to coordinates through a Nominatim-compatible search service.
#[derive(Debug, Clone)]
pub struct Geocoder {
    http: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GeocodeError> {
        // Nominatim's usage policy rejects anonymous clients.
        let http = reqwest::Client::builder()
            .user_agent(concat!("tenko/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Best match for a free-text address, `None` when nothing matched.
    pub async fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let body = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("format", "json"), ("q", address)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let found = parse_search_results(&body)?;
        match found {
            Some(c) => tracing::debug!(address, lat = c.lat, lng = c.lng, "geocoded"),
            None => tracing::debug!(address, "address not found"),
        }
        Ok(found)
    }
}

/// First hit of a Nominatim `format=json` answer.
pub fn parse_search_results(body: &str) -> Result<Option<Coordinates>, GeocodeError> {
    let places: Vec<Place> =
        serde_json::from_str(body).map_err(|e| GeocodeError::Malformed(e.to_string()))?;

    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let parse = |raw: &str| {
        raw.parse::<f64>()
            .map_err(|_| GeocodeError::Malformed(format!("bad coordinate {raw:?}")))
    };

    Ok(Some(Coordinates {
        lat: parse(&place.lat)?,
        lng: parse(&place.lon)?,
    }))
}
