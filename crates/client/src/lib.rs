//! HTTP client side of Tenko: a typed wrapper over the REST API, the
//! address geocoding lookup and the map framing used when rendering complexes.

pub mod api;
pub mod error;
pub mod geocode;
pub mod map;
pub mod models;

pub use api::ApiClient;
pub use error::ClientError;
pub use geocode::{Coordinates, GeocodeError, Geocoder};
pub use models::{Complex, ComplexSubmission, Terrain};
