use crate::models::Complex;

/// Centre of France, used while no complex has coordinates.
pub const DEFAULT_CENTER: (f64, f64) = (46.603354, 1.888334);
pub const DEFAULT_ZOOM: u8 = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub complex_id: i64,
    pub lat: f64,
    pub lng: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

/// Framing for a list of complexes: centred on their centroid, one marker
/// per complex that has both coordinates.
pub fn map_view(complexes: &[Complex]) -> MapView {
    let markers = complexes
        .iter()
        .filter_map(|c| match (usable(c.lat), usable(c.lng)) {
            (Some(lat), Some(lng)) => Some(Marker {
                complex_id: c.id,
                lat,
                lng,
                label: c.display_name().to_string(),
            }),
            _ => None,
        })
        .collect();

    MapView {
        center: map_center(complexes),
        zoom: DEFAULT_ZOOM,
        markers,
    }
}

/// Mean latitude and mean longitude over complexes, each axis skipping
/// missing, zero and non-finite values.
pub fn map_center(complexes: &[Complex]) -> (f64, f64) {
    let lats: Vec<f64> = complexes.iter().filter_map(|c| usable(c.lat)).collect();
    let lngs: Vec<f64> = complexes.iter().filter_map(|c| usable(c.lng)).collect();

    if lats.is_empty() || lngs.is_empty() {
        return DEFAULT_CENTER;
    }

    (mean(&lats), mean(&lngs))
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
