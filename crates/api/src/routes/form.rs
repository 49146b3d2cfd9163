use axum::extract::Multipart;
use infra::repos::{ComplexUpdate, NewComplex};

use crate::error::AppError;
use crate::services::uploads::PhotoUpload;

/// Upper bound on courts declared by a single submission.
pub const MAX_COURTS: u32 = 100;

/// Text fields of the complex form as they arrive on the wire.
#[derive(Debug, Default)]
struct RawFields {
    name: Option<String>,
    address: Option<String>,
    surface: Option<String>,
    court_count: Option<String>,
    lat: Option<String>,
    lng: Option<String>,
}

impl RawFields {
    /// Store a text field, accepting the legacy French names too.
    fn set(&mut self, field: &str, value: String) {
        let slot = match field {
            "name" | "nom" => &mut self.name,
            "address" | "adresse" => &mut self.address,
            "surface" => &mut self.surface,
            "court_count" | "nombre_terrains" => &mut self.court_count,
            "lat" => &mut self.lat,
            "lng" => &mut self.lng,
            _ => return,
        };
        *slot = Some(value.trim().to_string());
    }
}

/// Parsed multipart body shared by complex creation and admin edits.
#[derive(Debug)]
pub struct ComplexForm {
    pub name: String,
    pub address: String,
    pub surface: String,
    pub court_count: u32,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub photo: Option<PhotoUpload>,
}

impl ComplexForm {
    pub async fn read(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut raw = RawFields::default();
        let mut photo = None;

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == "photo" {
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field.bytes().await?;
                // Browsers send an empty part when no file was picked.
                if !bytes.is_empty() {
                    photo = Some(PhotoUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                raw.set(&name, field.text().await?);
            }
        }

        Self::from_fields(raw, photo)
    }

    fn from_fields(raw: RawFields, photo: Option<PhotoUpload>) -> Result<Self, AppError> {
        Ok(Self {
            court_count: parse_court_count(raw.court_count.as_deref())?,
            lat: parse_coordinate("lat", raw.lat.as_deref(), 90.0)?,
            lng: parse_coordinate("lng", raw.lng.as_deref(), 180.0)?,
            name: raw.name.unwrap_or_default(),
            address: raw.address.unwrap_or_default(),
            surface: raw.surface.unwrap_or_default(),
            photo,
        })
    }

    pub fn into_new_complex(self, photo: Option<String>) -> NewComplex {
        NewComplex {
            name: self.name,
            address: self.address,
            surface: self.surface,
            court_count: self.court_count,
            lat: self.lat,
            lng: self.lng,
            photo,
        }
    }

    pub fn into_update(self, photo: Option<String>) -> ComplexUpdate {
        ComplexUpdate {
            name: self.name,
            address: self.address,
            surface: self.surface,
            court_count: self.court_count,
            lat: self.lat,
            lng: self.lng,
            photo,
        }
    }
}

fn parse_court_count(raw: Option<&str>) -> Result<u32, AppError> {
    let raw = match raw {
        None | Some("") => return Ok(0),
        Some(raw) => raw,
    };
    let count: u32 = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("court_count must be a whole number, got {raw:?}")))?;
    if count > MAX_COURTS {
        return Err(AppError::BadRequest(format!(
            "court_count must be at most {MAX_COURTS}"
        )));
    }
    Ok(count)
}

/// Empty or missing means "not geocoded yet".
fn parse_coordinate(field: &str, raw: Option<&str>, bound: f64) -> Result<Option<f64>, AppError> {
    let raw = match raw {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };
    let value: f64 = raw
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{field} must be a decimal number, got {raw:?}")))?;
    if !value.is_finite() || value.abs() > bound {
        return Err(AppError::BadRequest(format!(
            "{field} must be between -{bound} and {bound}"
        )));
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> RawFields {
        let mut raw = RawFields::default();
        for (k, v) in pairs {
            raw.set(k, v.to_string());
        }
        raw
    }

    #[test]
    fn parses_a_full_submission() {
        let form = ComplexForm::from_fields(
            fields(&[
                ("name", " Club A "),
                ("address", "1 Rue X"),
                ("surface", "clay"),
                ("court_count", "2"),
                ("lat", "48.85"),
                ("lng", "2.35"),
                ("unknown", "ignored"),
            ]),
            None,
        )
        .unwrap();

        assert_eq!(form.name, "Club A");
        assert_eq!(form.court_count, 2);
        assert_eq!(form.lat, Some(48.85));
        assert_eq!(form.lng, Some(2.35));
    }

    #[test]
    fn accepts_legacy_field_names() {
        let form = ComplexForm::from_fields(
            fields(&[("nom", "Club"), ("adresse", "Rue"), ("nombre_terrains", "3")]),
            None,
        )
        .unwrap();
        assert_eq!(form.name, "Club");
        assert_eq!(form.address, "Rue");
        assert_eq!(form.court_count, 3);
    }

    #[test]
    fn blank_coordinates_are_null_and_missing_count_is_zero() {
        let form = ComplexForm::from_fields(fields(&[("lat", ""), ("lng", " ")]), None).unwrap();
        assert_eq!(form.lat, None);
        assert_eq!(form.lng, None);
        assert_eq!(form.court_count, 0);
    }

    #[test]
    fn rejects_malformed_numbers() {
        for pairs in [
            vec![("court_count", "two")],
            vec![("court_count", "-1")],
            vec![("court_count", "101")],
            vec![("lat", "north")],
            vec![("lat", "91")],
            vec![("lng", "-180.5")],
            vec![("lng", "NaN")],
        ] {
            let err = ComplexForm::from_fields(fields(&pairs), None).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)), "{pairs:?}");
        }
    }
}
