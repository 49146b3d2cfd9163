use std::collections::HashMap;

use infra::{
    models::{ComplexRow, TerrainRow},
    repos::ComplexFilter,
};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// A complex with its courts nested, as served by the list endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ComplexWithTerrains {
    #[serde(flatten)]
    pub complex: ComplexRow,
    pub terrains: Vec<TerrainRow>,
}

pub async fn list_with_terrains(
    state: &AppState,
    filter: ComplexFilter,
) -> Result<Vec<ComplexWithTerrains>, AppError> {
    let complexes = state.complexes().list(filter).await?;
    let ids: Vec<i64> = complexes.iter().map(|c| c.id).collect();
    let terrains = state.terrains().list_by_complexes(&ids).await?;
    Ok(group_terrains(complexes, terrains))
}

/// Attach each court to its complex, keeping both input orders.
/// Courts whose complex is not in `complexes` are dropped.
pub fn group_terrains(
    complexes: Vec<ComplexRow>,
    terrains: Vec<TerrainRow>,
) -> Vec<ComplexWithTerrains> {
    let index: HashMap<i64, usize> = complexes
        .iter()
        .enumerate()
        .map(|(i, c)| (c.id, i))
        .collect();

    let mut grouped: Vec<ComplexWithTerrains> = complexes
        .into_iter()
        .map(|complex| ComplexWithTerrains {
            complex,
            terrains: Vec::new(),
        })
        .collect();

    for terrain in terrains {
        if let Some(&i) = index.get(&terrain.complex_id) {
            grouped[i].terrains.push(terrain);
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn complex(id: i64) -> ComplexRow {
        ComplexRow {
            id,
            name: Some(format!("Complex {id}")),
            address: None,
            surface: None,
            court_count: Some(0),
            lat: None,
            lng: None,
            photo: None,
            validated: true,
        }
    }

    fn terrain(id: i64, complex_id: i64, number: i64) -> TerrainRow {
        TerrainRow {
            id,
            complex_id,
            number,
            occupied: false,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn nests_courts_under_their_complex() {
        let grouped = group_terrains(
            vec![complex(1), complex(2), complex(3)],
            vec![terrain(10, 1, 1), terrain(11, 1, 2), terrain(20, 3, 1), terrain(99, 7, 1)],
        );

        let shape: Vec<(i64, Vec<i64>)> = grouped
            .iter()
            .map(|g| (g.complex.id, g.terrains.iter().map(|t| t.id).collect()))
            .collect();
        assert_eq!(shape, vec![(1, vec![10, 11]), (2, vec![]), (3, vec![20])]);
    }

    #[test]
    fn serializes_flat_with_terrains_field() {
        let grouped = group_terrains(vec![complex(5)], vec![terrain(1, 5, 1)]);
        let json = serde_json::to_value(&grouped[0]).unwrap();
        assert_eq!(json["id"], 5);
        assert_eq!(json["validated"], true);
        assert_eq!(json["terrains"][0]["number"], 1);
        assert_eq!(json["terrains"][0]["occupied"], false);
    }
}
