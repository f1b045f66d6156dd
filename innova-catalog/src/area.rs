use innova_shared::AreaRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque backend identifier of a common area.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(pub String);

impl AreaId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AreaId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A reservable amenity (gym, event hall, ...). Read-only for scheduling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
    pub location: Option<String>,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub hourly_rate: Decimal,
    pub building_id: Option<String>,
}

impl Area {
    pub fn new(id: impl Into<String>, name: impl Into<String>, hourly_rate: Decimal) -> Result<Self, CatalogError> {
        let id = id.into();
        if hourly_rate < Decimal::ZERO {
            return Err(CatalogError::NegativeRate { area_id: id, rate: hourly_rate });
        }
        Ok(Self {
            id: AreaId(id),
            name: name.into(),
            location: None,
            description: None,
            hourly_rate,
            building_id: None,
        })
    }

    pub fn is_free(&self) -> bool {
        self.hourly_rate.is_zero()
    }
}

impl TryFrom<AreaRecord> for Area {
    type Error = CatalogError;

    fn try_from(record: AreaRecord) -> Result<Self, Self::Error> {
        let mut area = Area::new(record.id_area_comun, record.nombre, record.costo_hora)?;
        area.location = record.ubicacion.filter(|s| !s.trim().is_empty());
        area.description = record.descripcion.filter(|s| !s.trim().is_empty());
        area.building_id = record.id_edificio;
        Ok(area)
    }
}

/// Look up an area by id in a fetched catalogue.
pub fn find_area<'a>(areas: &'a [Area], id: &AreaId) -> Result<&'a Area, CatalogError> {
    areas
        .iter()
        .find(|area| &area.id == id)
        .ok_or_else(|| CatalogError::NotFound(id.to_string()))
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Area not found: {0}")]
    NotFound(String),

    #[error("Area {area_id} has a negative hourly rate: {rate}")]
    NegativeRate {
        area_id: String,
        rate: Decimal,
    },
}
