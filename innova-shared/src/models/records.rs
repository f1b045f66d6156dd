use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{optional_string_or_number, string_or_number};

/// Common area as served by the backend catalogue.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AreaRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id_area_comun: String,
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub costo_hora: Decimal,
    #[serde(default, deserialize_with = "optional_string_or_number", skip_serializing_if = "Option::is_none")]
    pub id_edificio: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResidentRecord {
    #[serde(default, deserialize_with = "optional_string_or_number", skip_serializing_if = "Option::is_none")]
    pub id_usuario: Option<String>,
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
}

/// Reservation as served by the backend. Timestamps are ISO-8601 strings and
/// `estado` is the backend's free-form status vocabulary.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReservationRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id_reserva: String,
    #[serde(default)]
    pub codigo: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id_area_comun: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario: Option<ResidentRecord>,
    pub fecha_ini: String,
    pub fecha_fin: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub costo_total: Decimal,
    pub estado: String,
}

/// Body of a creation request.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CreateReservationRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id_area_comun: String,
    pub fecha_ini: String,
    pub fecha_fin: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub costo_total: Decimal,
    pub pago_confirmado: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StatusUpdateRecord {
    pub estado: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_reservation_record_deserialization() {
        let json = r#"
            {
                "id_reserva": "42",
                "codigo": "RES-0042",
                "id_area_comun": "7",
                "usuario": { "nombre": "Ana", "apellido": "Rojas" },
                "fecha_ini": "2025-10-15T09:00:00",
                "fecha_fin": "2025-10-15T11:00:00",
                "costo_total": 120.5,
                "estado": "pagado"
            }
        "#;
        let record: ReservationRecord = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(record.codigo, "RES-0042");
        assert_eq!(record.costo_total, Decimal::from_str("120.5").unwrap());
        assert_eq!(record.usuario.unwrap().apellido, "Rojas");
    }

    #[test]
    fn test_numeric_ids_become_strings() {
        let json = r#"
            {
                "id_reserva": 42,
                "codigo": "RES-0042",
                "id_area_comun": 3,
                "usuario": { "id_usuario": 17, "nombre": "Ana", "apellido": "Rojas" },
                "fecha_ini": "2025-10-15T09:00:00",
                "fecha_fin": "2025-10-15T11:00:00",
                "costo_total": 120,
                "estado": "pagado"
            }
        "#;
        let record: ReservationRecord = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(record.id_reserva, "42");
        assert_eq!(record.id_area_comun, "3");
        assert_eq!(record.usuario.unwrap().id_usuario.as_deref(), Some("17"));

        let area: AreaRecord =
            serde_json::from_str(r#"{ "id_area_comun": 5, "nombre": "Gym", "costo_hora": 60, "id_edificio": 2 }"#)
                .expect("Failed to deserialize");
        assert_eq!(area.id_area_comun, "5");
        assert_eq!(area.id_edificio.as_deref(), Some("2"));
    }

    #[test]
    fn test_missing_and_null_owner_id() {
        let resident: ResidentRecord = serde_json::from_str(r#"{ "nombre": "Ana" }"#).unwrap();
        assert!(resident.id_usuario.is_none());
        let resident: ResidentRecord = serde_json::from_str(r#"{ "id_usuario": null, "nombre": "Ana" }"#).unwrap();
        assert!(resident.id_usuario.is_none());
    }

    #[test]
    fn test_area_record_accepts_integer_rate() {
        let json = r#"{ "id_area_comun": "1", "nombre": "Gym", "costo_hora": 60 }"#;
        let record: AreaRecord = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(record.costo_hora, Decimal::from(60));
        assert!(record.ubicacion.is_none());
    }

    #[test]
    fn test_create_record_serializes_cost_as_number() {
        let record = CreateReservationRecord {
            id_area_comun: "1".to_string(),
            fecha_ini: "2025-10-15T19:00:00".to_string(),
            fecha_fin: "2025-10-15T21:00:00".to_string(),
            costo_total: Decimal::from(120),
            pago_confirmado: true,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["costo_total"].is_number());
        assert_eq!(value["pago_confirmado"], serde_json::json!(true));
    }
}
