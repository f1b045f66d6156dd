//! Conversion between backend wire records and scheduling types.
//!
//! The backend speaks free-form status strings and ISO-8601 timestamps with or
//! without an offset; everything is normalised here so the core only sees
//! [`ReservationStatus`] and building-local [`NaiveDateTime`] values.

use chrono::NaiveDateTime;
use innova_catalog::AreaId;
use innova_core::timestamp;
use innova_shared::{CreateReservationRecord, Masked, ReservationRecord, ResidentRecord};
use rust_decimal::Decimal;

use crate::models::{Reservation, ReservationId, ReservationStatus, Resident};

pub const STATUS_ACTIVE: &str = "pagado";
pub const STATUS_CANCELLED: &str = "cancelado";

pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, MappingError> {
    timestamp::parse(raw).map_err(|e| MappingError::InvalidTimestamp(e.0))
}

pub fn format_timestamp(ts: NaiveDateTime) -> String {
    timestamp::format(ts)
}

/// Collapses the backend status vocabulary into the closed lifecycle enum.
/// Anything not recognisably cancelled keeps its slot.
pub fn status_from_wire(estado: &str) -> ReservationStatus {
    match estado.trim().to_lowercase().as_str() {
        "pagado" | "pagada" => ReservationStatus::Active,
        "cancelado" | "cancelada" => ReservationStatus::Cancelled,
        known @ ("confirmada" | "confirmado" | "pendiente" | "activa" | "activo") => {
            tracing::warn!(estado = known, "Non-canonical reservation status treated as active");
            ReservationStatus::Active
        }
        other => {
            tracing::warn!(estado = other, "Unknown reservation status treated as active");
            ReservationStatus::Active
        }
    }
}

/// Wire label for a persisted status. Pending drafts have none.
pub fn status_to_wire(status: ReservationStatus) -> Option<&'static str> {
    match status {
        ReservationStatus::Active => Some(STATUS_ACTIVE),
        ReservationStatus::Cancelled => Some(STATUS_CANCELLED),
        ReservationStatus::PendingConfirmation => None,
    }
}

impl TryFrom<ReservationRecord> for Reservation {
    type Error = MappingError;

    fn try_from(record: ReservationRecord) -> Result<Self, Self::Error> {
        let start = parse_timestamp(&record.fecha_ini)?;
        let end = parse_timestamp(&record.fecha_fin)?;
        if end <= start {
            return Err(MappingError::InvertedInterval {
                reservation_id: record.id_reserva,
            });
        }
        if record.costo_total < Decimal::ZERO {
            return Err(MappingError::NegativeCost {
                reservation_id: record.id_reserva,
            });
        }
        Ok(Reservation {
            status: status_from_wire(&record.estado),
            id: ReservationId(record.id_reserva),
            code: record.codigo,
            area_id: AreaId(record.id_area_comun),
            resident: record.usuario.map(Resident::from),
            start,
            end,
            total_cost: record.costo_total,
        })
    }
}

impl From<ResidentRecord> for Resident {
    fn from(record: ResidentRecord) -> Self {
        Self {
            user_id: record.id_usuario,
            first_name: Masked(record.nombre),
            last_name: Masked(record.apellido),
        }
    }
}

/// Maps a batch, skipping records that cannot be interpreted.
pub fn reservations_from_records(records: Vec<ReservationRecord>) -> Vec<Reservation> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.id_reserva.clone();
            match Reservation::try_from(record) {
                Ok(reservation) => Some(reservation),
                Err(e) => {
                    tracing::warn!(reservation_id = %id, error = %e, "Skipping malformed reservation record");
                    None
                }
            }
        })
        .collect()
}

pub fn create_record(
    area_id: &AreaId,
    start: NaiveDateTime,
    end: NaiveDateTime,
    total_cost: Decimal,
    payment_confirmed: bool,
) -> CreateReservationRecord {
    CreateReservationRecord {
        id_area_comun: area_id.to_string(),
        fecha_ini: format_timestamp(start),
        fecha_fin: format_timestamp(end),
        costo_total: total_cost,
        pago_confirmado: payment_confirmed,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Reservation {reservation_id} ends before it starts")]
    InvertedInterval { reservation_id: String },

    #[error("Reservation {reservation_id} has a negative total cost")]
    NegativeCost { reservation_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::at;
    use std::str::FromStr;

    fn record(estado: &str) -> ReservationRecord {
        ReservationRecord {
            id_reserva: "10".to_string(),
            codigo: "RES-0010".to_string(),
            id_area_comun: "gym".to_string(),
            usuario: Some(ResidentRecord {
                id_usuario: Some("u-1".to_string()),
                nombre: "Ana".to_string(),
                apellido: "Rojas".to_string(),
            }),
            fecha_ini: "2025-10-15T09:00:00".to_string(),
            fecha_fin: "2025-10-15T11:00:00".to_string(),
            costo_total: Decimal::from_str("120.00").unwrap(),
            estado: estado.to_string(),
        }
    }

    #[test]
    fn test_timestamp_formats() {
        let expected = at(15, 9, 0);
        assert_eq!(parse_timestamp("2025-10-15T09:00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-10-15T09:00:00.000").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-10-15 09:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2025-10-15T09:00:00-05:00").unwrap(), expected);
        assert!(parse_timestamp("15/10/2025").is_err());
    }

    #[test]
    fn test_status_vocabulary() {
        assert_eq!(status_from_wire("pagado"), ReservationStatus::Active);
        assert_eq!(status_from_wire("CANCELADO"), ReservationStatus::Cancelled);
        assert_eq!(status_from_wire("cancelada"), ReservationStatus::Cancelled);
        assert_eq!(status_from_wire("pendiente"), ReservationStatus::Active);
        assert_eq!(status_from_wire("whatever"), ReservationStatus::Active);
        assert_eq!(status_to_wire(ReservationStatus::Cancelled), Some("cancelado"));
        assert_eq!(status_to_wire(ReservationStatus::PendingConfirmation), None);
    }

    #[test]
    fn test_record_to_reservation() {
        let reservation = Reservation::try_from(record("pagado")).unwrap();
        assert_eq!(reservation.start, at(15, 9, 0));
        assert_eq!(reservation.end, at(15, 11, 0));
        assert_eq!(reservation.status, ReservationStatus::Active);
        assert_eq!(reservation.owner_id(), Some("u-1"));
    }

    #[test]
    fn test_inverted_record_rejected() {
        let mut bad = record("pagado");
        bad.fecha_fin = "2025-10-15T08:00:00".to_string();
        assert!(matches!(
            Reservation::try_from(bad.clone()),
            Err(MappingError::InvertedInterval { .. })
        ));
        let mapped = reservations_from_records(vec![bad, record("cancelado")]);
        assert_eq!(mapped.len(), 1);
        assert!(mapped[0].is_cancelled());
    }

    #[test]
    fn test_create_record() {
        let cmd = create_record(&AreaId::from("gym"), at(15, 19, 0), at(15, 21, 0), Decimal::from(120), true);
        assert_eq!(cmd.fecha_ini, "2025-10-15T19:00:00");
        assert_eq!(cmd.fecha_fin, "2025-10-15T21:00:00");
        assert!(cmd.pago_confirmado);
    }
}
