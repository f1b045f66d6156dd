use async_trait::async_trait;
use chrono_tz::Tz;
use innova_core::{timestamp, AreaCatalog, CollaboratorError, CollaboratorResult, ReservationQuery, ReservationStore, Session};
use innova_shared::{AreaRecord, CreateReservationRecord, ReservationRecord, StatusUpdateRecord};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::app_config::BackendConfig;

/// REST client for the InnovaBuilding backend.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    zone: Option<Tz>,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, CollaboratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| CollaboratorError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            zone: None,
        })
    }

    /// Offset-bearing timestamps from the backend are converted into `zone`.
    pub fn with_timezone(mut self, zone: Tz) -> Self {
        self.zone = Some(zone);
        self
    }

    fn localize(&self, mut record: ReservationRecord) -> ReservationRecord {
        if let Some(zone) = self.zone {
            record.fecha_ini = timestamp::localize(&record.fecha_ini, zone);
            record.fecha_fin = timestamp::localize(&record.fecha_fin, zone);
        }
        record
    }

    fn localize_all(&self, records: Vec<ReservationRecord>) -> Vec<ReservationRecord> {
        records.into_iter().map(|r| self.localize(r)).collect()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        match &session.access_token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder, session: &Session) -> CollaboratorResult<T> {
        let response = self.authorized(builder, session).send().await.map_err(|e| {
            tracing::error!(error = %e, "Backend request failed");
            CollaboratorError::Transport(e.to_string())
        })?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> CollaboratorResult<T> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| CollaboratorError::Transport(e.to_string()))?;

    if !status.is_success() {
        let message = rejection_message(&body).unwrap_or_else(|| format!("Backend answered {}", status));
        tracing::warn!(status = %status, %message, "Backend rejected request");
        return Err(CollaboratorError::Rejected(message));
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::error!(error = %e, "Undecodable backend response");
        CollaboratorError::Malformed(e.to_string())
    })
}

/// Pulls the human-readable message out of an error body.
pub(crate) fn rejection_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error", "mensaje"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[async_trait]
impl AreaCatalog for HttpBackend {
    async fn list_areas(&self, session: &Session, building_id: Option<&str>) -> CollaboratorResult<Vec<AreaRecord>> {
        let mut req = self.client.get(self.url("/areas-comunes"));
        if let Some(building) = building_id {
            req = req.query(&[("id_edificio", building)]);
        }
        self.execute(req, session).await
    }
}

#[async_trait]
impl ReservationStore for HttpBackend {
    async fn list_for_area(
        &self,
        session: &Session,
        area_id: &str,
        query: &ReservationQuery,
    ) -> CollaboratorResult<Vec<ReservationRecord>> {
        let req = self
            .client
            .get(self.url(&format!("/areas-comunes/{}/reservas", area_id)))
            .query(&query.to_params());
        self.execute(req, session).await.map(|records| self.localize_all(records))
    }

    async fn create(&self, session: &Session, command: &CreateReservationRecord) -> CollaboratorResult<ReservationRecord> {
        let req = self.client.post(self.url("/reservas")).json(command);
        self.execute(req, session).await.map(|record| self.localize(record))
    }

    async fn update_status(
        &self,
        session: &Session,
        reservation_id: &str,
        estado: &str,
    ) -> CollaboratorResult<ReservationRecord> {
        let body = StatusUpdateRecord {
            estado: estado.to_string(),
        };
        let req = self
            .client
            .patch(self.url(&format!("/reservas/{}/estado", reservation_id)))
            .json(&body);
        self.execute(req, session).await.map(|record| self.localize(record))
    }

    async fn list_mine(&self, session: &Session) -> CollaboratorResult<Vec<ReservationRecord>> {
        let req = self.client.get(self.url("/reservas/mias"));
        self.execute(req, session).await.map(|records| self.localize_all(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_keys() {
        assert_eq!(rejection_message(r#"{"message":"Horario ocupado"}"#).as_deref(), Some("Horario ocupado"));
        assert_eq!(rejection_message(r#"{"mensaje":"Sin permiso"}"#).as_deref(), Some("Sin permiso"));
        assert_eq!(rejection_message(r#"{"error":"bad"}"#).as_deref(), Some("bad"));
        assert_eq!(rejection_message("<html>"), None);
        assert_eq!(rejection_message(r#"{"code":3}"#), None);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let backend = HttpBackend::new(&BackendConfig {
            base_url: "https://api.example.com/".to_string(),
            timeout_seconds: 5,
            seed_areas: Vec::new(),
        })
        .unwrap();
        assert_eq!(backend.url("/reservas"), "https://api.example.com/reservas");
    }

    #[test]
    fn test_records_moved_into_building_timezone() {
        let config = BackendConfig {
            base_url: "https://api.example.com".to_string(),
            timeout_seconds: 5,
            seed_areas: Vec::new(),
        };
        let record = ReservationRecord {
            id_reserva: "42".to_string(),
            codigo: "RES-0042".to_string(),
            id_area_comun: "3".to_string(),
            usuario: None,
            fecha_ini: "2025-10-16T03:00:00.000Z".to_string(),
            fecha_fin: "2025-10-16T04:00:00.000Z".to_string(),
            costo_total: Default::default(),
            estado: "pagado".to_string(),
        };

        let plain = HttpBackend::new(&config).unwrap();
        assert_eq!(plain.localize(record.clone()).fecha_ini, "2025-10-16T03:00:00.000Z");

        let zoned = HttpBackend::new(&config).unwrap().with_timezone(Tz::America__La_Paz);
        let local = zoned.localize(record);
        assert_eq!(local.fecha_ini, "2025-10-15T23:00:00");
        assert_eq!(local.fecha_fin, "2025-10-16T00:00:00");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let backend = HttpBackend::new(&BackendConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 1,
            seed_areas: Vec::new(),
        })
        .unwrap();
        let result = backend.list_mine(&Session::new("u-1", innova_core::Role::Resident)).await;
        assert!(matches!(result, Err(CollaboratorError::Transport(_))));
    }
}
