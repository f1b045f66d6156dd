use std::sync::Arc;
use innova_booking::{mapping, CalendarView, MonthCursor, SlotMenu};
use innova_catalog::{find_area, Area, AreaId};
use innova_core::{AreaCatalog, ReservationQuery, ReservationStore, Session};

use crate::error::AppError;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
}

#[derive(Clone)]
pub struct AppState {
    pub areas: Arc<dyn AreaCatalog>,
    pub reservations: Arc<dyn ReservationStore>,
    pub slots: SlotMenu,
    pub auth: AuthConfig,
}

impl AppState {
    /// Areas of the session's building that carry a usable rate.
    pub async fn visible_areas(&self, session: &Session) -> Result<Vec<Area>, AppError> {
        let records = self.areas.list_areas(session, session.building_id.as_deref()).await?;
        Ok(records
            .into_iter()
            .filter_map(|record| {
                let id = record.id_area_comun.clone();
                Area::try_from(record)
                    .map_err(|e| tracing::warn!(area_id = %id, error = %e, "Skipping area"))
                    .ok()
            })
            .collect())
    }

    /// Fresh view of one area for the duration of a request.
    pub async fn open_view(
        &self,
        session: &Session,
        area_id: &str,
        query: ReservationQuery,
        cursor: MonthCursor,
    ) -> Result<CalendarView, AppError> {
        let areas = self.visible_areas(session).await?;
        let area = find_area(&areas, &AreaId::from(area_id))?.clone();
        let records = self.reservations.list_for_area(session, area_id, &query).await?;
        let reservations = mapping::reservations_from_records(records);
        tracing::debug!(area_id, count = reservations.len(), "Opened calendar view");
        Ok(CalendarView::from_vec(area, reservations, cursor))
    }
}
