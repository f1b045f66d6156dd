use chrono::NaiveDate;
use innova_catalog::{Area, AreaId};
use serde::Serialize;
use std::sync::Arc;

use crate::calendar::{CalendarError, DayCell, MonthCursor, DAYS_PER_WEEK, WEEKS};
use crate::index::DayBucketIndex;
use crate::models::{Reservation, ReservationId};

/// Marks which view state a pending collaborator request was issued against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTicket {
    epoch: u64,
    area_id: AreaId,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DaySummary {
    pub cell: DayCell,
    pub reservations: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthSummary {
    pub year: i32,
    pub month_index: u32,
    pub rows: Vec<[DaySummary; DAYS_PER_WEEK]>,
}

/// The open calendar for one area: its reservations, the day index derived
/// from them, and the month on screen.
///
/// The index is rebuilt only when a different reservation collection is
/// installed. Switching area bumps the epoch so answers to requests issued
/// earlier are dropped.
#[derive(Debug)]
pub struct CalendarView {
    area: Area,
    reservations: Arc<[Reservation]>,
    index: DayBucketIndex,
    cursor: MonthCursor,
    epoch: u64,
    rebuilds: u64,
}

impl CalendarView {
    pub fn new(area: Area, reservations: Arc<[Reservation]>, cursor: MonthCursor) -> Self {
        let index = Self::index_for(&area.id, &reservations);
        Self {
            area,
            reservations,
            index,
            cursor,
            epoch: 0,
            rebuilds: 1,
        }
    }

    pub fn from_vec(area: Area, reservations: Vec<Reservation>, cursor: MonthCursor) -> Self {
        Self::new(area, Arc::from(reservations), cursor)
    }

    fn index_for(area_id: &AreaId, reservations: &[Reservation]) -> DayBucketIndex {
        DayBucketIndex::build(reservations.iter().filter(|r| &r.area_id == area_id))
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn index(&self) -> &DayBucketIndex {
        &self.index
    }

    pub fn reservations(&self) -> &Arc<[Reservation]> {
        &self.reservations
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Installs a freshly fetched collection. Returns whether the index was rebuilt.
    pub fn set_reservations(&mut self, reservations: Arc<[Reservation]>) -> bool {
        if Arc::ptr_eq(&self.reservations, &reservations) {
            return false;
        }
        self.index = Self::index_for(&self.area.id, &reservations);
        self.reservations = reservations;
        self.rebuilds += 1;
        true
    }

    pub fn switch_area(&mut self, area: Area, reservations: Arc<[Reservation]>) {
        self.epoch += 1;
        self.area = area;
        self.index = Self::index_for(&self.area.id, &reservations);
        self.reservations = reservations;
        self.rebuilds += 1;
        tracing::debug!(area_id = %self.area.id, epoch = self.epoch, "Calendar switched area");
    }

    pub fn ticket(&self) -> ViewTicket {
        ViewTicket {
            epoch: self.epoch,
            area_id: self.area.id.clone(),
        }
    }

    pub fn is_current(&self, ticket: &ViewTicket) -> bool {
        ticket.epoch == self.epoch && ticket.area_id == self.area.id
    }

    /// Adds a backend-confirmed reservation. Stale tickets are ignored.
    pub fn commit_created(&mut self, ticket: &ViewTicket, reservation: Reservation) -> bool {
        if !self.is_current(ticket) || reservation.area_id != self.area.id {
            tracing::debug!(reservation_id = %reservation.id, "Discarding stale creation result");
            return false;
        }
        let mut all = self.reservations.to_vec();
        all.push(reservation.clone());
        self.reservations = Arc::from(all);
        self.index.insert(reservation);
        true
    }

    /// Stores a backend-updated reservation (e.g. after cancellation). Stale tickets are ignored.
    pub fn commit_status(&mut self, ticket: &ViewTicket, reservation: Reservation) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(reservation_id = %reservation.id, "Discarding stale status result");
            return false;
        }
        let mut all = self.reservations.to_vec();
        match all.iter_mut().find(|r| r.id == reservation.id) {
            Some(slot) => *slot = reservation.clone(),
            None => return false,
        }
        self.reservations = Arc::from(all);
        self.index.replace(reservation);
        true
    }

    /// Any reservation of the collection, cancelled ones included.
    pub fn find(&self, id: &ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| &r.id == id)
    }

    /// Day panel contents, earliest first.
    pub fn day(&self, date: NaiveDate) -> Vec<&Reservation> {
        self.index.day_chronological(date)
    }

    pub fn month_summary(&self) -> Result<MonthSummary, CalendarError> {
        let matrix = self.cursor.matrix()?;
        let rows = matrix
            .rows
            .iter()
            .map(|row| {
                row.map(|cell| DaySummary {
                    cell,
                    reservations: cell.date().map_or(0, |d| self.index.count_on(d)),
                })
            })
            .collect::<Vec<_>>();
        debug_assert_eq!(rows.len(), WEEKS);
        Ok(MonthSummary {
            year: matrix.year,
            month_index: matrix.month_index,
            rows,
        })
    }
}
