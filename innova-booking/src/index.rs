use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{Reservation, ReservationId};

/// Non-cancelled reservations of one area grouped by the calendar day of their start.
///
/// Records live in an arena; each day bucket holds arena slots in fetch order.
/// A reservation crossing midnight only appears under its start day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBucketIndex {
    arena: Vec<Reservation>,
    buckets: BTreeMap<NaiveDate, Vec<usize>>,
}

impl DayBucketIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build<'a, I>(reservations: I) -> Self
    where
        I: IntoIterator<Item = &'a Reservation>,
    {
        let mut index = Self::new();
        for reservation in reservations {
            index.insert(reservation.clone());
        }
        index
    }

    /// Adds a reservation to its start-day bucket. Returns false for cancelled
    /// records, which never occupy a day.
    pub fn insert(&mut self, reservation: Reservation) -> bool {
        if reservation.is_cancelled() {
            return false;
        }
        let slot = self.arena.len();
        self.buckets.entry(reservation.day()).or_default().push(slot);
        self.arena.push(reservation);
        true
    }

    /// Replaces the stored copy of a reservation after a status change.
    /// A cancelled replacement leaves its bucket. Returns false if the id is unknown.
    pub fn replace(&mut self, reservation: Reservation) -> bool {
        let Some(slot) = self.arena.iter().position(|r| r.id == reservation.id) else {
            return false;
        };
        if reservation.is_cancelled() {
            let day = self.arena[slot].day();
            let emptied = match self.buckets.get_mut(&day) {
                Some(bucket) => {
                    bucket.retain(|&s| s != slot);
                    bucket.is_empty()
                }
                None => false,
            };
            if emptied {
                self.buckets.remove(&day);
            }
            // The arena keeps its slot; only buckets reference live records.
            self.arena[slot] = reservation;
            return true;
        }
        let old_day = self.arena[slot].day();
        let new_day = reservation.day();
        self.arena[slot] = reservation;
        if old_day != new_day {
            if let Some(bucket) = self.buckets.get_mut(&old_day) {
                bucket.retain(|&s| s != slot);
                if bucket.is_empty() {
                    self.buckets.remove(&old_day);
                }
            }
            self.buckets.entry(new_day).or_default().push(slot);
        }
        true
    }

    /// Reservations starting on `day`, in fetch order.
    pub fn day(&self, day: NaiveDate) -> Vec<&Reservation> {
        self.buckets
            .get(&day)
            .map(|slots| slots.iter().map(|&s| &self.arena[s]).collect())
            .unwrap_or_default()
    }

    /// Reservations starting on `day`, ascending by start time.
    pub fn day_chronological(&self, day: NaiveDate) -> Vec<&Reservation> {
        let mut bucket = self.day(day);
        bucket.sort_by_key(|r| r.start);
        bucket
    }

    pub fn count_on(&self, day: NaiveDate) -> usize {
        self.buckets.get(&day).map_or(0, Vec::len)
    }

    /// Days with at least one reservation, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.keys().copied()
    }

    pub fn get(&self, id: &ReservationId) -> Option<&Reservation> {
        self.bucketed().find(|r| &r.id == id)
    }

    /// Number of bucketed (non-cancelled) reservations.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn bucketed(&self) -> impl Iterator<Item = &Reservation> + '_ {
        self.buckets.values().flatten().map(|&s| &self.arena[s])
    }
}
