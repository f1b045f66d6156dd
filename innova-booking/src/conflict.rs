use crate::models::Reservation;
use crate::range::TimeRange;

/// First non-cancelled reservation whose interval overlaps `candidate`.
pub fn find_conflict<'a, I>(candidate: &TimeRange, existing: I) -> Option<&'a Reservation>
where
    I: IntoIterator<Item = &'a Reservation>,
{
    existing
        .into_iter()
        .filter(|r| r.status.occupies_slot())
        .find(|r| candidate.overlaps(&r.range()))
}

pub fn has_conflict<'a, I>(candidate: &TimeRange, existing: I) -> bool
where
    I: IntoIterator<Item = &'a Reservation>,
{
    find_conflict(candidate, existing).is_some()
}
