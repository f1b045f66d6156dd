pub mod area;
pub mod pricing;

pub use area::{find_area, Area, AreaId, CatalogError};
pub use pricing::{compute_cost, duration_hours, format_amount, Quote};
