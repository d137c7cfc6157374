//! Services

pub mod zone_assignment;
pub mod zone_stats;

pub use zone_assignment::ZoneAssignmentService;
pub use zone_stats::compute_zone_stats;
