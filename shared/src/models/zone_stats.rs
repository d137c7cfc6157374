//! Zone statistics shown on the zones dashboard header

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::zone::ZoneType;

/// Aggregate counts over the cached zone and assignment lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneStats {
    pub total_zones: usize,
    pub active_zones: usize,
    pub inactive_zones: usize,
    pub total_assignments: usize,
    pub active_assignments: usize,
    pub inactive_assignments: usize,
    /// Only zone types that occur are present
    pub zones_by_type: BTreeMap<ZoneType, usize>,
    /// Mean delivery fee; zero when there are no zones
    pub avg_delivery_fee: Decimal,
}
