//! Zone statistics over the cached zone and assignment lists

use rust_decimal::Decimal;
use shared::models::{DeliveryZone, ProductZoneAssignment, ZoneStats};

/// Aggregate counts, type histogram and mean delivery fee
pub fn compute_zone_stats(
    zones: &[DeliveryZone],
    assignments: &[ProductZoneAssignment],
) -> ZoneStats {
    let mut stats = ZoneStats {
        total_zones: zones.len(),
        total_assignments: assignments.len(),
        ..Default::default()
    };

    let mut fee_sum = Decimal::ZERO;
    for zone in zones {
        if zone.is_active {
            stats.active_zones += 1;
        }
        *stats.zones_by_type.entry(zone.zone_type).or_insert(0) += 1;
        fee_sum += zone.delivery_fee;
    }
    stats.inactive_zones = stats.total_zones - stats.active_zones;

    stats.active_assignments = assignments.iter().filter(|a| a.is_active).count();
    stats.inactive_assignments = stats.total_assignments - stats.active_assignments;

    if !zones.is_empty() {
        stats.avg_delivery_fee = fee_sum / Decimal::from(zones.len());
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ZoneType;
    use uuid::Uuid;

    fn zone(zone_type: ZoneType, fee: i64, is_active: bool) -> DeliveryZone {
        DeliveryZone {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            store_id: Uuid::nil(),
            name: format!("{zone_type} zone"),
            zone_type,
            delivery_fee: Decimal::from(fee),
            default_b2b_price: None,
            default_b2c_price: None,
            discount_percentage: None,
            is_active,
            coverage_areas: Vec::new(),
            description: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_empty_lists() {
        let stats = compute_zone_stats(&[], &[]);
        assert_eq!(stats.total_zones, 0);
        assert_eq!(stats.active_zones + stats.inactive_zones, 0);
        assert_eq!(stats.avg_delivery_fee, Decimal::ZERO);
        assert!(stats.zones_by_type.is_empty());
    }

    #[test]
    fn test_counts_and_average() {
        let zones = vec![
            zone(ZoneType::Urban, 10, true),
            zone(ZoneType::Urban, 20, false),
            zone(ZoneType::Rural, 45, true),
        ];
        let stats = compute_zone_stats(&zones, &[]);

        assert_eq!(stats.total_zones, 3);
        assert_eq!(stats.active_zones, 2);
        assert_eq!(stats.inactive_zones, 1);
        assert_eq!(stats.zones_by_type.get(&ZoneType::Urban), Some(&2));
        assert_eq!(stats.zones_by_type.get(&ZoneType::Rural), Some(&1));
        assert_eq!(stats.zones_by_type.get(&ZoneType::Express), None);
        assert_eq!(stats.avg_delivery_fee, Decimal::from(25));
    }
}
