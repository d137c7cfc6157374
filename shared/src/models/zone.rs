//! Delivery Zone Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::serde_helpers::{bool_true, default_true, double_option};

/// Zone type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(type_name = "zone_type", rename_all = "lowercase"))]
pub enum ZoneType {
    Urban,
    Suburban,
    Rural,
    Express,
    Economy,
}

impl ZoneType {
    pub const ALL: [ZoneType; 5] = [
        ZoneType::Urban,
        ZoneType::Suburban,
        ZoneType::Rural,
        ZoneType::Express,
        ZoneType::Economy,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Urban => "urban",
            ZoneType::Suburban => "suburban",
            ZoneType::Rural => "rural",
            ZoneType::Express => "express",
            ZoneType::Economy => "economy",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown zone type: {s}"))
    }
}

/// Delivery zone entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DeliveryZone {
    pub id: Uuid,
    pub company_id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    pub zone_type: ZoneType,
    pub delivery_fee: Decimal,
    pub default_b2b_price: Option<Decimal>,
    pub default_b2c_price: Option<Decimal>,
    /// 0..=100
    pub discount_percentage: Option<Decimal>,
    pub is_active: bool,
    /// Postcodes / neighbourhoods covered, no duplicates
    pub coverage_areas: Vec<String>,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create zone payload (the portal's zone form)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneForm {
    pub name: String,
    pub zone_type: ZoneType,
    #[serde(default)]
    pub delivery_fee: Decimal,
    pub default_b2b_price: Option<Decimal>,
    pub default_b2c_price: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
    #[serde(default = "default_true", deserialize_with = "bool_true")]
    pub is_active: bool,
    #[serde(default)]
    pub coverage_areas: Vec<String>,
    pub description: Option<String>,
    /// Falls back to the company's first active store when absent
    pub store_id: Option<Uuid>,
}

impl ZoneForm {
    pub fn new(name: impl Into<String>, zone_type: ZoneType, delivery_fee: Decimal) -> Self {
        Self {
            name: name.into(),
            zone_type,
            delivery_fee,
            default_b2b_price: None,
            default_b2c_price: None,
            discount_percentage: None,
            is_active: true,
            coverage_areas: Vec::new(),
            description: None,
            store_id: None,
        }
    }
}

/// Update zone payload; `None` leaves the column untouched.
///
/// The nullable columns take `Some(None)` (JSON `null`) to clear them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneUpdate {
    pub name: Option<String>,
    pub zone_type: Option<ZoneType>,
    pub delivery_fee: Option<Decimal>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub default_b2b_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub default_b2c_price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<Option<Decimal>>,
    pub is_active: Option<bool>,
    pub coverage_areas: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    pub store_id: Option<Uuid>,
}

/// Validated row ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewDeliveryZone {
    pub company_id: Uuid,
    pub store_id: Uuid,
    pub form: ZoneForm,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_type_parse_and_display() {
        assert_eq!("urban".parse::<ZoneType>(), Ok(ZoneType::Urban));
        assert_eq!(" Express ".parse::<ZoneType>(), Ok(ZoneType::Express));
        assert!("downtown".parse::<ZoneType>().is_err());
        assert_eq!(ZoneType::Suburban.to_string(), "suburban");
    }

    #[test]
    fn test_zone_form_defaults() {
        let form: ZoneForm =
            serde_json::from_str(r#"{"name":"Centro","zone_type":"urban"}"#).unwrap();
        assert!(form.is_active);
        assert_eq!(form.delivery_fee, Decimal::ZERO);
        assert!(form.coverage_areas.is_empty());
        assert!(form.store_id.is_none());
    }

    #[test]
    fn test_zone_update_skips_missing_fields() {
        let update: ZoneUpdate = serde_json::from_str(r#"{"delivery_fee": 12.5}"#).unwrap();
        assert_eq!(update.delivery_fee, Some(Decimal::new(125, 1)));
        assert!(update.name.is_none());
        assert!(update.is_active.is_none());
        assert!(update.discount_percentage.is_none());
    }

    #[test]
    fn test_zone_update_null_clears_nullable_columns() {
        let json = r#"{"discount_percentage": null, "description": null, "default_b2c_price": 9}"#;
        let update: ZoneUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.discount_percentage, Some(None));
        assert_eq!(update.description, Some(None));
        assert_eq!(update.default_b2c_price, Some(Some(Decimal::from(9))));
        assert!(update.default_b2b_price.is_none());
    }
}
