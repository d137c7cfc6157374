//! Product ↔ Delivery Zone assignment model
//!
//! An assignment links one product to one zone and may override the
//! product's prices and minimum order quantity inside that zone.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::product::Product;
use super::serde_helpers::{bool_true, default_true, double_option};
use super::zone::ZoneType;

/// Which price list a lookup targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Base,
    B2b,
    B2c,
}

impl PriceType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PriceType::Base => "base",
            PriceType::B2b => "b2b",
            PriceType::B2c => "b2c",
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(PriceType::Base),
            "b2b" => Ok(PriceType::B2b),
            "b2c" => Ok(PriceType::B2c),
            other => Err(format!("unknown price type: {other}")),
        }
    }
}

/// Zone fields embedded in a joined assignment row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSummary {
    pub id: Uuid,
    pub name: String,
    pub zone_type: ZoneType,
    pub delivery_fee: Decimal,
}

/// Product-zone assignment entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductZoneAssignment {
    pub id: Uuid,
    pub product_id: Uuid,
    pub zone_id: Uuid,
    pub company_id: Uuid,
    pub store_id: Uuid,
    pub override_base_price: Option<Decimal>,
    pub override_b2b_price: Option<Decimal>,
    pub override_b2c_price: Option<Decimal>,
    pub override_min_order_quantity: Option<i32>,
    pub is_active: bool,
    pub priority: i32,
    pub created_at: i64,
    pub updated_at: i64,
    /// Joined product row; `None` when the join returned nothing
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    /// Joined zone row
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<ZoneSummary>,
}

impl ProductZoneAssignment {
    /// Price charged in this zone: the override if set, else the product default.
    ///
    /// `None` when the joined product is missing or neither value exists.
    pub fn effective_price(&self, price_type: PriceType) -> Option<Decimal> {
        let product = self.product.as_ref()?;
        match price_type {
            PriceType::Base => self.override_base_price.or(Some(product.base_price)),
            PriceType::B2b => self.override_b2b_price.or(product.b2b_price),
            PriceType::B2c => self.override_b2c_price.or(product.b2c_price),
        }
    }
}

/// Override values shared by the assignment form and the insert rows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOverrides {
    pub override_base_price: Option<Decimal>,
    pub override_b2b_price: Option<Decimal>,
    pub override_b2c_price: Option<Decimal>,
    pub override_min_order_quantity: Option<i32>,
}

/// Assign-products form: many products into one zone with shared overrides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentForm {
    pub product_ids: Vec<Uuid>,
    pub zone_id: Uuid,
    #[serde(flatten)]
    pub overrides: AssignmentOverrides,
    #[serde(default = "default_true", deserialize_with = "bool_true")]
    pub is_active: bool,
    #[serde(default)]
    pub priority: i32,
}

impl AssignmentForm {
    pub fn new(zone_id: Uuid, product_ids: Vec<Uuid>) -> Self {
        Self {
            product_ids,
            zone_id,
            overrides: AssignmentOverrides::default(),
            is_active: true,
            priority: 0,
        }
    }
}

/// One row of a bulk assignment insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    pub product_id: Uuid,
    pub zone_id: Uuid,
    pub company_id: Uuid,
    pub store_id: Uuid,
    pub overrides: AssignmentOverrides,
    pub is_active: bool,
    pub priority: i32,
    pub created_at: i64,
}

/// Partial assignment update.
///
/// Only these columns are writable through an update; unknown keys in the
/// incoming JSON (`product_id`, `zone_id`, `company_id`, ...) are dropped on
/// deserialization. Override fields distinguish absent (untouched) from
/// `null` (cleared).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentUpdate {
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub override_base_price: Option<Option<Decimal>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub override_b2b_price: Option<Option<Decimal>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub override_b2c_price: Option<Option<Decimal>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub override_min_order_quantity: Option<Option<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl AssignmentUpdate {
    /// Columns an update may touch (besides `updated_at`)
    pub const WRITABLE_FIELDS: [&'static str; 6] = [
        "override_base_price",
        "override_b2b_price",
        "override_b2c_price",
        "override_min_order_quantity",
        "is_active",
        "priority",
    ];

    /// Build from an arbitrary JSON object, keeping whitelisted keys only
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Names of the columns this update will write
    pub fn touched_fields(&self) -> Vec<&'static str> {
        let flags = [
            self.override_base_price.is_some(),
            self.override_b2b_price.is_some(),
            self.override_b2c_price.is_some(),
            self.override_min_order_quantity.is_some(),
            self.is_active.is_some(),
            self.priority.is_some(),
        ];
        Self::WRITABLE_FIELDS
            .into_iter()
            .zip(flags)
            .filter_map(|(name, set)| set.then_some(name))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.touched_fields().is_empty()
    }

    /// Apply onto an in-memory row
    pub fn apply_to(&self, row: &mut ProductZoneAssignment, updated_at: i64) {
        if let Some(v) = self.override_base_price {
            row.override_base_price = v;
        }
        if let Some(v) = self.override_b2b_price {
            row.override_b2b_price = v;
        }
        if let Some(v) = self.override_b2c_price {
            row.override_b2c_price = v;
        }
        if let Some(v) = self.override_min_order_quantity {
            row.override_min_order_quantity = v;
        }
        if let Some(v) = self.is_active {
            row.is_active = v;
        }
        if let Some(v) = self.priority {
            row.priority = v;
        }
        row.updated_at = updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(b2b: Option<i64>) -> Product {
        Product {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            name: "Propane 45kg".into(),
            sku: Some("PRO-45".into()),
            base_price: Decimal::from(140),
            b2b_price: b2b.map(Decimal::from),
            b2c_price: Some(Decimal::from(160)),
            category: Some("lpg".into()),
            status: "active".into(),
        }
    }

    fn assignment(product: Option<Product>) -> ProductZoneAssignment {
        ProductZoneAssignment {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            zone_id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            override_base_price: None,
            override_b2b_price: None,
            override_b2c_price: None,
            override_min_order_quantity: None,
            is_active: true,
            priority: 0,
            created_at: 0,
            updated_at: 0,
            product,
            zone: None,
        }
    }

    #[test]
    fn test_effective_price_prefers_override() {
        let mut a = assignment(Some(product(Some(150))));
        a.override_b2b_price = Some(Decimal::from(120));
        assert_eq!(a.effective_price(PriceType::B2b), Some(Decimal::from(120)));
        assert_eq!(a.effective_price(PriceType::B2c), Some(Decimal::from(160)));
        assert_eq!(a.effective_price(PriceType::Base), Some(Decimal::from(140)));
    }

    #[test]
    fn test_effective_price_falls_back_to_product() {
        let a = assignment(Some(product(Some(150))));
        assert_eq!(a.effective_price(PriceType::B2b), Some(Decimal::from(150)));

        let a = assignment(Some(product(None)));
        assert_eq!(a.effective_price(PriceType::B2b), None);
    }

    #[test]
    fn test_effective_price_without_product() {
        let mut a = assignment(None);
        a.override_b2b_price = Some(Decimal::from(120));
        assert_eq!(a.effective_price(PriceType::B2b), None);
    }

    #[test]
    fn test_price_type_parse() {
        assert_eq!("B2B".parse::<PriceType>(), Ok(PriceType::B2b));
        assert_eq!("base".parse::<PriceType>(), Ok(PriceType::Base));
        assert!("wholesale".parse::<PriceType>().is_err());
        assert_eq!(PriceType::B2c.to_string(), "b2c");
    }

    #[test]
    fn test_assignment_update_drops_foreign_keys() {
        let update = AssignmentUpdate::from_json(json!({
            "override_b2b_price": 99.5,
            "priority": 3,
            "product_id": Uuid::new_v4(),
            "zone_id": Uuid::new_v4(),
            "company_id": Uuid::new_v4(),
            "created_at": 1
        }))
        .unwrap();

        assert_eq!(
            update.touched_fields(),
            vec!["override_b2b_price", "priority"]
        );
        let serialized = serde_json::to_value(&update).unwrap();
        let keys: Vec<&String> = serialized.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(
            keys.iter()
                .all(|k| AssignmentUpdate::WRITABLE_FIELDS.contains(&k.as_str()))
        );
    }

    #[test]
    fn test_assignment_update_null_clears_override() {
        let update =
            AssignmentUpdate::from_json(json!({ "override_b2b_price": null })).unwrap();
        assert_eq!(update.override_b2b_price, Some(None));

        let mut row = assignment(Some(product(Some(150))));
        row.override_b2b_price = Some(Decimal::from(120));
        row.override_b2c_price = Some(Decimal::from(130));
        update.apply_to(&mut row, 42);

        assert_eq!(row.override_b2b_price, None);
        assert_eq!(row.override_b2c_price, Some(Decimal::from(130)));
        assert_eq!(row.updated_at, 42);
    }

    #[test]
    fn test_assignment_form_defaults() {
        let zone_id = Uuid::new_v4();
        let form: AssignmentForm = serde_json::from_value(json!({
            "product_ids": [Uuid::new_v4()],
            "zone_id": zone_id,
            "override_b2c_price": 10
        }))
        .unwrap();
        assert!(form.is_active);
        assert_eq!(form.priority, 0);
        assert_eq!(form.overrides.override_b2c_price, Some(Decimal::from(10)));
    }
}
