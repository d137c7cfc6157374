//! Product Model
//!
//! Products are owned by the catalogue screens; the zone service only reads them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product entity (read-only here)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub sku: Option<String>,
    /// Default list price
    pub base_price: Decimal,
    /// Default business-customer price
    pub b2b_price: Option<Decimal>,
    /// Default consumer price
    pub b2c_price: Option<Decimal>,
    pub category: Option<String>,
    /// draft | active | archived (free text in the catalogue)
    pub status: String,
}
