//! Store Model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Company branch / depot. New zones attach to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Store {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub is_active: bool,
    pub created_at: i64,
}
