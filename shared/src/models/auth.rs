//! Authenticated caller

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated caller, as handed over by the portal's session layer.
///
/// `profile_id` keys the membership table; `user_id` keys the legacy users table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub profile_id: Uuid,
}

impl AuthContext {
    pub fn new(user_id: Uuid, profile_id: Uuid) -> Self {
        Self {
            user_id,
            profile_id,
        }
    }
}
