//! Company Repository
//!
//! Resolves the caller's company: membership table first, legacy users table second.

use super::RepoResult;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn find_by_profile(pool: &PgPool, profile_id: Uuid) -> RepoResult<Option<Uuid>> {
    let company_id = sqlx::query_scalar::<_, Uuid>(
        "SELECT company_id FROM company_members WHERE profile_id = $1 LIMIT 1",
    )
    .bind(profile_id)
    .fetch_optional(pool)
    .await?;
    Ok(company_id)
}

pub async fn find_by_legacy_user(pool: &PgPool, user_id: Uuid) -> RepoResult<Option<Uuid>> {
    let company_id = sqlx::query_scalar::<_, Uuid>(
        "SELECT company_id FROM company_users WHERE user_id = $1 AND company_id IS NOT NULL LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(company_id)
}
