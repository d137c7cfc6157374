//! Store Repository

use super::RepoResult;
use sqlx::PgPool;
use uuid::Uuid;

/// The company's oldest active store
pub async fn find_default(pool: &PgPool, company_id: Uuid) -> RepoResult<Option<Uuid>> {
    let store_id = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id FROM stores
        WHERE company_id = $1 AND is_active = TRUE
        ORDER BY created_at, id
        LIMIT 1
        "#,
    )
    .bind(company_id)
    .fetch_optional(pool)
    .await?;
    Ok(store_id)
}
