//! Product Repository (read-only)

use super::RepoResult;
use shared::models::Product;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn find_by_company(pool: &PgPool, company_id: Uuid) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, company_id, name, sku, base_price, b2b_price, b2c_price, category, status
        FROM products
        WHERE company_id = $1
        ORDER BY name, id
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?;
    Ok(products)
}
