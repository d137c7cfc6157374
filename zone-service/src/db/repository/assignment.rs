//! Product Zone Assignment Repository

use super::{RepoError, RepoResult};
use rust_decimal::Decimal;
use shared::models::{
    AssignmentUpdate, NewAssignment, Product, ProductZoneAssignment, ZoneSummary, ZoneType,
};
use sqlx::PgPool;
use uuid::Uuid;

/// Flat row of the assignment ⋈ product ⋈ zone query
#[derive(Debug, sqlx::FromRow)]
struct AssignmentJoinRow {
    #[sqlx(flatten)]
    assignment: ProductZoneAssignment,
    p_id: Option<Uuid>,
    p_company_id: Option<Uuid>,
    p_name: Option<String>,
    p_sku: Option<String>,
    p_base_price: Option<Decimal>,
    p_b2b_price: Option<Decimal>,
    p_b2c_price: Option<Decimal>,
    p_category: Option<String>,
    p_status: Option<String>,
    z_id: Option<Uuid>,
    z_name: Option<String>,
    z_zone_type: Option<ZoneType>,
    z_delivery_fee: Option<Decimal>,
}

impl From<AssignmentJoinRow> for ProductZoneAssignment {
    fn from(row: AssignmentJoinRow) -> Self {
        let product = match (row.p_id, row.p_company_id, row.p_name, row.p_base_price) {
            (Some(id), Some(company_id), Some(name), Some(base_price)) => Some(Product {
                id,
                company_id,
                name,
                sku: row.p_sku,
                base_price,
                b2b_price: row.p_b2b_price,
                b2c_price: row.p_b2c_price,
                category: row.p_category,
                status: row.p_status.unwrap_or_default(),
            }),
            _ => None,
        };
        let zone = match (row.z_id, row.z_name, row.z_zone_type, row.z_delivery_fee) {
            (Some(id), Some(name), Some(zone_type), Some(delivery_fee)) => Some(ZoneSummary {
                id,
                name,
                zone_type,
                delivery_fee,
            }),
            _ => None,
        };
        ProductZoneAssignment {
            product,
            zone,
            ..row.assignment
        }
    }
}

/// All assignments of a company with product and zone embedded, newest first.
pub async fn find_all_joined(
    pool: &PgPool,
    company_id: Uuid,
) -> RepoResult<Vec<ProductZoneAssignment>> {
    let rows = sqlx::query_as::<_, AssignmentJoinRow>(
        r#"
        SELECT a.id, a.product_id, a.zone_id, a.company_id, a.store_id,
               a.override_base_price, a.override_b2b_price, a.override_b2c_price,
               a.override_min_order_quantity, a.is_active, a.priority,
               a.created_at, a.updated_at,
               p.id AS p_id, p.company_id AS p_company_id, p.name AS p_name, p.sku AS p_sku,
               p.base_price AS p_base_price, p.b2b_price AS p_b2b_price,
               p.b2c_price AS p_b2c_price, p.category AS p_category, p.status AS p_status,
               z.id AS z_id, z.name AS z_name, z.zone_type AS z_zone_type,
               z.delivery_fee AS z_delivery_fee
        FROM product_zone_assignments a
        LEFT JOIN products p ON p.id = a.product_id AND p.company_id = a.company_id
        LEFT JOIN delivery_zones z ON z.id = a.zone_id AND z.company_id = a.company_id
        WHERE a.company_id = $1
        ORDER BY a.created_at DESC, a.priority DESC, a.id
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(ProductZoneAssignment::from).collect())
}

/// Product ids already assigned to a zone
pub async fn find_product_ids_in_zone(
    pool: &PgPool,
    company_id: Uuid,
    zone_id: Uuid,
) -> RepoResult<Vec<Uuid>> {
    let ids = sqlx::query_scalar::<_, Uuid>(
        "SELECT product_id FROM product_zone_assignments WHERE company_id = $1 AND zone_id = $2",
    )
    .bind(company_id)
    .bind(zone_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Bulk insert in one statement
pub async fn create_many(
    pool: &PgPool,
    rows: &[NewAssignment],
) -> RepoResult<Vec<ProductZoneAssignment>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<Uuid> = rows.iter().map(|_| Uuid::new_v4()).collect();
    let product_ids: Vec<Uuid> = rows.iter().map(|r| r.product_id).collect();
    let zone_ids: Vec<Uuid> = rows.iter().map(|r| r.zone_id).collect();
    let company_ids: Vec<Uuid> = rows.iter().map(|r| r.company_id).collect();
    let store_ids: Vec<Uuid> = rows.iter().map(|r| r.store_id).collect();
    let base_prices: Vec<Option<Decimal>> =
        rows.iter().map(|r| r.overrides.override_base_price).collect();
    let b2b_prices: Vec<Option<Decimal>> =
        rows.iter().map(|r| r.overrides.override_b2b_price).collect();
    let b2c_prices: Vec<Option<Decimal>> =
        rows.iter().map(|r| r.overrides.override_b2c_price).collect();
    let min_quantities: Vec<Option<i32>> = rows
        .iter()
        .map(|r| r.overrides.override_min_order_quantity)
        .collect();
    let is_actives: Vec<bool> = rows.iter().map(|r| r.is_active).collect();
    let priorities: Vec<i32> = rows.iter().map(|r| r.priority).collect();
    let timestamps: Vec<i64> = rows.iter().map(|r| r.created_at).collect();

    let created = sqlx::query_as::<_, ProductZoneAssignment>(
        r#"
        INSERT INTO product_zone_assignments (
            id, product_id, zone_id, company_id, store_id,
            override_base_price, override_b2b_price, override_b2c_price,
            override_min_order_quantity, is_active, priority, created_at, updated_at
        )
        SELECT *, t.created_at FROM UNNEST($1::uuid[], $2::uuid[], $3::uuid[], $4::uuid[], $5::uuid[], $6::numeric[], $7::numeric[], $8::numeric[], $9::integer[], $10::boolean[], $11::integer[], $12::bigint[])
            AS t(id, product_id, zone_id, company_id, store_id, override_base_price, override_b2b_price, override_b2c_price, override_min_order_quantity, is_active, priority, created_at)
        RETURNING id, product_id, zone_id, company_id, store_id,
                  override_base_price, override_b2b_price, override_b2c_price,
                  override_min_order_quantity, is_active, priority, created_at, updated_at
        "#,
    )
    .bind(&ids)
    .bind(&product_ids)
    .bind(&zone_ids)
    .bind(&company_ids)
    .bind(&store_ids)
    .bind(&base_prices)
    .bind(&b2b_prices)
    .bind(&b2c_prices)
    .bind(&min_quantities)
    .bind(&is_actives)
    .bind(&priorities)
    .bind(&timestamps)
    .fetch_all(pool)
    .await?;
    Ok(created)
}

/// Partial update of the writable columns.
///
/// Each override is paired with a "touched" flag so `NULL` can clear a value
/// while untouched columns keep theirs.
pub async fn update(
    pool: &PgPool,
    company_id: Uuid,
    id: Uuid,
    data: &AssignmentUpdate,
    updated_at: i64,
) -> RepoResult<ProductZoneAssignment> {
    let assignment = sqlx::query_as::<_, ProductZoneAssignment>(
        r#"
        UPDATE product_zone_assignments SET
            override_base_price = CASE WHEN $1 THEN $2 ELSE override_base_price END,
            override_b2b_price = CASE WHEN $3 THEN $4 ELSE override_b2b_price END,
            override_b2c_price = CASE WHEN $5 THEN $6 ELSE override_b2c_price END,
            override_min_order_quantity = CASE WHEN $7 THEN $8 ELSE override_min_order_quantity END,
            is_active = COALESCE($9, is_active),
            priority = COALESCE($10, priority),
            updated_at = $11
        WHERE company_id = $12 AND id = $13
        RETURNING id, product_id, zone_id, company_id, store_id,
                  override_base_price, override_b2b_price, override_b2c_price,
                  override_min_order_quantity, is_active, priority, created_at, updated_at
        "#,
    )
    .bind(data.override_base_price.is_some())
    .bind(data.override_base_price.flatten())
    .bind(data.override_b2b_price.is_some())
    .bind(data.override_b2b_price.flatten())
    .bind(data.override_b2c_price.is_some())
    .bind(data.override_b2c_price.flatten())
    .bind(data.override_min_order_quantity.is_some())
    .bind(data.override_min_order_quantity.flatten())
    .bind(data.is_active)
    .bind(data.priority)
    .bind(updated_at)
    .bind(company_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    assignment.ok_or_else(|| RepoError::NotFound(format!("Assignment {id} not found")))
}

pub async fn delete(pool: &PgPool, company_id: Uuid, id: Uuid) -> RepoResult<()> {
    let rows =
        sqlx::query("DELETE FROM product_zone_assignments WHERE company_id = $1 AND id = $2")
            .bind(company_id)
            .bind(id)
            .execute(pool)
            .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Assignment {id} not found")));
    }
    Ok(())
}

/// Remove every assignment of a zone; returns the number of rows removed
pub async fn delete_by_zone(pool: &PgPool, company_id: Uuid, zone_id: Uuid) -> RepoResult<u64> {
    let rows = sqlx::query(
        "DELETE FROM product_zone_assignments WHERE company_id = $1 AND zone_id = $2",
    )
    .bind(company_id)
    .bind(zone_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}
