//! Zone Repository

use super::{RepoError, RepoResult};
use shared::models::{DeliveryZone, NewDeliveryZone, ZoneUpdate};
use sqlx::PgPool;
use uuid::Uuid;

pub async fn find_all(pool: &PgPool, company_id: Uuid) -> RepoResult<Vec<DeliveryZone>> {
    let zones = sqlx::query_as::<_, DeliveryZone>(
        r#"
        SELECT id, company_id, store_id, name, zone_type, delivery_fee,
               default_b2b_price, default_b2c_price, discount_percentage, is_active,
               coverage_areas, description, created_at, updated_at
        FROM delivery_zones
        WHERE company_id = $1
        ORDER BY created_at DESC, id
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?;
    Ok(zones)
}

pub async fn create(pool: &PgPool, data: NewDeliveryZone) -> RepoResult<DeliveryZone> {
    let form = data.form;
    let zone = sqlx::query_as::<_, DeliveryZone>(
        r#"
        INSERT INTO delivery_zones (
            id, company_id, store_id, name, zone_type, delivery_fee,
            default_b2b_price, default_b2c_price, discount_percentage, is_active,
            coverage_areas, description, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
        RETURNING id, company_id, store_id, name, zone_type, delivery_fee,
                  default_b2b_price, default_b2c_price, discount_percentage, is_active,
                  coverage_areas, description, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(data.company_id)
    .bind(data.store_id)
    .bind(&form.name)
    .bind(form.zone_type)
    .bind(form.delivery_fee)
    .bind(form.default_b2b_price)
    .bind(form.default_b2c_price)
    .bind(form.discount_percentage)
    .bind(form.is_active)
    .bind(&form.coverage_areas)
    .bind(&form.description)
    .bind(data.created_at)
    .fetch_one(pool)
    .await?;
    Ok(zone)
}

/// Partial update; the nullable columns take a "touched" flag so `NULL`
/// clears them.
pub async fn update(
    pool: &PgPool,
    company_id: Uuid,
    id: Uuid,
    data: &ZoneUpdate,
    updated_at: i64,
) -> RepoResult<DeliveryZone> {
    let zone = sqlx::query_as::<_, DeliveryZone>(
        r#"
        UPDATE delivery_zones SET
            name = COALESCE($1, name),
            zone_type = COALESCE($2, zone_type),
            delivery_fee = COALESCE($3, delivery_fee),
            default_b2b_price = CASE WHEN $4 THEN $5 ELSE default_b2b_price END,
            default_b2c_price = CASE WHEN $6 THEN $7 ELSE default_b2c_price END,
            discount_percentage = CASE WHEN $8 THEN $9 ELSE discount_percentage END,
            is_active = COALESCE($10, is_active),
            coverage_areas = COALESCE($11, coverage_areas),
            description = CASE WHEN $12 THEN $13 ELSE description END,
            store_id = COALESCE($14, store_id),
            updated_at = $15
        WHERE company_id = $16 AND id = $17
        RETURNING id, company_id, store_id, name, zone_type, delivery_fee,
                  default_b2b_price, default_b2c_price, discount_percentage, is_active,
                  coverage_areas, description, created_at, updated_at
        "#,
    )
    .bind(&data.name)
    .bind(data.zone_type)
    .bind(data.delivery_fee)
    .bind(data.default_b2b_price.is_some())
    .bind(data.default_b2b_price.flatten())
    .bind(data.default_b2c_price.is_some())
    .bind(data.default_b2c_price.flatten())
    .bind(data.discount_percentage.is_some())
    .bind(data.discount_percentage.flatten())
    .bind(data.is_active)
    .bind(&data.coverage_areas)
    .bind(data.description.is_some())
    .bind(data.description.clone().flatten())
    .bind(data.store_id)
    .bind(updated_at)
    .bind(company_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;
    zone.ok_or_else(|| RepoError::NotFound(format!("Zone {id} not found")))
}

pub async fn delete(pool: &PgPool, company_id: Uuid, id: Uuid) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM delivery_zones WHERE company_id = $1 AND id = $2")
        .bind(company_id)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Zone {id} not found")));
    }
    Ok(())
}
