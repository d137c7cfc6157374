//! ZoneStore - data access seam of the zone service
//!
//! [`PgZoneStore`] talks to PostgreSQL through the repository functions;
//! [`crate::db::MemoryZoneStore`] backs tests and local tooling.

use async_trait::async_trait;
use shared::models::{
    AssignmentUpdate, DeliveryZone, NewAssignment, NewDeliveryZone, Product,
    ProductZoneAssignment, ZoneUpdate,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::repository::{self as repo, RepoResult};

/// Persistence operations needed by [`crate::ZoneAssignmentService`].
///
/// Every company-scoped call takes the resolved `company_id` and must never
/// return or touch rows of another company.
#[async_trait]
pub trait ZoneStore: Send + Sync {
    /// Company from the membership table
    async fn find_company_by_profile(&self, profile_id: Uuid) -> RepoResult<Option<Uuid>>;

    /// Company from the legacy users table
    async fn find_company_by_legacy_user(&self, user_id: Uuid) -> RepoResult<Option<Uuid>>;

    /// First active store of the company
    async fn find_default_store(&self, company_id: Uuid) -> RepoResult<Option<Uuid>>;

    async fn list_zones(&self, company_id: Uuid) -> RepoResult<Vec<DeliveryZone>>;

    async fn insert_zone(&self, zone: NewDeliveryZone) -> RepoResult<DeliveryZone>;

    async fn update_zone(
        &self,
        company_id: Uuid,
        zone_id: Uuid,
        update: &ZoneUpdate,
        updated_at: i64,
    ) -> RepoResult<DeliveryZone>;

    async fn delete_zone(&self, company_id: Uuid, zone_id: Uuid) -> RepoResult<()>;

    /// Assignments with product and zone embedded, in one round trip
    async fn list_assignments(&self, company_id: Uuid) -> RepoResult<Vec<ProductZoneAssignment>>;

    async fn assigned_product_ids(&self, company_id: Uuid, zone_id: Uuid)
    -> RepoResult<Vec<Uuid>>;

    async fn insert_assignments(
        &self,
        rows: Vec<NewAssignment>,
    ) -> RepoResult<Vec<ProductZoneAssignment>>;

    async fn update_assignment(
        &self,
        company_id: Uuid,
        assignment_id: Uuid,
        update: &AssignmentUpdate,
        updated_at: i64,
    ) -> RepoResult<ProductZoneAssignment>;

    async fn delete_assignment(&self, company_id: Uuid, assignment_id: Uuid) -> RepoResult<()>;

    async fn delete_assignments_for_zone(&self, company_id: Uuid, zone_id: Uuid)
    -> RepoResult<u64>;

    async fn list_products(&self, company_id: Uuid) -> RepoResult<Vec<Product>>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgZoneStore {
    pool: PgPool,
}

impl PgZoneStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ZoneStore for PgZoneStore {
    async fn find_company_by_profile(&self, profile_id: Uuid) -> RepoResult<Option<Uuid>> {
        repo::company::find_by_profile(&self.pool, profile_id).await
    }

    async fn find_company_by_legacy_user(&self, user_id: Uuid) -> RepoResult<Option<Uuid>> {
        repo::company::find_by_legacy_user(&self.pool, user_id).await
    }

    async fn find_default_store(&self, company_id: Uuid) -> RepoResult<Option<Uuid>> {
        repo::store::find_default(&self.pool, company_id).await
    }

    async fn list_zones(&self, company_id: Uuid) -> RepoResult<Vec<DeliveryZone>> {
        repo::zone::find_all(&self.pool, company_id).await
    }

    async fn insert_zone(&self, zone: NewDeliveryZone) -> RepoResult<DeliveryZone> {
        repo::zone::create(&self.pool, zone).await
    }

    async fn update_zone(
        &self,
        company_id: Uuid,
        zone_id: Uuid,
        update: &ZoneUpdate,
        updated_at: i64,
    ) -> RepoResult<DeliveryZone> {
        repo::zone::update(&self.pool, company_id, zone_id, update, updated_at).await
    }

    async fn delete_zone(&self, company_id: Uuid, zone_id: Uuid) -> RepoResult<()> {
        repo::zone::delete(&self.pool, company_id, zone_id).await
    }

    async fn list_assignments(&self, company_id: Uuid) -> RepoResult<Vec<ProductZoneAssignment>> {
        repo::assignment::find_all_joined(&self.pool, company_id).await
    }

    async fn assigned_product_ids(
        &self,
        company_id: Uuid,
        zone_id: Uuid,
    ) -> RepoResult<Vec<Uuid>> {
        repo::assignment::find_product_ids_in_zone(&self.pool, company_id, zone_id).await
    }

    async fn insert_assignments(
        &self,
        rows: Vec<NewAssignment>,
    ) -> RepoResult<Vec<ProductZoneAssignment>> {
        repo::assignment::create_many(&self.pool, &rows).await
    }

    async fn update_assignment(
        &self,
        company_id: Uuid,
        assignment_id: Uuid,
        update: &AssignmentUpdate,
        updated_at: i64,
    ) -> RepoResult<ProductZoneAssignment> {
        repo::assignment::update(&self.pool, company_id, assignment_id, update, updated_at).await
    }

    async fn delete_assignment(&self, company_id: Uuid, assignment_id: Uuid) -> RepoResult<()> {
        repo::assignment::delete(&self.pool, company_id, assignment_id).await
    }

    async fn delete_assignments_for_zone(
        &self,
        company_id: Uuid,
        zone_id: Uuid,
    ) -> RepoResult<u64> {
        repo::assignment::delete_by_zone(&self.pool, company_id, zone_id).await
    }

    async fn list_products(&self, company_id: Uuid) -> RepoResult<Vec<Product>> {
        repo::product::find_by_company(&self.pool, company_id).await
    }
}
