//! In-memory ZoneStore
//!
//! Mirrors the PostgreSQL schema closely enough for service tests: company
//! scoping on every call, the assignment → zone foreign key, and the joined
//! assignment read. Failures can be injected to exercise error paths.

use async_trait::async_trait;
use parking_lot::RwLock;
use shared::models::{
    AssignmentUpdate, DeliveryZone, NewAssignment, NewDeliveryZone, Product,
    ProductZoneAssignment, Store, ZoneSummary, ZoneUpdate,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::repository::{RepoError, RepoResult};
use super::zone_store::ZoneStore;

#[derive(Default)]
struct Inner {
    members: HashMap<Uuid, Uuid>,
    legacy_users: HashMap<Uuid, Uuid>,
    stores: Vec<Store>,
    products: Vec<Product>,
    zones: Vec<DeliveryZone>,
    assignments: Vec<ProductZoneAssignment>,
    /// Mutating calls in order, e.g. `delete_assignments_for_zone`
    operations: Vec<&'static str>,
    last_assignment_update: Option<AssignmentUpdate>,
    assignment_query_failure: Option<String>,
    write_failure: Option<String>,
}

impl Inner {
    fn check_write(&mut self, operation: &'static str) -> RepoResult<()> {
        if let Some(msg) = &self.write_failure {
            return Err(RepoError::Database(msg.clone()));
        }
        self.operations.push(operation);
        Ok(())
    }
}

/// Thread-safe in-memory store
#[derive(Default)]
pub struct MemoryZoneStore {
    inner: RwLock<Inner>,
}

impl MemoryZoneStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Seeding ──

    /// Register a membership row (`profile_id` → company)
    pub fn seed_member(&self, profile_id: Uuid, company_id: Uuid) {
        self.inner.write().members.insert(profile_id, company_id);
    }

    /// Register a legacy users row (`user_id` → company)
    pub fn seed_legacy_user(&self, user_id: Uuid, company_id: Uuid) {
        self.inner.write().legacy_users.insert(user_id, company_id);
    }

    /// Add a store; later seeds sort after earlier ones
    pub fn seed_store(&self, company_id: Uuid, name: &str, is_active: bool) -> Store {
        let mut inner = self.inner.write();
        let store = Store {
            id: Uuid::new_v4(),
            company_id,
            name: name.to_string(),
            is_active,
            created_at: inner.stores.len() as i64 + 1,
        };
        inner.stores.push(store.clone());
        store
    }

    pub fn seed_product(&self, product: Product) {
        self.inner.write().products.push(product);
    }

    // ── Failure injection ──

    /// Make the joined assignment read fail as if an RLS policy rejected it
    pub fn fail_assignment_query(&self, message: impl Into<String>) {
        self.inner.write().assignment_query_failure = Some(message.into());
    }

    /// Make every write fail with a database error
    pub fn fail_writes(&self, message: impl Into<String>) {
        self.inner.write().write_failure = Some(message.into());
    }

    pub fn clear_failures(&self) {
        let mut inner = self.inner.write();
        inner.assignment_query_failure = None;
        inner.write_failure = None;
    }

    // ── Inspection ──

    /// Every zone row regardless of company
    pub fn all_zones(&self) -> Vec<DeliveryZone> {
        self.inner.read().zones.clone()
    }

    /// Every assignment row regardless of company (without joins)
    pub fn all_assignments(&self) -> Vec<ProductZoneAssignment> {
        self.inner.read().assignments.clone()
    }

    /// Mutating operations performed so far
    pub fn operations(&self) -> Vec<&'static str> {
        self.inner.read().operations.clone()
    }

    /// The patch received by the most recent assignment update
    pub fn last_assignment_update(&self) -> Option<AssignmentUpdate> {
        self.inner.read().last_assignment_update.clone()
    }
}

#[async_trait]
impl ZoneStore for MemoryZoneStore {
    async fn find_company_by_profile(&self, profile_id: Uuid) -> RepoResult<Option<Uuid>> {
        Ok(self.inner.read().members.get(&profile_id).copied())
    }

    async fn find_company_by_legacy_user(&self, user_id: Uuid) -> RepoResult<Option<Uuid>> {
        Ok(self.inner.read().legacy_users.get(&user_id).copied())
    }

    async fn find_default_store(&self, company_id: Uuid) -> RepoResult<Option<Uuid>> {
        let inner = self.inner.read();
        let store = inner
            .stores
            .iter()
            .filter(|s| s.company_id == company_id && s.is_active)
            .min_by_key(|s| s.created_at);
        Ok(store.map(|s| s.id))
    }

    async fn list_zones(&self, company_id: Uuid) -> RepoResult<Vec<DeliveryZone>> {
        let inner = self.inner.read();
        let mut zones: Vec<DeliveryZone> = inner
            .zones
            .iter()
            .rev()
            .filter(|z| z.company_id == company_id)
            .cloned()
            .collect();
        zones.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(zones)
    }

    async fn insert_zone(&self, zone: NewDeliveryZone) -> RepoResult<DeliveryZone> {
        let mut inner = self.inner.write();
        inner.check_write("insert_zone")?;
        let form = zone.form;
        let row = DeliveryZone {
            id: Uuid::new_v4(),
            company_id: zone.company_id,
            store_id: zone.store_id,
            name: form.name,
            zone_type: form.zone_type,
            delivery_fee: form.delivery_fee,
            default_b2b_price: form.default_b2b_price,
            default_b2c_price: form.default_b2c_price,
            discount_percentage: form.discount_percentage,
            is_active: form.is_active,
            coverage_areas: form.coverage_areas,
            description: form.description,
            created_at: zone.created_at,
            updated_at: zone.created_at,
        };
        inner.zones.push(row.clone());
        Ok(row)
    }

    async fn update_zone(
        &self,
        company_id: Uuid,
        zone_id: Uuid,
        update: &ZoneUpdate,
        updated_at: i64,
    ) -> RepoResult<DeliveryZone> {
        let mut inner = self.inner.write();
        inner.check_write("update_zone")?;
        let zone = inner
            .zones
            .iter_mut()
            .find(|z| z.company_id == company_id && z.id == zone_id)
            .ok_or_else(|| RepoError::NotFound(format!("Zone {zone_id} not found")))?;

        if let Some(v) = &update.name {
            zone.name = v.clone();
        }
        if let Some(v) = update.zone_type {
            zone.zone_type = v;
        }
        if let Some(v) = update.delivery_fee {
            zone.delivery_fee = v;
        }
        if let Some(v) = update.default_b2b_price {
            zone.default_b2b_price = v;
        }
        if let Some(v) = update.default_b2c_price {
            zone.default_b2c_price = v;
        }
        if let Some(v) = update.discount_percentage {
            zone.discount_percentage = v;
        }
        if let Some(v) = update.is_active {
            zone.is_active = v;
        }
        if let Some(v) = &update.coverage_areas {
            zone.coverage_areas = v.clone();
        }
        if let Some(v) = &update.description {
            zone.description = v.clone();
        }
        if let Some(v) = update.store_id {
            zone.store_id = v;
        }
        zone.updated_at = updated_at;
        Ok(zone.clone())
    }

    async fn delete_zone(&self, company_id: Uuid, zone_id: Uuid) -> RepoResult<()> {
        let mut inner = self.inner.write();
        inner.check_write("delete_zone")?;
        if inner.assignments.iter().any(|a| a.zone_id == zone_id) {
            return Err(RepoError::Database(
                "update or delete on table \"delivery_zones\" violates foreign key constraint"
                    .into(),
            ));
        }
        let before = inner.zones.len();
        inner
            .zones
            .retain(|z| !(z.company_id == company_id && z.id == zone_id));
        if inner.zones.len() == before {
            return Err(RepoError::NotFound(format!("Zone {zone_id} not found")));
        }
        Ok(())
    }

    async fn list_assignments(&self, company_id: Uuid) -> RepoResult<Vec<ProductZoneAssignment>> {
        let inner = self.inner.read();
        if let Some(msg) = &inner.assignment_query_failure {
            return Err(RepoError::PermissionDenied(msg.clone()));
        }
        let mut rows: Vec<ProductZoneAssignment> = inner
            .assignments
            .iter()
            .rev()
            .filter(|a| a.company_id == company_id)
            .map(|a| {
                let mut row = a.clone();
                row.product = inner
                    .products
                    .iter()
                    .find(|p| p.id == a.product_id && p.company_id == company_id)
                    .cloned();
                row.zone = inner
                    .zones
                    .iter()
                    .find(|z| z.id == a.zone_id && z.company_id == company_id)
                    .map(|z| ZoneSummary {
                        id: z.id,
                        name: z.name.clone(),
                        zone_type: z.zone_type,
                        delivery_fee: z.delivery_fee,
                    });
                row
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn assigned_product_ids(
        &self,
        company_id: Uuid,
        zone_id: Uuid,
    ) -> RepoResult<Vec<Uuid>> {
        let inner = self.inner.read();
        Ok(inner
            .assignments
            .iter()
            .filter(|a| a.company_id == company_id && a.zone_id == zone_id)
            .map(|a| a.product_id)
            .collect())
    }

    async fn insert_assignments(
        &self,
        rows: Vec<NewAssignment>,
    ) -> RepoResult<Vec<ProductZoneAssignment>> {
        let mut inner = self.inner.write();
        inner.check_write("insert_assignments")?;
        let created: Vec<ProductZoneAssignment> = rows
            .into_iter()
            .map(|r| ProductZoneAssignment {
                id: Uuid::new_v4(),
                product_id: r.product_id,
                zone_id: r.zone_id,
                company_id: r.company_id,
                store_id: r.store_id,
                override_base_price: r.overrides.override_base_price,
                override_b2b_price: r.overrides.override_b2b_price,
                override_b2c_price: r.overrides.override_b2c_price,
                override_min_order_quantity: r.overrides.override_min_order_quantity,
                is_active: r.is_active,
                priority: r.priority,
                created_at: r.created_at,
                updated_at: r.created_at,
                product: None,
                zone: None,
            })
            .collect();
        inner.assignments.extend(created.iter().cloned());
        Ok(created)
    }

    async fn update_assignment(
        &self,
        company_id: Uuid,
        assignment_id: Uuid,
        update: &AssignmentUpdate,
        updated_at: i64,
    ) -> RepoResult<ProductZoneAssignment> {
        let mut inner = self.inner.write();
        inner.check_write("update_assignment")?;
        inner.last_assignment_update = Some(update.clone());
        let row = inner
            .assignments
            .iter_mut()
            .find(|a| a.company_id == company_id && a.id == assignment_id)
            .ok_or_else(|| RepoError::NotFound(format!("Assignment {assignment_id} not found")))?;
        update.apply_to(row, updated_at);
        Ok(row.clone())
    }

    async fn delete_assignment(&self, company_id: Uuid, assignment_id: Uuid) -> RepoResult<()> {
        let mut inner = self.inner.write();
        inner.check_write("delete_assignment")?;
        let before = inner.assignments.len();
        inner
            .assignments
            .retain(|a| !(a.company_id == company_id && a.id == assignment_id));
        if inner.assignments.len() == before {
            return Err(RepoError::NotFound(format!(
                "Assignment {assignment_id} not found"
            )));
        }
        Ok(())
    }

    async fn delete_assignments_for_zone(
        &self,
        company_id: Uuid,
        zone_id: Uuid,
    ) -> RepoResult<u64> {
        let mut inner = self.inner.write();
        inner.check_write("delete_assignments_for_zone")?;
        let before = inner.assignments.len();
        inner
            .assignments
            .retain(|a| !(a.company_id == company_id && a.zone_id == zone_id));
        Ok((before - inner.assignments.len()) as u64)
    }

    async fn list_products(&self, company_id: Uuid) -> RepoResult<Vec<Product>> {
        let inner = self.inner.read();
        let mut products: Vec<Product> = inner
            .products
            .iter()
            .filter(|p| p.company_id == company_id)
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_store_is_oldest_active() {
        let store = MemoryZoneStore::new();
        let company = Uuid::new_v4();
        store.seed_store(company, "Closed depot", false);
        let first = store.seed_store(company, "Main depot", true);
        store.seed_store(company, "Second depot", true);

        let found = store.find_default_store(company).await.unwrap();
        assert_eq!(found, Some(first.id));
        assert_eq!(store.find_default_store(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_zone_with_assignments_violates_fk() {
        let store = MemoryZoneStore::new();
        let company = Uuid::new_v4();
        let zone_id = Uuid::new_v4();
        store
            .insert_assignments(vec![NewAssignment {
                product_id: Uuid::new_v4(),
                zone_id,
                company_id: company,
                store_id: Uuid::new_v4(),
                overrides: Default::default(),
                is_active: true,
                priority: 0,
                created_at: 1,
            }])
            .await
            .unwrap();

        let err = store.delete_zone(company, zone_id).await.unwrap_err();
        assert!(matches!(err, RepoError::Database(_)));
    }

    #[tokio::test]
    async fn test_write_failure_injection() {
        let store = MemoryZoneStore::new();
        store.fail_writes("connection reset");
        let err = store
            .delete_assignment(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Database(msg) if msg == "connection reset"));
        assert!(store.operations().is_empty());

        store.clear_failures();
        let err = store
            .delete_assignment(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
