//! Zone Assignment Service
//!
//! Delivery zones and product ↔ zone price overrides for one authenticated
//! user. Each instance owns its cached lists; construct one per session.
//!
//! Public methods never return `Err`: failures are logged, stored in
//! [`ZoneAssignmentService::error`] and reported as `None` / `false` / an
//! empty list. The `try_*` helpers carry the actual logic with `?`.

use rust_decimal::Decimal;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    AssignmentForm, AssignmentUpdate, AuthContext, DeliveryZone, NewAssignment, NewDeliveryZone,
    PriceType, Product, ProductZoneAssignment, ZoneForm, ZoneStats, ZoneUpdate,
};
use shared::util::{normalize_string_set, now_millis};
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use super::zone_stats::compute_zone_stats;
use crate::db::{RepoError, ZoneStore};
use crate::utils::validation::{
    validate_assignment_update, validate_overrides, validate_zone_form, validate_zone_update,
};

pub struct ZoneAssignmentService {
    store: Arc<dyn ZoneStore>,
    auth: AuthContext,
    zones: Vec<DeliveryZone>,
    assignments: Vec<ProductZoneAssignment>,
    loading: bool,
    error: Option<AppError>,
}

impl ZoneAssignmentService {
    pub fn new(store: Arc<dyn ZoneStore>, auth: AuthContext) -> Self {
        Self {
            store,
            auth,
            zones: Vec::new(),
            assignments: Vec::new(),
            loading: false,
            error: None,
        }
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    /// Cached zones, newest first
    pub fn zones(&self) -> &[DeliveryZone] {
        &self.zones
    }

    /// Cached assignments with embedded product/zone
    pub fn assignments(&self) -> &[ProductZoneAssignment] {
        &self.assignments
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failure, for display
    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    /// Structured last failure
    pub fn last_error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn record_error(&mut self, operation: &'static str, err: AppError) {
        tracing::error!(
            operation,
            code = %err.code,
            error = %err.message,
            "Zone service operation failed"
        );
        self.error = Some(err);
    }

    // =========================================================================
    // Company
    // =========================================================================

    /// Company of the authenticated user: membership first, legacy users second
    pub async fn resolve_company_id(&mut self) -> Option<Uuid> {
        match self.lookup_company_id().await {
            Ok(company_id) => company_id,
            Err(e) => {
                self.record_error("resolve_company_id", e);
                None
            }
        }
    }

    async fn lookup_company_id(&self) -> AppResult<Option<Uuid>> {
        if let Some(company_id) = self
            .store
            .find_company_by_profile(self.auth.profile_id)
            .await?
        {
            return Ok(Some(company_id));
        }
        let company_id = self
            .store
            .find_company_by_legacy_user(self.auth.user_id)
            .await?;
        if company_id.is_some() {
            tracing::debug!(user_id = %self.auth.user_id, "Company resolved from legacy users table");
        }
        Ok(company_id)
    }

    async fn company_id(&self) -> AppResult<Uuid> {
        self.lookup_company_id()
            .await?
            .ok_or_else(AppError::company_not_found)
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetch zones and assignments concurrently into the caches.
    ///
    /// Each fetch feeds its own list: a failed assignment query still leaves
    /// the zones cached.
    pub async fn load(&mut self) -> bool {
        self.loading = true;
        self.error = None;
        let result = self.try_load().await;
        self.loading = false;
        let (zones, assignments) = match result {
            Ok(fetched) => fetched,
            Err(e) => {
                self.record_error("load", e);
                return false;
            }
        };

        let mut loaded = true;
        match zones {
            Ok(zones) => self.zones = zones,
            Err(e) => {
                self.record_error("load", e);
                loaded = false;
            }
        }
        match assignments {
            Ok(assignments) => self.assignments = assignments,
            Err(e) => {
                self.record_error("load", e);
                loaded = false;
            }
        }
        if loaded {
            tracing::info!(
                zones = self.zones.len(),
                assignments = self.assignments.len(),
                "Zone data loaded"
            );
        }
        loaded
    }

    async fn try_load(
        &self,
    ) -> AppResult<(
        AppResult<Vec<DeliveryZone>>,
        AppResult<Vec<ProductZoneAssignment>>,
    )> {
        let company_id = self.company_id().await?;
        Ok(tokio::join!(
            self.fetch_zones(company_id),
            self.fetch_assignments(company_id)
        ))
    }

    /// All zones of the company, newest first; refreshes the cache
    pub async fn list_zones(&mut self) -> Vec<DeliveryZone> {
        self.loading = true;
        self.error = None;
        let result = match self.company_id().await {
            Ok(company_id) => self.fetch_zones(company_id).await,
            Err(e) => Err(e),
        };
        self.loading = false;
        match result {
            Ok(zones) => {
                self.zones = zones.clone();
                zones
            }
            Err(e) => {
                self.record_error("list_zones", e);
                Vec::new()
            }
        }
    }

    async fn fetch_zones(&self, company_id: Uuid) -> AppResult<Vec<DeliveryZone>> {
        Ok(self.store.list_zones(company_id).await?)
    }

    /// All assignments of the company with product and zone embedded; refreshes the cache
    pub async fn list_assignments(&mut self) -> Vec<ProductZoneAssignment> {
        self.loading = true;
        self.error = None;
        let result = match self.company_id().await {
            Ok(company_id) => self.fetch_assignments(company_id).await,
            Err(e) => Err(e),
        };
        self.loading = false;
        match result {
            Ok(assignments) => {
                self.assignments = assignments.clone();
                assignments
            }
            Err(e) => {
                self.record_error("list_assignments", e);
                Vec::new()
            }
        }
    }

    async fn fetch_assignments(&self, company_id: Uuid) -> AppResult<Vec<ProductZoneAssignment>> {
        self.store
            .list_assignments(company_id)
            .await
            .map_err(|e| match e {
                e if e.is_configuration() => AppError::with_message(
                    ErrorCode::AssignmentQueryFailed,
                    format!(
                        "Assignment query rejected; check grants and row-level security on \
                         product_zone_assignments, products and delivery_zones ({e})"
                    ),
                )
                .with_detail("company_id", company_id.to_string()),
                other => other.into(),
            })
    }

    // =========================================================================
    // Zones
    // =========================================================================

    pub fn get_zone(&self, zone_id: Uuid) -> Option<&DeliveryZone> {
        self.zones.iter().find(|z| z.id == zone_id)
    }

    /// Create a zone; without `store_id` it attaches to the company's first active store
    pub async fn create_zone(&mut self, form: ZoneForm) -> Option<DeliveryZone> {
        self.error = None;
        match self.try_create_zone(form).await {
            Ok(zone) => {
                tracing::info!(zone_id = %zone.id, name = %zone.name, "Delivery zone created");
                self.list_zones().await;
                Some(zone)
            }
            Err(e) => {
                self.record_error("create_zone", e);
                None
            }
        }
    }

    async fn try_create_zone(&self, mut form: ZoneForm) -> AppResult<DeliveryZone> {
        form.name = form.name.trim().to_string();
        form.coverage_areas = normalize_string_set(&form.coverage_areas);
        validate_zone_form(&form)?;

        let company_id = self.company_id().await?;
        let store_id = match form.store_id {
            Some(store_id) => store_id,
            None => self
                .store
                .find_default_store(company_id)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::StoreNotFound))?,
        };

        let zone = self
            .store
            .insert_zone(NewDeliveryZone {
                company_id,
                store_id,
                form,
                created_at: now_millis(),
            })
            .await?;
        Ok(zone)
    }

    /// Write the supplied fields only, plus `updated_at`
    pub async fn update_zone(&mut self, zone_id: Uuid, update: ZoneUpdate) -> Option<DeliveryZone> {
        self.error = None;
        match self.try_update_zone(zone_id, update).await {
            Ok(zone) => {
                tracing::info!(zone_id = %zone.id, "Delivery zone updated");
                self.list_zones().await;
                Some(zone)
            }
            Err(e) => {
                self.record_error("update_zone", e);
                None
            }
        }
    }

    async fn try_update_zone(&self, zone_id: Uuid, mut update: ZoneUpdate) -> AppResult<DeliveryZone> {
        if let Some(name) = update.name.as_mut() {
            *name = name.trim().to_string();
        }
        if let Some(areas) = update.coverage_areas.take() {
            update.coverage_areas = Some(normalize_string_set(&areas));
        }
        validate_zone_update(&update)?;

        let company_id = self.company_id().await?;
        self.store
            .update_zone(company_id, zone_id, &update, now_millis())
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => AppError::zone_not_found(zone_id),
                other => other.into(),
            })
    }

    /// Delete the zone's assignments, then the zone.
    ///
    /// The two deletes are separate statements; if the second fails the zone
    /// remains without assignments.
    pub async fn delete_zone(&mut self, zone_id: Uuid) -> bool {
        self.error = None;
        let result = self.try_delete_zone(zone_id).await;
        match result {
            Ok(removed) => {
                tracing::info!(zone_id = %zone_id, assignments_removed = removed, "Delivery zone deleted");
                self.list_zones().await;
                self.list_assignments().await;
                true
            }
            Err(e) => {
                self.record_error("delete_zone", e);
                false
            }
        }
    }

    async fn try_delete_zone(&self, zone_id: Uuid) -> AppResult<u64> {
        let company_id = self.company_id().await?;
        let removed = self
            .store
            .delete_assignments_for_zone(company_id, zone_id)
            .await?;
        self.store
            .delete_zone(company_id, zone_id)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => AppError::zone_not_found(zone_id),
                other => other.into(),
            })?;
        Ok(removed)
    }

    // =========================================================================
    // Assignments
    // =========================================================================

    /// Assign products to a cached zone, skipping products already in it.
    ///
    /// Not idempotent: every call diffs against the current rows.
    pub async fn assign_products_to_zone(&mut self, form: AssignmentForm) -> bool {
        self.error = None;
        match self.try_assign_products(form).await {
            Ok((zone_id, inserted)) => {
                tracing::info!(zone_id = %zone_id, inserted, "Products assigned to zone");
                self.list_assignments().await;
                true
            }
            Err(e) => {
                self.record_error("assign_products_to_zone", e);
                false
            }
        }
    }

    async fn try_assign_products(&self, form: AssignmentForm) -> AppResult<(Uuid, usize)> {
        validate_overrides(&form.overrides)?;
        let company_id = self.company_id().await?;

        let zone = self
            .get_zone(form.zone_id)
            .ok_or_else(|| AppError::zone_not_found(form.zone_id))?;
        let (zone_id, store_id) = (zone.id, zone.store_id);

        let assigned: HashSet<Uuid> = self
            .store
            .assigned_product_ids(company_id, zone_id)
            .await?
            .into_iter()
            .collect();
        let mut seen = HashSet::new();
        let new_ids: Vec<Uuid> = form
            .product_ids
            .iter()
            .copied()
            .filter(|id| !assigned.contains(id) && seen.insert(*id))
            .collect();
        if new_ids.is_empty() {
            return Err(AppError::new(ErrorCode::ProductsAlreadyAssigned)
                .with_detail("zone_id", zone_id.to_string()));
        }

        let created_at = now_millis();
        let rows: Vec<NewAssignment> = new_ids
            .into_iter()
            .map(|product_id| NewAssignment {
                product_id,
                zone_id,
                company_id,
                store_id,
                overrides: form.overrides.clone(),
                is_active: form.is_active,
                priority: form.priority,
                created_at,
            })
            .collect();
        let created = self.store.insert_assignments(rows).await?;
        Ok((zone_id, created.len()))
    }

    /// Partial update restricted to the override, `is_active` and `priority` columns
    pub async fn update_assignment(&mut self, assignment_id: Uuid, update: AssignmentUpdate) -> bool {
        self.error = None;
        match self.try_update_assignment(assignment_id, update).await {
            Ok(fields) => {
                tracing::info!(assignment_id = %assignment_id, ?fields, "Assignment updated");
                self.list_assignments().await;
                true
            }
            Err(e) => {
                self.record_error("update_assignment", e);
                false
            }
        }
    }

    /// Same as [`Self::update_assignment`] for a raw JSON patch; unknown keys are dropped
    pub async fn update_assignment_json(
        &mut self,
        assignment_id: Uuid,
        patch: serde_json::Value,
    ) -> bool {
        match AssignmentUpdate::from_json(patch) {
            Ok(update) => self.update_assignment(assignment_id, update).await,
            Err(e) => {
                self.record_error(
                    "update_assignment",
                    AppError::invalid_request(format!("Invalid assignment update: {e}")),
                );
                false
            }
        }
    }

    async fn try_update_assignment(
        &self,
        assignment_id: Uuid,
        update: AssignmentUpdate,
    ) -> AppResult<Vec<&'static str>> {
        validate_assignment_update(&update)?;
        let company_id = self.company_id().await?;
        self.store
            .update_assignment(company_id, assignment_id, &update, now_millis())
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => AppError::assignment_not_found(assignment_id),
                other => other.into(),
            })?;
        Ok(update.touched_fields())
    }

    /// Delete one assignment
    pub async fn remove_product_from_zone(&mut self, assignment_id: Uuid) -> bool {
        self.error = None;
        match self.try_remove_assignment(assignment_id).await {
            Ok(()) => {
                tracing::info!(assignment_id = %assignment_id, "Product removed from zone");
                self.list_assignments().await;
                true
            }
            Err(e) => {
                self.record_error("remove_product_from_zone", e);
                false
            }
        }
    }

    async fn try_remove_assignment(&self, assignment_id: Uuid) -> AppResult<()> {
        let company_id = self.company_id().await?;
        self.store
            .delete_assignment(company_id, assignment_id)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => AppError::assignment_not_found(assignment_id),
                other => other.into(),
            })
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Products of the company, by name
    pub async fn list_company_products(&mut self) -> Vec<Product> {
        self.error = None;
        match self.try_list_products().await {
            Ok(products) => products,
            Err(e) => {
                self.record_error("list_company_products", e);
                Vec::new()
            }
        }
    }

    async fn try_list_products(&self) -> AppResult<Vec<Product>> {
        let company_id = self.company_id().await?;
        Ok(self.store.list_products(company_id).await?)
    }

    /// Company products not yet assigned to the zone (per the cached assignments)
    pub async fn get_unassigned_products(&mut self, zone_id: Uuid) -> Vec<Product> {
        let assigned: HashSet<Uuid> = self
            .get_zone_products(zone_id)
            .iter()
            .map(|a| a.product_id)
            .collect();
        self.list_company_products()
            .await
            .into_iter()
            .filter(|p| !assigned.contains(&p.id))
            .collect()
    }

    // =========================================================================
    // Derived queries over the caches
    // =========================================================================

    pub fn get_zone_stats(&self) -> ZoneStats {
        compute_zone_stats(&self.zones, &self.assignments)
    }

    /// Assignments of one zone
    pub fn get_zone_products(&self, zone_id: Uuid) -> Vec<&ProductZoneAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.zone_id == zone_id)
            .collect()
    }

    /// Assignments of one product
    pub fn get_product_zones(&self, product_id: Uuid) -> Vec<&ProductZoneAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.product_id == product_id)
            .collect()
    }

    /// Override if set, else the product default; `None` without an assignment
    pub fn get_effective_price(
        &self,
        product_id: Uuid,
        zone_id: Uuid,
        price_type: PriceType,
    ) -> Option<Decimal> {
        self.assignments
            .iter()
            .find(|a| a.product_id == product_id && a.zone_id == zone_id)?
            .effective_price(price_type)
    }
}
