//! In-memory implementation of the CRUD service contract
//!
//! Useful for development and tests; production deployments implement
//! [`CrudService`] over a real store instead. Rows live behind an `RwLock`
//! and every operation clones in and out, so the service is cheap to share
//! across handlers.

use crate::core::error::{CrudError, CrudResult};
use crate::core::model::{MasterModel, ModelKey};
use crate::core::query::{FilteredPagedRequest, PageQuery, PagedResult};
use crate::core::service::CrudService;
use crate::core::validation::{AcceptAll, ModelValidator};
use crate::storage::filtering::{apply_sort, matches_filter};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory CRUD service
///
/// Key assignment is pluggable: [`new`](Self::new) covers UUID keys,
/// [`sequential`](Self::sequential) covers i64 surrogate keys, and
/// [`with_key_gen`](Self::with_key_gen) accepts anything else. A validator
/// attached via [`with_validator`](Self::with_validator) runs before every
/// write; validation failures surface as [`CrudError::Validation`].
pub struct InMemoryCrudService<K, M>
where
    K: ModelKey,
    M: MasterModel<Key = K>,
{
    resource: &'static str,
    rows: Arc<RwLock<HashMap<K, M>>>,
    key_gen: Arc<dyn Fn() -> K + Send + Sync>,
    validator: Arc<dyn ModelValidator<M>>,
}

impl<K, M> Clone for InMemoryCrudService<K, M>
where
    K: ModelKey,
    M: MasterModel<Key = K>,
{
    fn clone(&self) -> Self {
        Self {
            resource: self.resource,
            rows: self.rows.clone(),
            key_gen: self.key_gen.clone(),
            validator: self.validator.clone(),
        }
    }
}

impl<M> InMemoryCrudService<Uuid, M>
where
    M: MasterModel<Key = Uuid>,
{
    /// Service with random UUID keys.
    pub fn new(resource: &'static str) -> Self {
        Self::with_key_gen(resource, Uuid::new_v4)
    }
}

impl<M> InMemoryCrudService<i64, M>
where
    M: MasterModel<Key = i64>,
{
    /// Service with sequential i64 keys starting at 1.
    pub fn sequential(resource: &'static str) -> Self {
        let counter = AtomicI64::new(1);
        Self::with_key_gen(resource, move || counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl<K, M> InMemoryCrudService<K, M>
where
    K: ModelKey,
    M: MasterModel<Key = K>,
{
    /// Service with caller-supplied key assignment.
    pub fn with_key_gen(resource: &'static str, key_gen: impl Fn() -> K + Send + Sync + 'static) -> Self {
        Self {
            resource,
            rows: Arc::new(RwLock::new(HashMap::new())),
            key_gen: Arc::new(key_gen),
            validator: Arc::new(AcceptAll),
        }
    }

    /// Attach a validator run before create and edit.
    pub fn with_validator(mut self, validator: impl ModelValidator<M> + 'static) -> Self {
        self.validator = Arc::new(validator);
        self
    }

    /// Is there any row satisfying the predicate? Used by validators for
    /// uniqueness checks against the same unit-of-work they guard.
    pub fn exists<F>(&self, predicate: F) -> CrudResult<bool>
    where
        F: Fn(&M) -> bool,
    {
        let rows = self.read_rows()?;
        Ok(rows.values().any(|model| predicate(model)))
    }

    pub fn len(&self) -> CrudResult<usize> {
        Ok(self.read_rows()?.len())
    }

    pub fn is_empty(&self) -> CrudResult<bool> {
        Ok(self.read_rows()?.is_empty())
    }

    fn read_rows(&self) -> CrudResult<std::sync::RwLockReadGuard<'_, HashMap<K, M>>> {
        self.rows
            .read()
            .map_err(|_| CrudError::Storage("row lock poisoned".into()))
    }

    fn write_rows(&self) -> CrudResult<std::sync::RwLockWriteGuard<'_, HashMap<K, M>>> {
        self.rows
            .write()
            .map_err(|_| CrudError::Storage("row lock poisoned".into()))
    }

    async fn check(&self, model: &M) -> CrudResult<()> {
        let errors = self.validator.validate(model).await;
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CrudError::Validation(errors))
        }
    }
}

#[async_trait]
impl<K, M> CrudService for InMemoryCrudService<K, M>
where
    K: ModelKey,
    M: MasterModel<Key = K>,
{
    type Key = K;
    type ReadModel = M;
    type Model = M;
    type Query = FilteredPagedRequest;

    async fn read_paged(&self, request: FilteredPagedRequest) -> CrudResult<PagedResult<M>> {
        let rows: Vec<M> = self.read_rows()?.values().cloned().collect();

        let mut paired = Vec::with_capacity(rows.len());
        for model in rows {
            let value =
                serde_json::to_value(&model).map_err(|e| CrudError::Internal(e.to_string()))?;
            paired.push((value, model));
        }

        if let Some(filter) = request.filter_value() {
            paired.retain(|(value, _)| matches_filter(value, &filter));
        }

        match request.sort.as_deref() {
            Some(sort) => apply_sort(&mut paired, sort),
            // Pages must be stable across calls; hash order is not.
            None => paired.sort_by(|(_, a), (_, b)| a.id().to_string().cmp(&b.id().to_string())),
        }

        let total = paired.len();
        let page = request.page();
        let page_size = request.page_size();
        let items = paired
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .map(|(_, model)| model)
            .collect();

        Ok(PagedResult::new(items, page, page_size, total))
    }

    async fn find(&self, id: &K) -> CrudResult<Option<M>> {
        Ok(self.read_rows()?.get(id).cloned())
    }

    async fn find_many(&self, ids: &[K]) -> CrudResult<Vec<M>> {
        let rows = self.read_rows()?;
        Ok(ids.iter().filter_map(|id| rows.get(id).cloned()).collect())
    }

    async fn create(&self, model: M) -> CrudResult<M> {
        self.check(&model).await?;

        let mut model = model;
        model.set_id((self.key_gen)());
        model.stamp_created(Utc::now());

        self.write_rows()?.insert(model.id(), model.clone());
        Ok(model)
    }

    async fn edit(&self, model: M) -> CrudResult<M> {
        self.check(&model).await?;

        let mut model = model;
        model.stamp_modified(Utc::now());

        let mut rows = self.write_rows()?;
        if !rows.contains_key(&model.id()) {
            return Err(CrudError::not_found(self.resource, model.id()));
        }
        rows.insert(model.id(), model.clone());
        Ok(model)
    }

    async fn delete(&self, model: M) -> CrudResult<()> {
        let mut rows = self.write_rows()?;
        rows.remove(&model.id())
            .map(|_| ())
            .ok_or_else(|| CrudError::not_found(self.resource, model.id()))
    }

    async fn delete_many(&self, models: Vec<M>) -> CrudResult<()> {
        let mut rows = self.write_rows()?;
        // Rows deleted concurrently since resolution do not fail the batch.
        for model in models {
            rows.remove(&model.id());
        }
        Ok(())
    }
}
