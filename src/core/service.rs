//! The CRUD service contract
//!
//! Implementations own persistence and validation; the dispatch layer only
//! translates verbs into these calls. The crate ships an in-memory
//! implementation for development and tests; production backends implement
//! this trait over whatever store they use.

use crate::core::error::CrudResult;
use crate::core::model::{MasterModel, ModelKey, ReadModel};
use crate::core::query::{PagedResult, PageQuery};
use async_trait::async_trait;

/// CRUD operations over one resource.
///
/// `ReadModel` is the projection returned by paged reads and may be the same
/// type as `Model`. All failure states are explicit [`CrudError`] values;
/// a missing row on lookup is `Ok(None)`, not an error.
///
/// [`CrudError`]: crate::core::error::CrudError
#[async_trait]
pub trait CrudService: Send + Sync + 'static {
    type Key: ModelKey;
    type ReadModel: ReadModel;
    type Model: MasterModel<Key = Self::Key>;
    type Query: PageQuery;

    /// Read one page of projections, honoring the request's filter and sort.
    async fn read_paged(&self, request: Self::Query) -> CrudResult<PagedResult<Self::ReadModel>>;

    /// Find a model by id.
    async fn find(&self, id: &Self::Key) -> CrudResult<Option<Self::Model>>;

    /// Resolve a set of ids to models; missing ids are skipped.
    async fn find_many(&self, ids: &[Self::Key]) -> CrudResult<Vec<Self::Model>>;

    /// Validate and persist a new model, returning it with its assigned key.
    async fn create(&self, model: Self::Model) -> CrudResult<Self::Model>;

    /// Validate and rewrite an existing model.
    async fn edit(&self, model: Self::Model) -> CrudResult<Self::Model>;

    /// Delete a single model.
    async fn delete(&self, model: Self::Model) -> CrudResult<()>;

    /// Delete a batch of models. The default deletes one by one; stores that
    /// can do better override it.
    async fn delete_many(&self, models: Vec<Self::Model>) -> CrudResult<()> {
        for model in models {
            self.delete(model).await?;
        }
        Ok(())
    }
}
