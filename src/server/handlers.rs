//! Generic CRUD dispatchers
//!
//! One handler per verb/route, generic over the service. Each handler runs
//! the permission gate, delegates to the service and translates the outcome
//! into a status code:
//!
//! | route                | permission | success | failure        |
//! |----------------------|------------|---------|----------------|
//! | `GET /`              | view       | 200     | 403            |
//! | `GET /{id}`          | edit       | 200     | 403, 404       |
//! | `POST /`             | create     | 201     | 403, 400       |
//! | `PUT /{id}`          | edit       | 200     | 400, 403, 404  |
//! | `DELETE /{id}`       | delete     | 204     | 403, 404, 400  |
//! | `POST /bulk-delete`  | delete     | 204     | 403, 400       |
//!
//! The dispatchers own no state beyond the shared [`CrudState`]; cancellation
//! reaches the service by future drop when the connection goes away.

use crate::core::auth::{Authorizer, Principal, ResourcePermissions, permission_policy};
use crate::core::error::{CrudError, CrudResult};
use crate::core::model::MasterModel;
use crate::core::query::PagedResult;
use crate::core::service::CrudService;
use axum::Json;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::sync::Arc;

/// Query extractor that falls back to the type's default whenever the query
/// string is absent or cannot be parsed. This mirrors the pre-axum-0.8
/// `Option<Query<T>>` + `unwrap_or_default()` behavior the list dispatcher
/// relies on (axum 0.8 no longer implements the optional-extractor path for
/// `Query`).
pub struct OptionalQuery<T>(T);

impl<T, S> FromRequestParts<S> for OptionalQuery<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let value = Query::<T>::from_request_parts(parts, state)
            .await
            .map(|Query(q)| q)
            .unwrap_or_default();
        Ok(OptionalQuery(value))
    }
}

/// State shared by the dispatchers of one resource.
pub struct CrudState<S: CrudService> {
    resource: &'static str,
    service: Arc<S>,
    authorizer: Arc<dyn Authorizer>,
    permissions: ResourcePermissions,
}

impl<S: CrudService> Clone for CrudState<S> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource,
            service: self.service.clone(),
            authorizer: self.authorizer.clone(),
            permissions: self.permissions.clone(),
        }
    }
}

impl<S: CrudService> CrudState<S> {
    /// State with the conventional `{resource}.{action}` permission names.
    pub fn new(resource: &'static str, service: Arc<S>, authorizer: Arc<dyn Authorizer>) -> Self {
        let permissions = ResourcePermissions::for_resource(resource);
        Self::with_permissions(resource, service, authorizer, permissions)
    }

    /// State with caller-chosen permission names.
    pub fn with_permissions(
        resource: &'static str,
        service: Arc<S>,
        authorizer: Arc<dyn Authorizer>,
        permissions: ResourcePermissions,
    ) -> Self {
        Self {
            resource,
            service,
            authorizer,
            permissions,
        }
    }

    pub fn resource(&self) -> &'static str {
        self.resource
    }

    async fn require(&self, principal: &Principal, permission: &str) -> CrudResult<()> {
        let policy = permission_policy(permission);
        if self.authorizer.authorize(principal, &policy).await? {
            Ok(())
        } else {
            tracing::debug!(resource = self.resource, %policy, "permission denied");
            Err(CrudError::Forbidden)
        }
    }
}

/// `GET /` — paged list. The filter/page request defaults when the query
/// string is absent.
pub async fn list<S: CrudService>(
    State(state): State<CrudState<S>>,
    principal: Principal,
    OptionalQuery(request): OptionalQuery<S::Query>,
) -> CrudResult<Json<PagedResult<S::ReadModel>>> {
    state.require(&principal, &state.permissions.view).await?;

    let page = state.service.read_paged(request).await?;
    Ok(Json(page))
}

/// `GET /{id}` — fetch the read-write shape for editing.
pub async fn find<S: CrudService>(
    State(state): State<CrudState<S>>,
    principal: Principal,
    Path(id): Path<S::Key>,
) -> CrudResult<Json<S::Model>> {
    state.require(&principal, &state.permissions.edit).await?;

    match state.service.find(&id).await? {
        Some(model) => Ok(Json(model)),
        None => Err(CrudError::not_found(state.resource, id)),
    }
}

/// `POST /` — create, returning the model with its assigned key.
pub async fn create<S: CrudService>(
    State(state): State<CrudState<S>>,
    principal: Principal,
    Json(model): Json<S::Model>,
) -> CrudResult<(StatusCode, Json<S::Model>)> {
    state.require(&principal, &state.permissions.create).await?;

    let created = state.service.create(model).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /{id}` — update. The id consistency check runs before the permission
/// gate; a malformed request is a 400 no matter who sent it.
pub async fn update<S: CrudService>(
    State(state): State<CrudState<S>>,
    principal: Principal,
    Path(id): Path<S::Key>,
    Json(mut model): Json<S::Model>,
) -> CrudResult<Json<S::Model>> {
    if model.id() != id {
        return Err(CrudError::IdMismatch);
    }

    state.require(&principal, &state.permissions.edit).await?;

    model.set_id(id);
    let updated = state.service.edit(model).await?;
    Ok(Json(updated))
}

/// `DELETE /{id}` — resolve then delete; unknown ids are a 404.
pub async fn remove<S: CrudService>(
    State(state): State<CrudState<S>>,
    principal: Principal,
    Path(id): Path<S::Key>,
) -> CrudResult<StatusCode> {
    state.require(&principal, &state.permissions.delete).await?;

    let Some(model) = state.service.find(&id).await? else {
        return Err(CrudError::not_found(state.resource, id));
    };

    state.service.delete(model).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /bulk-delete` — resolve a batch of ids to models, then delete the
/// set. Ids that resolve to nothing are skipped.
pub async fn bulk_delete<S: CrudService>(
    State(state): State<CrudState<S>>,
    principal: Principal,
    Json(ids): Json<Vec<S::Key>>,
) -> CrudResult<StatusCode> {
    state.require(&principal, &state.permissions.delete).await?;

    let models = state.service.find_many(&ids).await?;
    state.service.delete_many(models).await?;
    Ok(StatusCode::NO_CONTENT)
}
