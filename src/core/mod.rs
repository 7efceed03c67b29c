//! Core abstractions: permission gate, model shapes, paged queries, the CRUD
//! service contract, typed errors and validation.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod model;
pub mod query;
pub mod service;
pub mod validation;

pub use auth::{
    AllowAllAuthorizer, Authorizer, GrantsAuthorizer, POLICY_PREFIX, Principal,
    ResourcePermissions, permission_policy,
};
pub use error::{CrudError, CrudResult, ErrorResponse, FieldError};
pub use model::{MasterModel, ModelKey, ReadModel};
pub use query::{FilteredPagedRequest, MAX_PAGE_SIZE, PageMeta, PageQuery, PagedResult};
pub use service::CrudService;
pub use validation::{AcceptAll, ModelValidator, Rules};
