//! # Crudkit
//!
//! Scaffolding for CRUD web backends in Rust: generic verb dispatchers over
//! axum, a permission gate in front of every operation, and catalog-bound
//! model validation.
//!
//! ## Features
//!
//! - **Generic dispatch**: one set of handlers covers list/get/create/update/
//!   delete/bulk-delete for any resource implementing [`CrudService`]
//! - **Permission gate**: every operation checks a named permission through a
//!   pluggable [`Authorizer`] before touching the service
//! - **Explicit failures**: authorization denials, not-found lookups and
//!   validation errors are values, mapped to 403/404/400 responses
//! - **Paged reads**: filter/sort/page descriptors with a stock
//!   [`FilteredPagedRequest`] and response metadata
//! - **Catalog-bound validation**: validators resolve their messages through
//!   a YAML-backed [`Messages`] catalog
//! - **In-memory unit-of-work**: [`InMemoryCrudService`] for development and
//!   tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crudkit::prelude::*;
//!
//! let service = Arc::new(
//!     InMemoryCrudService::<Uuid, TaskModel>::new("tasks")
//!         .with_validator(TaskValidator::new(messages)),
//! );
//! let authorizer = Arc::new(
//!     GrantsAuthorizer::new()
//!         .grant_role("manager", ["tasks.view", "tasks.create", "tasks.edit", "tasks.delete"]),
//! );
//! let state = CrudState::new("tasks", service, authorizer);
//!
//! AppBuilder::new()
//!     .mount("/api/tasks", crud_routes(state))
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```
//!
//! [`CrudService`]: core::service::CrudService
//! [`Authorizer`]: core::auth::Authorizer
//! [`FilteredPagedRequest`]: core::query::FilteredPagedRequest
//! [`Messages`]: messages::Messages
//! [`InMemoryCrudService`]: storage::InMemoryCrudService

pub mod config;
pub mod core;
pub mod messages;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{
            AllowAllAuthorizer, Authorizer, GrantsAuthorizer, POLICY_PREFIX, Principal,
            ResourcePermissions, permission_policy,
        },
        error::{CrudError, CrudResult, ErrorResponse, FieldError},
        extractors::{GRANTS_HEADER, ROLES_HEADER, USER_ID_HEADER},
        model::{MasterModel, ModelKey, ReadModel},
        query::{FilteredPagedRequest, PageMeta, PageQuery, PagedResult},
        service::CrudService,
        validation::{AcceptAll, ModelValidator, Rules},
    };

    // === Config & messages ===
    pub use crate::config::ServerConfig;
    pub use crate::messages::Messages;

    // === Server ===
    pub use crate::server::{AppBuilder, CrudState, crud_routes, init_tracing};

    // === Storage ===
    pub use crate::storage::InMemoryCrudService;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        http::HeaderMap,
        routing::{delete, get, post, put},
    };
}
