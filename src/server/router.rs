//! Router builder for CRUD resources

use crate::core::service::CrudService;
use crate::server::handlers::{self, CrudState};
use axum::{
    Router,
    routing::{get, post},
};

/// Build the routes for one CRUD resource:
///
/// - `GET /` — paged list
/// - `POST /` — create
/// - `GET /{id}` — fetch by id
/// - `PUT /{id}` — update
/// - `DELETE /{id}` — delete
/// - `POST /bulk-delete` — batch delete
///
/// Mount the result under the resource path, e.g.
/// `app.nest("/api/tasks", crud_routes(state))`.
pub fn crud_routes<S: CrudService>(state: CrudState<S>) -> Router {
    Router::new()
        .route("/", get(handlers::list::<S>).post(handlers::create::<S>))
        .route("/bulk-delete", post(handlers::bulk_delete::<S>))
        .route(
            "/{id}",
            get(handlers::find::<S>)
                .put(handlers::update::<S>)
                .delete(handlers::remove::<S>),
        )
        .with_state(state)
}
