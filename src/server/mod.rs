//! HTTP exposure: generic dispatchers, per-resource routing and the
//! application builder.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::{AppBuilder, init_tracing};
pub use handlers::CrudState;
pub use router::crud_routes;
