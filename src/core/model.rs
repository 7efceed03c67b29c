//! Model shape traits
//!
//! Every resource exposed through the CRUD dispatchers is described by up to
//! two shapes: a mutable read-write `MasterModel` and a serializable
//! `ReadModel` projection. The two may be the same type.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Display;
use std::hash::Hash;

/// Key type of a model: equatable, hashable and usable in URLs and JSON.
///
/// Blanket-implemented; `Uuid`, `i64`, `String` and friends all qualify.
pub trait ModelKey:
    Clone + Eq + Hash + Display + Send + Sync + Serialize + DeserializeOwned + 'static
{
}

impl<T> ModelKey for T where
    T: Clone + Eq + Hash + Display + Send + Sync + Serialize + DeserializeOwned + 'static
{
}

/// The mutable read-write shape of a resource.
///
/// The dispatcher only needs key access: `set_id` lets the update handler
/// force the path id onto the body before handing it to the service. The
/// stamping hooks are no-ops by default; models that carry audit timestamps
/// override them and the store calls them on create/edit.
pub trait MasterModel: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    type Key: ModelKey;

    fn id(&self) -> Self::Key;

    fn set_id(&mut self, id: Self::Key);

    /// Called by the store when the model is first persisted.
    fn stamp_created(&mut self, _at: DateTime<Utc>) {}

    /// Called by the store on every subsequent write.
    fn stamp_modified(&mut self, _at: DateTime<Utc>) {}
}

/// A serializable projection returned by paged reads.
pub trait ReadModel: Clone + Send + Sync + Serialize + 'static {}

impl<T> ReadModel for T where T: Clone + Send + Sync + Serialize + 'static {}
