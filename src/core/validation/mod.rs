//! Model validation
//!
//! Services run a [`ModelValidator`] before every write; a non-empty error
//! list becomes a 400 response with the field errors in rule order.

pub mod rules;

pub use rules::Rules;

use crate::core::error::FieldError;
use async_trait::async_trait;

/// Validates one model shape.
///
/// Validators may consult a store (uniqueness checks) and resolve their
/// messages through a catalog; both are held by the concrete validator.
#[async_trait]
pub trait ModelValidator<M>: Send + Sync {
    /// Returns the field errors, in rule order. Empty means valid.
    async fn validate(&self, model: &M) -> Vec<FieldError>;
}

/// Validator that accepts every model.
pub struct AcceptAll;

#[async_trait]
impl<M: Send + Sync> ModelValidator<M> for AcceptAll {
    async fn validate(&self, _model: &M) -> Vec<FieldError> {
        Vec::new()
    }
}
