//! Reusable field checks
//!
//! [`Rules`] accumulates field errors in declaration order and resolves every
//! message through the catalog, so validators stay declarative:
//!
//! ```rust,ignore
//! let mut rules = Rules::new(&self.messages);
//! rules
//!     .required("name", &model.name, "Role.Fields.Name.Required")
//!     .min_length("name", &model.name, 3, "Role.Fields.Name.MinimumLength")
//!     .max_length("name", &model.name, 50, "Role.Fields.Name.MaximumLength");
//! rules.finish()
//! ```

use crate::core::error::FieldError;
use crate::messages::Messages;
use regex::Regex;

/// Field-check accumulator bound to a message catalog.
pub struct Rules<'a> {
    messages: &'a Messages,
    errors: Vec<FieldError>,
}

impl<'a> Rules<'a> {
    pub fn new(messages: &'a Messages) -> Self {
        Self {
            messages,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, field: &str, key: &str, args: &[(&str, String)]) {
        self.errors
            .push(FieldError::new(field, self.messages.format(key, args)));
    }

    /// Value must be non-empty after trimming.
    pub fn required(&mut self, field: &str, value: &str, key: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, key, &[]);
        }
        self
    }

    /// Value must have at least `min` characters. Empty values pass; pair
    /// with [`required`](Self::required) when emptiness is also an error.
    pub fn min_length(&mut self, field: &str, value: &str, min: usize, key: &str) -> &mut Self {
        let len = value.chars().count();
        if len > 0 && len < min {
            self.push(field, key, &[("min", min.to_string()), ("len", len.to_string())]);
        }
        self
    }

    /// Value must not exceed `max` characters.
    pub fn max_length(&mut self, field: &str, value: &str, max: usize, key: &str) -> &mut Self {
        let len = value.chars().count();
        if len > max {
            self.push(field, key, &[("max", max.to_string()), ("len", len.to_string())]);
        }
        self
    }

    /// Non-empty value must match the pattern.
    pub fn matches(&mut self, field: &str, value: &str, pattern: &Regex, key: &str) -> &mut Self {
        if !value.is_empty() && !pattern.is_match(value) {
            self.push(field, key, &[("pattern", pattern.to_string())]);
        }
        self
    }

    /// Record an error unless `ok` holds. Escape hatch for checks that need
    /// outside state, e.g. uniqueness against a store.
    pub fn ensure(&mut self, field: &str, ok: bool, key: &str) -> &mut Self {
        if !ok {
            self.push(field, key, &[]);
        }
        self
    }

    /// The accumulated errors, in rule order.
    pub fn finish(self) -> Vec<FieldError> {
        self.errors
    }
}
