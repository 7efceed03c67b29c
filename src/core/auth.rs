//! Permission gate
//!
//! Each CRUD operation is guarded by a named permission. Before dispatching,
//! the handler turns the permission name into a policy name (fixed prefix +
//! permission) and asks an [`Authorizer`] whether the current [`Principal`]
//! satisfies it. The authorizer is a seam: production deployments plug in
//! whatever policy engine fronts their identity provider, while
//! [`GrantsAuthorizer`] covers development and tests.

use crate::core::error::CrudResult;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Prefix distinguishing permission policies from any other policy names the
/// host authorizer knows about.
pub const POLICY_PREFIX: &str = "permission:";

/// Build the policy name for a permission.
pub fn permission_policy(permission: &str) -> String {
    format!("{POLICY_PREFIX}{permission}")
}

/// The caller identity extracted from a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// Authenticated user
    User {
        id: Uuid,
        roles: Vec<String>,
        /// Permission names granted directly to the user.
        grants: Vec<String>,
    },

    /// No authentication
    Anonymous,
}

impl Principal {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Principal::Anonymous)
    }

    /// Get user id if authenticated
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Principal::User { id, .. } => Some(*id),
            Principal::Anonymous => None,
        }
    }

    pub fn roles(&self) -> &[String] {
        match self {
            Principal::User { roles, .. } => roles,
            Principal::Anonymous => &[],
        }
    }

    pub fn grants(&self) -> &[String] {
        match self {
            Principal::User { grants, .. } => grants,
            Principal::Anonymous => &[],
        }
    }
}

/// The permission names guarding one CRUD resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePermissions {
    pub view: String,
    pub create: String,
    pub edit: String,
    pub delete: String,
}

impl ResourcePermissions {
    /// Conventional names for a resource: `tasks` gets `tasks.view`,
    /// `tasks.create`, `tasks.edit`, `tasks.delete`.
    pub fn for_resource(resource: &str) -> Self {
        Self {
            view: format!("{resource}.view"),
            create: format!("{resource}.create"),
            edit: format!("{resource}.edit"),
            delete: format!("{resource}.delete"),
        }
    }
}

/// Trait for policy evaluation
///
/// `policy` is a full policy name, prefix included. Implementations decide
/// allow/deny; they never translate denials into responses themselves.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self, principal: &Principal, policy: &str) -> CrudResult<bool>;
}

/// Authorizer that allows everything (for development)
pub struct AllowAllAuthorizer;

#[async_trait]
impl Authorizer for AllowAllAuthorizer {
    async fn authorize(&self, _principal: &Principal, _policy: &str) -> CrudResult<bool> {
        Ok(true)
    }
}

/// Grants-table authorizer
///
/// Resolves `permission:`-prefixed policies against the principal's direct
/// grants and a role → permissions table. Unknown policy shapes and anonymous
/// principals are denied.
#[derive(Default)]
pub struct GrantsAuthorizer {
    role_grants: HashMap<String, HashSet<String>>,
}

impl GrantsAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a set of permissions to a role.
    pub fn grant_role<I, P>(mut self, role: &str, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.role_grants
            .entry(role.to_string())
            .or_default()
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    fn role_has(&self, role: &str, permission: &str) -> bool {
        self.role_grants
            .get(role)
            .is_some_and(|grants| grants.contains(permission))
    }
}

#[async_trait]
impl Authorizer for GrantsAuthorizer {
    async fn authorize(&self, principal: &Principal, policy: &str) -> CrudResult<bool> {
        let Some(permission) = policy.strip_prefix(POLICY_PREFIX) else {
            return Ok(false);
        };

        match principal {
            Principal::Anonymous => Ok(false),
            Principal::User { roles, grants, .. } => {
                let allowed = grants.iter().any(|g| g == permission)
                    || roles.iter().any(|r| self.role_has(r, permission));
                Ok(allowed)
            }
        }
    }
}
