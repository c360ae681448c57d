use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// API group that owns the RBAC resource kinds.
pub const RBAC_API_GROUP: &str = "rbac.authorization.k8s.io";

// --- Role reference ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleRefKind {
    Role,
    ClusterRole,
}

/// Reference to the role a binding grants.
///
/// The referenced role is owned by the external authorization model:
/// this service stores and echoes the reference but never resolves it
/// into permission rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRef {
    pub kind: RoleRefKind,
    pub name: String,
    pub api_group: String,
}

// --- Subject ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectKind {
    User,
    Group,
    ServiceAccount,
}

/// A principal the bound role is granted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub kind: SubjectKind,
    pub name: String,
    /// Set for ServiceAccount subjects only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Set for User and Group subjects (the RBAC API group).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_group: Option<String>,
}

// --- RoleBinding ---

/// Stored namespaced binding resource.
///
/// This is the registry's source of truth; read paths project it into
/// [`crate::view::RoleBindingView`] before serialization. `uid` and
/// `created_at` are assigned by the server when the binding is recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleBinding {
    #[serde(default)]
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    pub role_ref: RoleRef,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

// --- ClusterRoleBinding ---

/// Stored cluster-scoped binding resource. Must reference a ClusterRole.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterRoleBinding {
    #[serde(default)]
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    pub role_ref: RoleRef,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}
