//! Registry key construction.

use pkg_constants::registry::{CLUSTER_ROLE_BINDING_PREFIX, ROLE_BINDING_PREFIX};

/// Key for a namespaced role binding: `(namespace, name)` is the unique
/// identity of a binding, so it is also the storage key.
pub fn role_binding_key(namespace: &str, name: &str) -> String {
    format!("{}{}/{}", ROLE_BINDING_PREFIX, namespace, name)
}

/// Prefix that scans all role bindings within one namespace.
pub fn role_binding_ns_prefix(namespace: &str) -> String {
    format!("{}{}/", ROLE_BINDING_PREFIX, namespace)
}

/// Key for a cluster role binding.
pub fn cluster_role_binding_key(name: &str) -> String {
    format!("{}{}", CLUSTER_ROLE_BINDING_PREFIX, name)
}
