//! Registry key-space constants.
//!
//! Every stored resource lives under an etcd-style key. Namespaced
//! bindings are keyed by namespace then name so a prefix scan over
//! `/registry/rolebindings/{namespace}/` lists one namespace.

/// Key prefix for namespaced role bindings.
pub const ROLE_BINDING_PREFIX: &str = "/registry/rolebindings/";

/// Key prefix for cluster role bindings.
pub const CLUSTER_ROLE_BINDING_PREFIX: &str = "/registry/clusterrolebindings/";
