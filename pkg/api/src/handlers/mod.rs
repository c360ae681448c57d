pub mod bindings;
pub mod cluster_bindings;
pub mod info;
