//! Filesystem path constants.

/// Default config file path for the server.
pub const DEFAULT_SERVER_CONFIG: &str = "/etc/rbacview/config.yaml";

/// Default data directory for the registry store.
pub const DEFAULT_SERVER_DATA_DIR: &str = "/tmp/rbacview-data";
