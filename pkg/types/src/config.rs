use serde::{Deserialize, Serialize};

/// Server configuration file (YAML).
///
/// Example `config.yaml`:
/// ```yaml
/// port: 8088
/// data-dir: /var/lib/rbacview/data
/// token: my-secret-token
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfigFile {
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default, alias = "data-dir")]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Load a YAML config file, returning the default if the file doesn't exist.
pub fn load_config_file<T: serde::de::DeserializeOwned + Default>(path: &str) -> anyhow::Result<T> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(T::default());
        }
        Err(e) => return Err(e.into()),
    };
    let config: T = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg: ServerConfigFile =
            load_config_file("/nonexistent/rbacview/config.yaml").unwrap();
        assert!(cfg.port.is_none());
        assert!(cfg.data_dir.is_none());
        assert!(cfg.token.is_none());
    }

    #[test]
    fn parses_yaml_with_kebab_alias() {
        let cfg: ServerConfigFile =
            serde_yaml::from_str("port: 9000\ndata-dir: /var/lib/rbacview\n").unwrap();
        assert_eq!(cfg.port, Some(9000));
        assert_eq!(cfg.data_dir.as_deref(), Some("/var/lib/rbacview"));
        assert!(cfg.token.is_none());
    }
}
