use std::fs;
use std::path::Path;

use anyhow::{bail, Result};

use crate::config::scopes::ServiceConfig;

/// Load and validate config from YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<ServiceConfig> {
    let raw = fs::read_to_string(path)?;
    let config: ServiceConfig = serde_yaml::from_str(&raw)?;

    // Validate scopes
    for (name, scope) in &config.scopes {
        if scope.generate.url.is_empty() {
            bail!("scope '{}' has an empty generate url", name);
        }
        if !scope.token_pointer.starts_with('/') {
            bail!(
                "scope '{}': token_pointer '{}' is not a JSON pointer",
                name,
                scope.token_pointer
            );
        }
        if let Some(refresh) = &scope.refresh {
            if refresh.url.is_empty() {
                bail!("scope '{}' has an empty refresh url", name);
            }
        }
    }

    Ok(config)
}
