//! Reading and parsing RON configuration files.

use std::{fs, path::Path};

use tracing::debug;

use crate::{Config, Error, resolve_config_path};

/// Parse and validate a RON document.
pub fn parse_str(source: &str) -> Result<Config, Error> {
    let cfg: Config = ron::from_str(source).map_err(|e| Error::Parse {
        path: None,
        message: e.to_string(),
    })?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load and validate the config file at `path`.
pub fn load_from_path(path: &Path) -> Result<Config, Error> {
    let source = fs::read_to_string(path).map_err(|e| Error::Read {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    let cfg = parse_str(&source).map_err(|e| e.with_path(path))?;
    debug!(path = %path.display(), "loaded config");
    Ok(cfg)
}

/// Load the effective configuration: `explicit` if given, else the default
/// file if it exists, else built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<Config, Error> {
    match resolve_config_path(explicit)? {
        Some(path) => load_from_path(&path),
        None => {
            debug!("no config file; using defaults");
            Ok(Config::default())
        }
    }
}
