//! Configuration for keepclear.
//!
//! Every setting has a built-in default, so a config file is optional. When
//! present, `~/.keepclear/config.ron` holds a RON struct with any subset of
//! the fields of [`Config`]:
//!
//! ```ron
//! (
//!     target_display: "DELL U2723QE",
//!     interval_ms: 2000,
//!     margin_fraction: 0.8,
//! )
//! ```
#![warn(unsafe_op_in_unsafe_fn)]

use std::{
    env,
    path::{Path, PathBuf},
};

mod error;
mod loader;
mod settings;

pub use error::Error;
pub use loader::{load, load_from_path, parse_str};
pub use settings::{
    Config, DEFAULT_INTERVAL_MS, DEFAULT_MARGIN_FRACTION, DEFAULT_MAX_DISPLAYS,
    DEFAULT_MAX_WINDOWS, DEFAULT_TARGET_DISPLAY, Overrides,
};

/// Determine the preferred user config path (`~/.keepclear/config.ron`).
pub fn default_config_path() -> PathBuf {
    let mut p = PathBuf::from(env::var_os("HOME").unwrap_or_default());
    p.push(".keepclear");
    p.push("config.ron");
    p
}

/// Resolve the effective config path using the default policy.
///
/// Policy:
/// 1) Use `explicit` when provided (it must exist).
/// 2) Else use `~/.keepclear/config.ron` when it exists.
/// 3) Else `None`: run with built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>, Error> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::Read {
                path: Some(path.to_path_buf()),
                message: "config file not found".to_string(),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    let preferred = default_config_path();
    Ok(preferred.exists().then_some(preferred))
}
