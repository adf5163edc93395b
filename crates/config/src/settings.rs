//! The configuration struct, its defaults, and range checks.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Display name matched when nothing else is configured.
pub const DEFAULT_TARGET_DISPLAY: &str = "C27F390";
/// Polling period between placement passes.
pub const DEFAULT_INTERVAL_MS: u64 = 3_000;
/// Share of the target display's width that windows may occupy.
pub const DEFAULT_MARGIN_FRACTION: f64 = 0.84;
/// Upper bound on displays enumerated per pass.
pub const DEFAULT_MAX_DISPLAYS: usize = 10;
/// Upper bound on windows enumerated per pass.
pub const DEFAULT_MAX_WINDOWS: usize = 100;

/// Effective keepclear configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Localized name of the display whose right margin is kept clear.
    pub target_display: String,
    /// Milliseconds between placement passes.
    pub interval_ms: u64,
    /// Fraction of the display width available to windows, in `(0, 1]`.
    pub margin_fraction: f64,
    /// Maximum displays enumerated per pass.
    pub max_displays: usize,
    /// Maximum windows enumerated per pass.
    pub max_windows: usize,
    /// Log corrections without applying them.
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_display: DEFAULT_TARGET_DISPLAY.to_string(),
            interval_ms: DEFAULT_INTERVAL_MS,
            margin_fraction: DEFAULT_MARGIN_FRACTION,
            max_displays: DEFAULT_MAX_DISPLAYS,
            max_windows: DEFAULT_MAX_WINDOWS,
            dry_run: false,
        }
    }
}

/// Command-line overrides layered on top of a loaded [`Config`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub target_display: Option<String>,
    pub interval_ms: Option<u64>,
    pub margin_fraction: Option<f64>,
    pub dry_run: bool,
}

impl Config {
    /// Polling period as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Apply `o` and re-validate the result.
    pub fn with_overrides(mut self, o: &Overrides) -> Result<Self, Error> {
        if let Some(name) = &o.target_display {
            self.target_display = name.clone();
        }
        if let Some(ms) = o.interval_ms {
            self.interval_ms = ms;
        }
        if let Some(f) = o.margin_fraction {
            self.margin_fraction = f;
        }
        self.dry_run |= o.dry_run;
        self.validate()?;
        Ok(self)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |field: &'static str, message: &str| Error::Validation {
            path: None,
            field,
            message: message.to_string(),
        };
        if self.target_display.trim().is_empty() {
            return Err(invalid("target_display", "must not be empty"));
        }
        if self.interval_ms == 0 {
            return Err(invalid("interval_ms", "must be greater than zero"));
        }
        if !(self.margin_fraction > 0.0 && self.margin_fraction <= 1.0) {
            return Err(invalid(
                "margin_fraction",
                &format!("must be in (0, 1], got {}", self.margin_fraction),
            ));
        }
        if self.max_displays == 0 {
            return Err(invalid("max_displays", "must be greater than zero"));
        }
        if self.max_windows == 0 {
            return Err(invalid("max_windows", "must be greater than zero"));
        }
        Ok(())
    }
}
