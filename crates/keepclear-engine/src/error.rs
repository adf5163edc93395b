use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Errors that stop keepclear before the loop starts.
///
/// Nothing that happens during a tick is an error at this level: missing
/// displays, missing windows and failed mutations are absorbed by the tick.
#[derive(Debug, Error)]
pub enum Error {
    /// The process is not trusted for Accessibility.
    #[error(
        "Accessibility permissions are not granted. Please grant them in System Settings > Privacy & Security > Accessibility."
    )]
    PermissionDenied,
}
