use mac_winops::ops::WinOps;
use tracing::info;

use crate::{Error, Result};

/// Gate run before any enumeration: the process must be trusted for
/// Accessibility. Checked once; there is no retry.
pub fn ensure_accessibility(ops: &dyn WinOps) -> Result<()> {
    if !ops.accessibility_ok() {
        return Err(Error::PermissionDenied);
    }
    info!("Accessibility permissions are granted.");
    Ok(())
}
