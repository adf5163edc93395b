//! Stand-ins used when building for a platform without AppKit or
//! Accessibility.

use tracing::debug;

use crate::{DisplayInfo, WindowHandle, WindowSet, error::Error, error::Result};

pub(crate) fn list_displays(_max: usize) -> Vec<DisplayInfo> {
    debug!("list_displays: unsupported platform");
    Vec::new()
}

pub(crate) fn list_windows(_max: usize) -> WindowSet {
    debug!("list_windows: unsupported platform");
    WindowSet::default()
}

pub(crate) fn move_window(_handle: &WindowHandle, _x: i32, _y: i32) -> Result<()> {
    Err(Error::UnsupportedPlatform)
}

pub(crate) fn resize_window(_handle: &WindowHandle, _width: i32, _height: i32) -> Result<()> {
    Err(Error::UnsupportedPlatform)
}
