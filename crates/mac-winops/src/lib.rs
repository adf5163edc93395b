//! mac-winops: macOS display and window operations for keepclear.
//!
//! Provides the platform collaborators the placement loop consumes:
//! - display enumeration (AppKit `NSScreen`) with names and frames,
//! - on-screen window enumeration (CoreGraphics window list) with a
//!   tick-scoped Accessibility handle per window,
//! - move and resize of a window through its handle.
//!
//! Rectangles from both enumerators share one coordinate space: global,
//! top-left origin, y growing downward. Mutations require Accessibility
//! permission. On other platforms enumeration is empty and mutation fails
//! with [`Error::UnsupportedPlatform`].

#[cfg(target_os = "macos")]
mod ax;
#[cfg(target_os = "macos")]
mod cfutil;
#[cfg(target_os = "macos")]
mod display;
mod error;
pub mod geom;
mod handle;
pub mod ops;
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
mod select;
#[cfg(not(target_os = "macos"))]
mod unsupported;
#[cfg(target_os = "macos")]
mod window;

pub use error::{Error, Result};
pub use geom::Rect;
pub use handle::WindowHandle;

#[cfg(target_os = "macos")]
use display as display_sys;
#[cfg(not(target_os = "macos"))]
use unsupported as display_sys;
#[cfg(not(target_os = "macos"))]
use unsupported as window_sys;
#[cfg(target_os = "macos")]
use window as window_sys;

/// Alias for CoreGraphics CGWindowID (kCGWindowNumber).
pub type WindowId = u32;

/// Alias for CoreGraphics CGDirectDisplayID.
pub type DisplayId = u32;

/// Snapshot of one connected display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayInfo {
    pub id: DisplayId,
    /// Localized display name, e.g. "C27F390" or "Built-in Retina Display".
    pub name: String,
    pub frame: Rect,
}

/// Snapshot of one on-screen window.
#[derive(Debug)]
pub struct WindowInfo {
    pub id: WindowId,
    /// Owning process.
    pub pid: i32,
    /// Window-list title; absent when the owner does not publish one or
    /// Screen Recording permission is missing.
    pub title: Option<String>,
    pub frame: Rect,
    /// `None` when the owning process exposes no Accessibility window; such
    /// windows are reported but cannot be moved.
    pub handle: Option<WindowHandle>,
}

/// All windows of one enumeration pass, together with every platform
/// resource acquired for them.
///
/// Dropping the set releases all handles in one step; callers hold it for
/// the duration of a tick and never longer.
#[derive(Debug, Default)]
pub struct WindowSet {
    windows: Vec<WindowInfo>,
}

impl WindowSet {
    pub fn new(windows: Vec<WindowInfo>) -> Self {
        Self { windows }
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WindowInfo> {
        self.windows.iter()
    }

    /// Number of windows that carry a usable handle.
    pub fn with_handle(&self) -> usize {
        self.windows.iter().filter(|w| w.handle.is_some()).count()
    }

    /// Release every per-window resource now. Returns how many windows were
    /// held.
    pub fn release(self) -> usize {
        let n = self.windows.len();
        drop(self);
        n
    }
}

impl<'a> IntoIterator for &'a WindowSet {
    type Item = &'a WindowInfo;
    type IntoIter = std::slice::Iter<'a, WindowInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.windows.iter()
    }
}

/// Enumerate up to `max` displays.
pub fn list_displays(max: usize) -> Vec<DisplayInfo> {
    display_sys::list_displays(max)
}

/// Enumerate up to `max` on-screen windows with their handles.
pub fn list_windows(max: usize) -> WindowSet {
    window_sys::list_windows(max)
}

/// Move the window behind `handle` so its top-left corner is at `(x, y)`.
pub fn move_window(handle: &WindowHandle, x: i32, y: i32) -> Result<()> {
    window_sys::move_window(handle, x, y)
}

/// Resize the window behind `handle` to `width` x `height`.
pub fn resize_window(handle: &WindowHandle, width: i32, height: i32) -> Result<()> {
    window_sys::resize_window(handle, width, height)
}
