use std::{collections::HashMap, ffi::c_void};

use core_foundation::{
    array::{CFArray, CFArrayGetCount, CFArrayGetValueAtIndex},
    base::{CFTypeRef, TCFType},
    dictionary::CFDictionaryRef,
};
use core_graphics::window as cgw;
use tracing::{trace, warn};

use crate::{
    WindowInfo, WindowSet,
    ax::{AxCandidate, ax_set_point, ax_set_size, ax_windows_for_pid, cfstr},
    cfutil::{dict_get_i32, dict_get_rect, dict_get_string},
    error::{Error, Result},
    geom::{CGPoint, CGSize},
    handle::WindowHandle,
    select::pick_candidate,
};

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    fn CGWindowListCopyWindowInfo(option: u32, relativeToWindow: u32) -> CFTypeRef; // CFArrayRef
}

#[allow(non_snake_case)]
unsafe extern "C" {
    fn CFGetTypeID(cf: CFTypeRef) -> usize;
    fn CFDictionaryGetTypeID() -> usize;
}

const K_CG_WINDOW_LIST_OPTION_ON_SCREEN_ONLY: u32 = 1 << 0;
const K_CG_WINDOW_LIST_OPTION_EXCLUDE_DESKTOP_ELEMENTS: u32 = 1 << 4;

/// Enumerate up to `max` on-screen, layer-0 windows front to back.
///
/// Windows on other Spaces (including native full screen) are not on screen
/// and therefore never reported. Each owning process's `AXWindows` list is
/// read once per call; candidates not handed out are released on return.
pub(crate) fn list_windows(max: usize) -> WindowSet {
    trace!(max, "list_windows");
    let mut out = Vec::new();
    let mut by_pid: HashMap<i32, Vec<AxCandidate>> = HashMap::new();
    unsafe {
        let arr_ref = CGWindowListCopyWindowInfo(
            K_CG_WINDOW_LIST_OPTION_ON_SCREEN_ONLY
                | K_CG_WINDOW_LIST_OPTION_EXCLUDE_DESKTOP_ELEMENTS,
            0,
        );
        if arr_ref.is_null() {
            warn!("list_windows: CGWindowListCopyWindowInfo returned null");
            return WindowSet::new(out);
        }
        // Released when `arr` drops at the end of this block.
        let arr: CFArray<*const c_void> = CFArray::wrap_under_create_rule(arr_ref as _);
        let key_pid = cgw::kCGWindowOwnerPID;
        let key_layer = cgw::kCGWindowLayer;
        let key_num = cgw::kCGWindowNumber;
        let key_title = cgw::kCGWindowName;
        let key_bounds = cgw::kCGWindowBounds;
        for i in 0..CFArrayGetCount(arr.as_concrete_TypeRef()) {
            if out.len() >= max {
                break;
            }
            let item = CFArrayGetValueAtIndex(arr.as_concrete_TypeRef(), i) as CFTypeRef;
            if item.is_null() || CFGetTypeID(item) != CFDictionaryGetTypeID() {
                continue;
            }
            let d = item as CFDictionaryRef;
            // Menu bar extras, the Dock and overlays live on non-zero layers.
            if dict_get_i32(d, key_layer).unwrap_or(0) != 0 {
                continue;
            }
            let Some(pid) = dict_get_i32(d, key_pid) else {
                continue;
            };
            let id = match dict_get_i32(d, key_num) {
                Some(n) if n > 0 => n as u32,
                _ => continue,
            };
            let Some(frame) = dict_get_rect(d, key_bounds) else {
                continue;
            };
            let title = dict_get_string(d, key_title);
            let candidates = by_pid.entry(pid).or_insert_with(|| ax_windows_for_pid(pid));
            let handle = pick_candidate(candidates, |c| c.frame, &frame)
                .and_then(|i| candidates.get(i))
                .map(|c| WindowHandle::ax(c.elem.retained()));
            if handle.is_none() {
                trace!(id, pid, "list_windows: no AX element");
            }
            out.push(WindowInfo {
                id,
                pid,
                title,
                frame,
                handle,
            });
        }
    }
    WindowSet::new(out)
}

pub(crate) fn move_window(handle: &WindowHandle, x: i32, y: i32) -> Result<()> {
    let elem = handle.ax_elem().ok_or(Error::NoHandle)?;
    ax_set_point(
        elem.as_ptr(),
        cfstr("AXPosition"),
        CGPoint {
            x: f64::from(x),
            y: f64::from(y),
        },
    )
}

pub(crate) fn resize_window(handle: &WindowHandle, width: i32, height: i32) -> Result<()> {
    let elem = handle.ax_elem().ok_or(Error::NoHandle)?;
    ax_set_size(
        elem.as_ptr(),
        cfstr("AXSize"),
        CGSize {
            width: f64::from(width),
            height: f64::from(height),
        },
    )
}
