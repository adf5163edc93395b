use std::{cell::RefCell, collections::HashMap, ffi::c_void, ptr, thread_local};

use core_foundation::{
    array::{CFArray, CFArrayGetCount, CFArrayGetValueAtIndex},
    base::{CFRelease, CFTypeRef, TCFType},
    string::{CFString, CFStringRef},
};
use tracing::trace;

use crate::{
    error::{Error, Result},
    geom::{CGPoint, CGSize, Rect},
    handle::AXElem,
};

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXUIElementCreateApplication(pid: i32) -> *mut c_void;
    fn AXUIElementCopyAttributeValue(
        element: *mut c_void,
        attr: CFStringRef,
        value: *mut CFTypeRef,
    ) -> i32;
    fn AXUIElementSetAttributeValue(element: *mut c_void, attr: CFStringRef, value: CFTypeRef)
    -> i32;

    // AXValue helpers for CGPoint/CGSize
    fn AXValueCreate(theType: i32, valuePtr: *const c_void) -> CFTypeRef;
    fn AXValueGetValue(theValue: CFTypeRef, theType: i32, valuePtr: *mut c_void) -> bool;
}

// AXValue type constants (per Apple docs)
const K_AX_VALUE_CGPOINT_TYPE: i32 = 1;
const K_AX_VALUE_CGSIZE_TYPE: i32 = 2;
// AX error for invalid UI element (window closed / stale reference)
const K_AX_ERROR_INVALID_UI_ELEMENT: i32 = -25202;

thread_local! {
    static ATTR_STRINGS: RefCell<HashMap<&'static str, CFString>> = RefCell::new(HashMap::new());
}

pub(crate) fn cfstr(name: &'static str) -> CFStringRef {
    // Stable CFStringRef per attribute name; avoids toll-free bridging of
    // static strings, which trips pointer authentication on recent macOS.
    ATTR_STRINGS.with(|cell| {
        let mut m = cell.borrow_mut();
        let s = m.entry(name).or_insert_with(|| CFString::new(name));
        s.as_concrete_TypeRef()
    })
}

fn map_err(err: i32) -> Error {
    if err == K_AX_ERROR_INVALID_UI_ELEMENT {
        Error::WindowGone
    } else {
        Error::AxCode(err)
    }
}

fn ax_copy(element: *mut c_void, attr: CFStringRef) -> Result<CFTypeRef> {
    let mut v: CFTypeRef = ptr::null_mut();
    let err = unsafe { AXUIElementCopyAttributeValue(element, attr, &mut v) };
    if err != 0 {
        return Err(map_err(err));
    }
    if v.is_null() {
        return Err(Error::Unsupported);
    }
    Ok(v)
}

pub(crate) fn ax_get_point(element: *mut c_void, attr: CFStringRef) -> Result<CGPoint> {
    let v = ax_copy(element, attr)?;
    let mut p = CGPoint { x: 0.0, y: 0.0 };
    let ok =
        unsafe { AXValueGetValue(v, K_AX_VALUE_CGPOINT_TYPE, &mut p as *mut _ as *mut c_void) };
    unsafe { CFRelease(v) };
    if !ok {
        return Err(Error::Unsupported);
    }
    Ok(p)
}

pub(crate) fn ax_get_size(element: *mut c_void, attr: CFStringRef) -> Result<CGSize> {
    let v = ax_copy(element, attr)?;
    let mut s = CGSize {
        width: 0.0,
        height: 0.0,
    };
    let ok = unsafe { AXValueGetValue(v, K_AX_VALUE_CGSIZE_TYPE, &mut s as *mut _ as *mut c_void) };
    unsafe { CFRelease(v) };
    if !ok {
        return Err(Error::Unsupported);
    }
    Ok(s)
}

pub(crate) fn ax_set_point(element: *mut c_void, attr: CFStringRef, p: CGPoint) -> Result<()> {
    let v = unsafe { AXValueCreate(K_AX_VALUE_CGPOINT_TYPE, &p as *const _ as *const c_void) };
    if v.is_null() {
        return Err(Error::Unsupported);
    }
    let err = unsafe { AXUIElementSetAttributeValue(element, attr, v) };
    unsafe { CFRelease(v) };
    if err != 0 {
        return Err(map_err(err));
    }
    Ok(())
}

pub(crate) fn ax_set_size(element: *mut c_void, attr: CFStringRef, s: CGSize) -> Result<()> {
    let v = unsafe { AXValueCreate(K_AX_VALUE_CGSIZE_TYPE, &s as *const _ as *const c_void) };
    if v.is_null() {
        return Err(Error::Unsupported);
    }
    let err = unsafe { AXUIElementSetAttributeValue(element, attr, v) };
    unsafe { CFRelease(v) };
    if err != 0 {
        return Err(map_err(err));
    }
    Ok(())
}

fn ax_frame(element: *mut c_void) -> Option<Rect> {
    let p = ax_get_point(element, cfstr("AXPosition")).ok()?;
    let s = ax_get_size(element, cfstr("AXSize")).ok()?;
    Some(Rect::from((p, s)))
}

/// One entry of an application's `AXWindows` list with its AX frame.
pub(crate) struct AxCandidate {
    pub(crate) elem: AXElem,
    pub(crate) frame: Option<Rect>,
}

/// Every `AXWindows` element of `pid`, each retained and paired with its
/// frame. Empty when the process exposes no windows or cannot be queried.
pub(crate) fn ax_windows_for_pid(pid: i32) -> Vec<AxCandidate> {
    let Some(app) = (unsafe { AXElem::from_create(AXUIElementCreateApplication(pid)) }) else {
        return Vec::new();
    };
    let Ok(wins_ref) = ax_copy(app.as_ptr(), cfstr("AXWindows")) else {
        return Vec::new();
    };
    let arr = unsafe { CFArray::<*const c_void>::wrap_under_create_rule(wins_ref as _) };
    let n = unsafe { CFArrayGetCount(arr.as_concrete_TypeRef()) };
    let mut out = Vec::new();
    for i in 0..n {
        let w = unsafe { CFArrayGetValueAtIndex(arr.as_concrete_TypeRef(), i) } as *mut c_void;
        // Retained so the element outlives `arr`.
        let Some(elem) = AXElem::retain_from_borrowed(w) else {
            continue;
        };
        let frame = ax_frame(elem.as_ptr());
        out.push(AxCandidate { elem, frame });
    }
    trace!(pid, candidates = out.len(), "ax_windows_for_pid");
    out
}
