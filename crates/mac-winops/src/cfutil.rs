use core_foundation::{
    base::TCFType,
    dictionary::{CFDictionaryGetValue, CFDictionaryRef},
    number::CFNumber,
    string::{CFString, CFStringRef},
};

use crate::geom::Rect;

#[inline]
fn dict_get(dict: CFDictionaryRef, key: CFStringRef) -> *const core::ffi::c_void {
    unsafe { CFDictionaryGetValue(dict, key as *const core::ffi::c_void) }
}

/// Get a String value for the given CFDictionary key.
pub(crate) fn dict_get_string(dict: CFDictionaryRef, key: CFStringRef) -> Option<String> {
    let value = dict_get(dict, key);
    if value.is_null() {
        return None;
    }
    // SAFETY: value borrowed from the dictionary; wrap under get rule.
    let cf = unsafe { CFString::wrap_under_get_rule(value as CFStringRef) };
    Some(cf.to_string())
}

/// Get a 32-bit integer from CFDictionary for the given key.
pub(crate) fn dict_get_i32(dict: CFDictionaryRef, key: CFStringRef) -> Option<i32> {
    let value = dict_get(dict, key);
    if value.is_null() {
        return None;
    }
    let n = unsafe { CFNumber::wrap_under_get_rule(value as _) };
    n.to_i64().and_then(|v| i32::try_from(v).ok())
}

/// Get an f64 from CFDictionary for the given key.
pub(crate) fn dict_get_f64(dict: CFDictionaryRef, key: CFStringRef) -> Option<f64> {
    let value = dict_get(dict, key);
    if value.is_null() {
        return None;
    }
    let n = unsafe { CFNumber::wrap_under_get_rule(value as _) };
    n.to_f64()
}

/// Decode a `kCGWindowBounds`-style rectangle dictionary stored under `key`.
pub(crate) fn dict_get_rect(dict: CFDictionaryRef, key: CFStringRef) -> Option<Rect> {
    let inner = dict_get(dict, key);
    if inner.is_null() {
        return None;
    }
    let inner = inner as CFDictionaryRef;
    let field = |name: &'static str| {
        let k = CFString::from_static_string(name);
        dict_get_f64(inner, k.as_concrete_TypeRef())
    };
    Some(Rect::new(
        field("X")?,
        field("Y")?,
        field("Width")?,
        field("Height")?,
    ))
}
