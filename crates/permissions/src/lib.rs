//! Simple, macOS-only permission checks for keepclear.
//!
//! This crate exposes a minimal API to query whether the process is trusted
//! for Accessibility, which is required to read and move other applications'
//! windows. It calls into ApplicationServices and returns a boolean.
//!
//! Notes
//! - `accessibility_ok()` checks the permission without any UI.
//! - `request_accessibility()` checks it and, if missing, asks the system to
//!   show its Accessibility prompt pointing the user at System Settings.
//!
//! On platforms other than macOS both report `false`.

#[cfg(target_os = "macos")]
mod sys {
    use core_foundation::{
        base::TCFType,
        boolean::CFBoolean,
        dictionary::{CFDictionary, CFDictionaryRef},
        string::{CFString, CFStringRef},
    };

    #[link(name = "ApplicationServices", kind = "framework")]
    unsafe extern "C" {
        fn AXIsProcessTrusted() -> bool;
        fn AXIsProcessTrustedWithOptions(options: CFDictionaryRef) -> bool;
        static kAXTrustedCheckOptionPrompt: CFStringRef;
    }

    pub(crate) fn trusted() -> bool {
        unsafe { AXIsProcessTrusted() }
    }

    pub(crate) fn trusted_with_prompt(prompt: bool) -> bool {
        let key = unsafe { CFString::wrap_under_get_rule(kAXTrustedCheckOptionPrompt) };
        let value = if prompt {
            CFBoolean::true_value()
        } else {
            CFBoolean::false_value()
        };
        let options = CFDictionary::from_CFType_pairs(&[(key.as_CFType(), value.as_CFType())]);
        unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) }
    }
}

#[cfg(not(target_os = "macos"))]
mod sys {
    pub(crate) fn trusted() -> bool {
        false
    }

    pub(crate) fn trusted_with_prompt(_prompt: bool) -> bool {
        false
    }
}

/// Check if the process has the "Accessibility" permission.
///
/// Performs no prompting and has no side effects.
pub fn accessibility_ok() -> bool {
    sys::trusted()
}

/// Check the Accessibility permission, asking the system to prompt the user
/// when it is missing.
///
/// The prompt is asynchronous: the return value reflects the state at the
/// time of the call, so a freshly granted permission is only observed on the
/// next launch.
pub fn request_accessibility() -> bool {
    sys::trusted_with_prompt(true)
}
