//! Tick-scoped window handles.
//!
//! A [`WindowHandle`] is the capability to move or resize one window. It is
//! produced by an enumeration pass, owned by the [`crate::WindowSet`] that pass
//! returned, and released when that set is dropped. Handles are not `Clone`,
//! so a later tick can only operate on handles it acquired itself.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::WindowId;

#[cfg(target_os = "macos")]
pub(crate) use ax_elem::AXElem;

#[cfg(target_os = "macos")]
mod ax_elem {
    use std::{ffi::c_void, ptr::NonNull};

    use core_foundation::base::{CFRelease, CFTypeRef};

    #[link(name = "CoreFoundation", kind = "framework")]
    unsafe extern "C" {
        fn CFRetain(cf: CFTypeRef) -> CFTypeRef;
    }

    /// RAII guard that releases a retained AX element on drop.
    pub(crate) struct AXElem(NonNull<c_void>);

    impl AXElem {
        /// Take ownership of a +1 reference returned by a Create/Copy call.
        ///
        /// # Safety
        /// `ptr` must be null or an owned AXUIElementRef.
        #[inline]
        pub(crate) unsafe fn from_create(ptr: *mut c_void) -> Option<Self> {
            NonNull::new(ptr).map(Self)
        }

        /// Retain a borrowed element (e.g. one read out of a CFArray) so it
        /// stays valid after its container is released.
        #[inline]
        pub(crate) fn retain_from_borrowed(ptr: *mut c_void) -> Option<Self> {
            let nn = NonNull::new(ptr)?;
            unsafe { CFRetain(nn.as_ptr() as CFTypeRef) };
            Some(Self(nn))
        }

        /// Another owned reference to the same element.
        pub(crate) fn retained(&self) -> Self {
            unsafe { CFRetain(self.0.as_ptr() as CFTypeRef) };
            Self(self.0)
        }

        #[inline]
        pub(crate) fn as_ptr(&self) -> *mut c_void {
            self.0.as_ptr()
        }
    }

    impl Drop for AXElem {
        fn drop(&mut self) {
            unsafe { CFRelease(self.0.as_ptr() as CFTypeRef) };
        }
    }
}

/// Decrements a shared live-handle counter when the owning handle drops.
struct LiveGuard(Arc<AtomicUsize>);

impl LiveGuard {
    fn new(live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::SeqCst);
        Self(live)
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

enum Inner {
    #[cfg(target_os = "macos")]
    Ax(AXElem),
    /// Handle that refers to a window by id only; used by backends without a
    /// native element, such as [`crate::ops::MockWinOps`].
    Token {
        id: WindowId,
        _live: LiveGuard,
    },
}

/// Opaque capability to reposition a single window during one tick.
pub struct WindowHandle(Inner);

impl WindowHandle {
    #[cfg(target_os = "macos")]
    pub(crate) fn ax(elem: AXElem) -> Self {
        Self(Inner::Ax(elem))
    }

    /// Handle that identifies a window by id without a native element,
    /// counted in `live` until dropped.
    pub fn tracked_token(id: WindowId, live: Arc<AtomicUsize>) -> Self {
        Self(Inner::Token {
            id,
            _live: LiveGuard::new(live),
        })
    }

    /// Window id for token handles; `None` for native handles.
    pub fn token_id(&self) -> Option<WindowId> {
        match &self.0 {
            #[cfg(target_os = "macos")]
            Inner::Ax(_) => None,
            Inner::Token { id, .. } => Some(*id),
        }
    }

    #[cfg(target_os = "macos")]
    pub(crate) fn ax_elem(&self) -> Option<&AXElem> {
        match &self.0 {
            Inner::Ax(e) => Some(e),
            Inner::Token { .. } => None,
        }
    }
}

impl fmt::Debug for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            #[cfg(target_os = "macos")]
            Inner::Ax(e) => write!(f, "WindowHandle::Ax({:p})", e.as_ptr()),
            Inner::Token { id, .. } => write!(f, "WindowHandle::Token({id})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_tokens_release_on_drop() {
        let live = Arc::new(AtomicUsize::new(0));
        let a = WindowHandle::tracked_token(1, live.clone());
        let b = WindowHandle::tracked_token(2, live.clone());
        assert_eq!(live.load(Ordering::SeqCst), 2);
        assert_eq!(a.token_id(), Some(1));
        drop(a);
        assert_eq!(live.load(Ordering::SeqCst), 1);
        drop(b);
        assert_eq!(live.load(Ordering::SeqCst), 0);
    }
}
