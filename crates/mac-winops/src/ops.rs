use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use parking_lot::Mutex;

use crate::{
    DisplayInfo, Rect, Result as WinResult, WindowHandle, WindowId, WindowInfo, WindowSet,
    error::Error, list_displays, list_windows, move_window, resize_window,
};

/// Trait abstraction over the platform collaborators to improve testability.
pub trait WinOps: Send + Sync {
    /// Whether the process is trusted for Accessibility. Implementations may
    /// ask the system to prompt the user.
    fn accessibility_ok(&self) -> bool;
    fn list_displays(&self, max: usize) -> Vec<DisplayInfo>;
    fn list_windows(&self, max: usize) -> WindowSet;
    fn move_window(&self, handle: &WindowHandle, x: i32, y: i32) -> WinResult<()>;
    fn resize_window(&self, handle: &WindowHandle, width: i32, height: i32) -> WinResult<()>;
}

/// Production implementation of WinOps delegating to crate functions.
pub struct RealWinOps;

impl WinOps for RealWinOps {
    fn accessibility_ok(&self) -> bool {
        permissions::request_accessibility()
    }
    fn list_displays(&self, max: usize) -> Vec<DisplayInfo> {
        list_displays(max)
    }
    fn list_windows(&self, max: usize) -> WindowSet {
        list_windows(max)
    }
    fn move_window(&self, handle: &WindowHandle, x: i32, y: i32) -> WinResult<()> {
        move_window(handle, x, y)
    }
    fn resize_window(&self, handle: &WindowHandle, width: i32, height: i32) -> WinResult<()> {
        resize_window(handle, width, height)
    }
}

/// Window description held by [`MockWinOps`]; materialized into a fresh
/// [`WindowInfo`] on every enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct MockWindow {
    pub id: WindowId,
    pub pid: i32,
    pub title: Option<String>,
    pub frame: Rect,
    /// Whether enumeration yields a handle for this window.
    pub has_handle: bool,
}

impl MockWindow {
    /// Movable window with the given frame.
    pub fn new(id: WindowId, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            id,
            pid: 100 + id as i32,
            title: Some(format!("window {id}")),
            frame: Rect::new(x, y, w, h),
            has_handle: true,
        }
    }

    /// Same window, but without an Accessibility handle.
    pub fn without_handle(mut self) -> Self {
        self.has_handle = false;
        self
    }
}

/// Mutation observed by [`MockWinOps`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockMutation {
    Move { id: WindowId, x: i32, y: i32 },
    Resize { id: WindowId, width: i32, height: i32 },
}

/// Simple mock implementation for tests.
///
/// Successful mutations are applied to the stored window frames, so repeated
/// enumerations observe the effect of earlier ticks.
#[derive(Clone, Default)]
pub struct MockWinOps {
    calls: Arc<Mutex<Vec<String>>>,
    displays: Arc<Mutex<Vec<DisplayInfo>>>,
    windows: Arc<Mutex<Vec<MockWindow>>>,
    mutations: Arc<Mutex<Vec<MockMutation>>>,
    live_handles: Arc<AtomicUsize>,
    deny_accessibility: Arc<AtomicBool>,
    fail_move: Arc<AtomicBool>,
    fail_resize: Arc<AtomicBool>,
}

impl MockWinOps {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_displays(&self, displays: Vec<DisplayInfo>) {
        *self.displays.lock() = displays;
    }
    pub fn set_windows(&self, wins: Vec<MockWindow>) {
        *self.windows.lock() = wins;
    }
    pub fn windows(&self) -> Vec<MockWindow> {
        self.windows.lock().clone()
    }
    pub fn window(&self, id: WindowId) -> Option<MockWindow> {
        self.windows.lock().iter().find(|w| w.id == id).cloned()
    }
    pub fn set_accessibility(&self, granted: bool) {
        self.deny_accessibility.store(!granted, Ordering::SeqCst);
    }
    pub fn set_fail_move(&self, v: bool) {
        self.fail_move.store(v, Ordering::SeqCst);
    }
    pub fn set_fail_resize(&self, v: bool) {
        self.fail_resize.store(v, Ordering::SeqCst);
    }
    /// Every collaborator call, in order, by name.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
    pub fn calls_contains(&self, s: &str) -> bool {
        self.calls.lock().iter().any(|x| x == s)
    }
    pub fn call_count(&self, s: &str) -> usize {
        self.calls.lock().iter().filter(|x| *x == s).count()
    }
    /// Attempted mutations, including ones configured to fail.
    pub fn mutations(&self) -> Vec<MockMutation> {
        self.mutations.lock().clone()
    }
    /// Handles handed out by `list_windows` that have not been dropped yet.
    pub fn live_handles(&self) -> usize {
        self.live_handles.load(Ordering::SeqCst)
    }
    fn note(&self, s: &str) {
        self.calls.lock().push(s.to_string());
    }
    fn apply(&self, id: WindowId, f: impl FnOnce(&mut Rect)) {
        if let Some(w) = self.windows.lock().iter_mut().find(|w| w.id == id) {
            f(&mut w.frame);
        }
    }
}

impl WinOps for MockWinOps {
    fn accessibility_ok(&self) -> bool {
        self.note("accessibility_ok");
        !self.deny_accessibility.load(Ordering::SeqCst)
    }
    fn list_displays(&self, max: usize) -> Vec<DisplayInfo> {
        self.note("list_displays");
        self.displays.lock().iter().take(max).cloned().collect()
    }
    fn list_windows(&self, max: usize) -> WindowSet {
        self.note("list_windows");
        let wins = self
            .windows
            .lock()
            .iter()
            .take(max)
            .map(|w| WindowInfo {
                id: w.id,
                pid: w.pid,
                title: w.title.clone(),
                frame: w.frame,
                handle: w
                    .has_handle
                    .then(|| WindowHandle::tracked_token(w.id, self.live_handles.clone())),
            })
            .collect();
        WindowSet::new(wins)
    }
    fn move_window(&self, handle: &WindowHandle, x: i32, y: i32) -> WinResult<()> {
        self.note("move_window");
        let id = handle.token_id().ok_or(Error::NoHandle)?;
        self.mutations.lock().push(MockMutation::Move { id, x, y });
        if self.fail_move.load(Ordering::SeqCst) {
            return Err(Error::AxCode(-25200));
        }
        self.apply(id, |r| {
            r.x = f64::from(x);
            r.y = f64::from(y);
        });
        Ok(())
    }
    fn resize_window(&self, handle: &WindowHandle, width: i32, height: i32) -> WinResult<()> {
        self.note("resize_window");
        let id = handle.token_id().ok_or(Error::NoHandle)?;
        self.mutations.lock().push(MockMutation::Resize { id, width, height });
        if self.fail_resize.load(Ordering::SeqCst) {
            return Err(Error::WindowGone);
        }
        self.apply(id, |r| {
            r.w = f64::from(width.max(0));
            r.h = f64::from(height.max(0));
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_lists_fresh_handles_and_applies_mutations() {
        let mock = MockWinOps::new();
        mock.set_windows(vec![
            MockWindow::new(1, 10.0, 20.0, 300.0, 200.0),
            MockWindow::new(2, 0.0, 0.0, 50.0, 50.0).without_handle(),
        ]);
        let set = mock.list_windows(100);
        assert_eq!(set.len(), 2);
        assert_eq!(mock.live_handles(), 1);
        let h = set.iter().find_map(|w| w.handle.as_ref()).unwrap();
        mock.move_window(h, 5, 6).unwrap();
        mock.resize_window(h, 70, 80).unwrap();
        drop(set);
        assert_eq!(mock.live_handles(), 0);
        assert_eq!(
            mock.window(1).unwrap().frame,
            Rect::new(5.0, 6.0, 70.0, 80.0)
        );
        assert_eq!(
            mock.calls(),
            vec!["list_windows", "move_window", "resize_window"]
        );
    }

    #[test]
    fn failing_mutations_leave_frames_alone() {
        let mock = MockWinOps::new();
        mock.set_windows(vec![MockWindow::new(7, 10.0, 20.0, 300.0, 200.0)]);
        mock.set_fail_move(true);
        let set = mock.list_windows(100);
        let h = set.iter().next().and_then(|w| w.handle.as_ref()).unwrap();
        assert!(mock.move_window(h, 0, 0).is_err());
        assert_eq!(mock.mutations().len(), 1);
        assert_eq!(mock.window(7).unwrap().frame.x, 10.0);
    }

    #[test]
    fn enumeration_respects_max() {
        let mock = MockWinOps::new();
        mock.set_windows((1..=5).map(|i| MockWindow::new(i, 0.0, 0.0, 1.0, 1.0)).collect());
        assert_eq!(mock.list_windows(3).len(), 3);
    }
}
