//! One placement pass.

use std::{sync::Arc, time::Duration};

use config::Config;
use mac_winops::{DisplayId, Rect, WindowHandle, WindowInfo, ops::WinOps};
use tracing::{debug, info, trace, warn};

use crate::{
    placement::{MarginPolicy, Placement},
    resolve::resolve_target,
};

/// Counters describing what a single tick observed and did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Displays enumerated.
    pub displays: usize,
    /// Id of the matched target display; `None` skips the rest of the tick.
    pub target: Option<DisplayId>,
    /// Windows enumerated (only when the target was found).
    pub windows: usize,
    /// Windows that intruded into the margin and were handed to the mutator
    /// (or logged, in dry-run mode).
    pub corrected: usize,
    /// Windows that intruded into the margin but had no handle.
    pub skipped_no_handle: usize,
    /// Corrections where the move or the resize call failed.
    pub failed: usize,
    /// Windows whose per-tick resources were released at the end of the tick.
    pub released: usize,
}

/// Drives the enumerate → resolve → classify → correct → release pass.
pub struct Placer {
    /// Platform collaborators.
    ops: Arc<dyn WinOps>,
    /// Display name to match each tick.
    target_display: String,
    /// Classification and correction rules.
    policy: MarginPolicy,
    /// Display enumeration bound.
    max_displays: usize,
    /// Window enumeration bound.
    max_windows: usize,
    /// Log corrections instead of applying them.
    dry_run: bool,
    /// Period of [`Placer::run`].
    pub(crate) interval: Duration,
}

impl Placer {
    /// Build a placer from a validated configuration.
    pub fn new(ops: Arc<dyn WinOps>, cfg: &Config) -> Self {
        Self {
            ops,
            target_display: cfg.target_display.clone(),
            policy: MarginPolicy::new(cfg.margin_fraction),
            max_displays: cfg.max_displays,
            max_windows: cfg.max_windows,
            dry_run: cfg.dry_run,
            interval: cfg.interval(),
        }
    }

    /// Run one full pass. Never fails: every anomaly is logged and absorbed.
    pub fn tick(&self) -> TickReport {
        let mut report = TickReport::default();
        let displays = self.ops.list_displays(self.max_displays);
        report.displays = displays.len();
        let Some(target) = resolve_target(&displays, &self.target_display) else {
            debug!(
                displays = report.displays,
                target = %self.target_display,
                "target display not found; skipping tick"
            );
            return report;
        };
        report.target = Some(target.id);

        // Owns every handle acquired this tick; released below or on unwind.
        let windows = self.ops.list_windows(self.max_windows);
        report.windows = windows.len();
        for w in &windows {
            let Some(fix) = self.policy.decide(&target.frame, &w.frame).correction() else {
                continue;
            };
            let Some(handle) = w.handle.as_ref() else {
                trace!(id = w.id, pid = w.pid, "overflowing window has no handle");
                report.skipped_no_handle += 1;
                continue;
            };
            report.corrected += 1;
            if !self.apply(handle, w, fix) {
                report.failed += 1;
            }
        }
        report.released = windows.release();
        report
    }

    /// Move then resize; both calls are attempted regardless of the other's
    /// outcome. Returns `false` if either failed.
    fn apply(&self, handle: &WindowHandle, w: &WindowInfo, fix: Rect) -> bool {
        let p = Placement::from(fix);
        info!(
            id = w.id,
            pid = w.pid,
            title = w.title.as_deref().unwrap_or(""),
            from = ?w.frame,
            x = p.x,
            y = p.y,
            width = p.width,
            height = p.height,
            dry_run = self.dry_run,
            "correcting window"
        );
        if self.dry_run {
            return true;
        }
        let mut ok = true;
        if let Err(e) = self.ops.move_window(handle, p.x, p.y) {
            warn!(id = w.id, error = %e, "move failed");
            ok = false;
        }
        if let Err(e) = self.ops.resize_window(handle, p.width, p.height) {
            warn!(id = w.id, error = %e, "resize failed");
            ok = false;
        }
        ok
    }
}

#[cfg(test)]
mod tests {
    use mac_winops::{
        DisplayInfo,
        ops::{MockMutation, MockWinOps, MockWindow},
    };

    use super::*;

    fn setup(cfg: &Config) -> (Arc<MockWinOps>, Placer) {
        let mock = Arc::new(MockWinOps::new());
        mock.set_displays(vec![
            DisplayInfo {
                id: 1,
                name: "Built-in Retina Display".into(),
                frame: Rect::new(-1440.0, 0.0, 1440.0, 900.0),
            },
            DisplayInfo {
                id: 2,
                name: cfg.target_display.clone(),
                frame: Rect::new(0.0, 0.0, 1000.0, 800.0),
            },
        ]);
        let placer = Placer::new(mock.clone(), cfg);
        (mock, placer)
    }

    #[test]
    fn dry_run_classifies_without_mutating() {
        let cfg = Config {
            dry_run: true,
            ..Config::default()
        };
        let (mock, placer) = setup(&cfg);
        mock.set_windows(vec![MockWindow::new(1, 100.0, 50.0, 800.0, 400.0)]);
        let r = placer.tick();
        assert_eq!(r.corrected, 1);
        assert!(mock.mutations().is_empty());
        assert_eq!(mock.window(1).unwrap().frame.x, 100.0);
    }

    #[test]
    fn move_failure_still_attempts_resize() {
        let (mock, placer) = setup(&Config::default());
        mock.set_windows(vec![MockWindow::new(4, 100.0, 50.0, 800.0, 400.0)]);
        mock.set_fail_move(true);
        let r = placer.tick();
        assert_eq!((r.corrected, r.failed), (1, 1));
        assert_eq!(
            mock.mutations(),
            vec![
                MockMutation::Move { id: 4, x: 0, y: 50 },
                MockMutation::Resize {
                    id: 4,
                    width: 840,
                    height: 400
                },
            ]
        );
        // Partially applied: resized but not moved.
        assert_eq!(
            mock.window(4).unwrap().frame,
            Rect::new(100.0, 50.0, 840.0, 400.0)
        );
    }
}
