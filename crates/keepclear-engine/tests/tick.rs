use std::sync::Arc;

use config::Config;
use keepclear_engine::{Placer, TickReport};
use mac_winops::{
    DisplayInfo, Rect,
    ops::{MockMutation, MockWinOps, MockWindow},
};

const TARGET: &str = "C27F390";

fn display(id: u32, name: &str, x: f64, y: f64, w: f64, h: f64) -> DisplayInfo {
    DisplayInfo {
        id,
        name: name.into(),
        frame: Rect::new(x, y, w, h),
    }
}

/// Mock with a built-in display on the left and the 1000x800 target at the origin.
fn mock_with_target() -> Arc<MockWinOps> {
    let mock = Arc::new(MockWinOps::new());
    mock.set_displays(vec![
        display(1, "Built-in Retina Display", -1440.0, 0.0, 1440.0, 900.0),
        display(7, TARGET, 0.0, 0.0, 1000.0, 800.0),
    ]);
    mock
}

fn placer(mock: &Arc<MockWinOps>) -> Placer {
    Placer::new(mock.clone(), &Config::default())
}

#[test]
fn overflowing_window_is_corrected() {
    let mock = mock_with_target();
    mock.set_windows(vec![MockWindow::new(1, 100.0, 50.0, 800.0, 400.0)]);
    let report = placer(&mock).tick();
    assert_eq!(
        report,
        TickReport {
            displays: 2,
            target: Some(7),
            windows: 1,
            corrected: 1,
            skipped_no_handle: 0,
            failed: 0,
            released: 1,
        }
    );
    assert_eq!(
        mock.mutations(),
        vec![
            MockMutation::Move { id: 1, x: 0, y: 50 },
            MockMutation::Resize {
                id: 1,
                width: 840,
                height: 400
            },
        ]
    );
    assert_eq!(
        mock.window(1).unwrap().frame,
        Rect::new(0.0, 50.0, 840.0, 400.0)
    );
}

#[test]
fn compliant_and_foreign_windows_are_untouched() {
    let mock = mock_with_target();
    mock.set_windows(vec![
        MockWindow::new(1, 0.0, 0.0, 700.0, 400.0),
        MockWindow::new(2, -50.0, 0.0, 200.0, 200.0),
        MockWindow::new(3, -1400.0, 0.0, 1400.0, 900.0),
    ]);
    let report = placer(&mock).tick();
    assert_eq!(report.windows, 3);
    assert_eq!(report.corrected, 0);
    assert!(mock.mutations().is_empty());
}

#[test]
fn windows_without_handle_are_never_mutated() {
    let mock = mock_with_target();
    mock.set_windows(vec![
        MockWindow::new(1, 100.0, 50.0, 800.0, 400.0).without_handle(),
        MockWindow::new(2, 500.0, 0.0, 500.0, 300.0),
    ]);
    let report = placer(&mock).tick();
    assert_eq!(report.skipped_no_handle, 1);
    assert_eq!(report.corrected, 1);
    assert!(mock.mutations().iter().all(|m| match m {
        MockMutation::Move { id, .. } | MockMutation::Resize { id, .. } => *id == 2,
    }));
    assert_eq!(mock.window(1).unwrap().frame.x, 100.0);
}

#[test]
fn missing_target_skips_window_enumeration() {
    let mock = Arc::new(MockWinOps::new());
    mock.set_displays(vec![display(
        1,
        "Built-in Retina Display",
        0.0,
        0.0,
        1000.0,
        800.0,
    )]);
    mock.set_windows(vec![MockWindow::new(1, 100.0, 50.0, 800.0, 400.0)]);
    let report = placer(&mock).tick();
    assert_eq!(report.target, None);
    assert_eq!(report.displays, 1);
    assert_eq!(mock.calls(), vec!["list_displays"]);
    assert!(mock.mutations().is_empty());
}

#[test]
fn no_displays_is_a_quiet_skip() {
    let mock = Arc::new(MockWinOps::new());
    let report = placer(&mock).tick();
    assert_eq!(report, TickReport::default());
    assert!(!mock.calls_contains("list_windows"));
}

#[test]
fn second_tick_is_a_no_op() {
    let mock = mock_with_target();
    mock.set_windows(vec![
        MockWindow::new(1, 100.0, 50.0, 800.0, 400.0),
        MockWindow::new(2, 600.0, 300.0, 390.0, 200.0),
    ]);
    let p = placer(&mock);
    assert_eq!(p.tick().corrected, 2);
    let after_first = mock.windows();
    assert_eq!(mock.mutations().len(), 4);

    assert_eq!(p.tick().corrected, 0);
    assert_eq!(mock.mutations().len(), 4);
    assert_eq!(mock.windows(), after_first);
}

#[test]
fn handles_are_released_every_tick() {
    let mock = mock_with_target();
    mock.set_windows(vec![
        MockWindow::new(1, 100.0, 50.0, 800.0, 400.0),
        MockWindow::new(2, 0.0, 0.0, 10.0, 10.0),
    ]);
    let p = placer(&mock);
    for _ in 0..3 {
        let r = p.tick();
        assert_eq!(r.released, 2);
        assert_eq!(mock.live_handles(), 0);
    }
}

#[test]
fn failed_mutations_are_counted_not_propagated() {
    let mock = mock_with_target();
    mock.set_windows(vec![MockWindow::new(1, 100.0, 50.0, 900.0, 400.0)]);
    mock.set_fail_resize(true);
    let p = placer(&mock);
    let r = p.tick();
    assert_eq!((r.corrected, r.failed), (1, 1));
    assert_eq!(mock.live_handles(), 0);
    // Moved but not resized: the right edge still sits in the margin.
    assert_eq!(
        mock.window(1).unwrap().frame,
        Rect::new(0.0, 50.0, 900.0, 400.0)
    );
    // The next tick retries the correction.
    mock.set_fail_resize(false);
    let r = p.tick();
    assert_eq!((r.corrected, r.failed), (1, 0));
    assert_eq!(
        mock.window(1).unwrap().frame,
        Rect::new(0.0, 50.0, 840.0, 400.0)
    );
}

#[test]
fn enumeration_bounds_come_from_config() {
    let mock = mock_with_target();
    mock.set_windows(
        (1..=8)
            .map(|i| MockWindow::new(i, 100.0, 10.0 * f64::from(i), 900.0, 100.0))
            .collect(),
    );
    let cfg = Config {
        max_windows: 5,
        max_displays: 1,
        ..Config::default()
    };
    // Only the first display is seen, and it is not the target.
    let r = Placer::new(mock.clone(), &cfg).tick();
    assert_eq!((r.displays, r.target), (1, None));

    let cfg = Config {
        max_windows: 5,
        ..Config::default()
    };
    let r = Placer::new(mock.clone(), &cfg).tick();
    assert_eq!((r.windows, r.corrected), (5, 5));
}

#[test]
fn custom_margin_fraction_is_honored() {
    let mock = mock_with_target();
    mock.set_windows(vec![MockWindow::new(1, 0.0, 0.0, 800.0, 400.0)]);
    let cfg = Config {
        margin_fraction: 0.75,
        ..Config::default()
    };
    let r = Placer::new(mock.clone(), &cfg).tick();
    assert_eq!(r.corrected, 1);
    assert_eq!(mock.window(1).unwrap().frame.w, 750.0);
}
