use std::{sync::Arc, time::Duration};

use config::Config;
use keepclear_engine::{Error, Placer, ensure_accessibility};
use mac_winops::{
    DisplayInfo, Rect,
    ops::{MockWinOps, MockWindow},
};
use tokio::{task::JoinHandle, time::sleep};
use tokio_util::sync::CancellationToken;

fn mock() -> Arc<MockWinOps> {
    let mock = Arc::new(MockWinOps::new());
    mock.set_displays(vec![DisplayInfo {
        id: 1,
        name: "C27F390".into(),
        frame: Rect::new(0.0, 0.0, 1000.0, 800.0),
    }]);
    mock.set_windows(vec![MockWindow::new(1, 100.0, 50.0, 800.0, 400.0)]);
    mock
}

fn spawn_loop(mock: &Arc<MockWinOps>, cfg: &Config) -> (CancellationToken, JoinHandle<()>) {
    let placer = Arc::new(Placer::new(mock.clone(), cfg));
    let cancel = CancellationToken::new();
    let c = cancel.clone();
    let task = tokio::spawn(async move { placer.run(c).await });
    (cancel, task)
}

#[tokio::test(start_paused = true)]
async fn first_pass_runs_after_one_period() {
    let mock = mock();
    let (cancel, task) = spawn_loop(&mock, &Config::default());

    sleep(Duration::from_millis(2_900)).await;
    assert_eq!(mock.call_count("list_displays"), 0);

    sleep(Duration::from_millis(200)).await;
    assert_eq!(mock.call_count("list_displays"), 1);
    assert_eq!(mock.window(1).unwrap().frame.w, 840.0);

    cancel.cancel();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn passes_repeat_every_period() {
    let mock = mock();
    let (cancel, task) = spawn_loop(&mock, &Config::default());

    // Firings at 3s, 6s, 9s.
    sleep(Duration::from_millis(9_100)).await;
    assert_eq!(mock.call_count("list_displays"), 3);
    assert_eq!(mock.call_count("list_windows"), 3);
    // Only the first pass had anything to correct.
    assert_eq!(mock.mutations().len(), 2);
    assert_eq!(mock.live_handles(), 0);

    cancel.cancel();
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn cancellation_stops_the_loop() {
    let mock = mock();
    let cfg = Config {
        interval_ms: 100,
        ..Config::default()
    };
    let (cancel, task) = spawn_loop(&mock, &cfg);
    sleep(Duration::from_millis(250)).await;
    cancel.cancel();
    task.await.unwrap();
    let seen = mock.call_count("list_displays");
    assert_eq!(seen, 2);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(mock.call_count("list_displays"), seen);
}

#[tokio::test(start_paused = true)]
async fn target_appearing_later_is_picked_up() {
    let mock = Arc::new(MockWinOps::new());
    mock.set_windows(vec![MockWindow::new(1, 100.0, 50.0, 800.0, 400.0)]);
    let (cancel, task) = spawn_loop(&mock, &Config::default());

    sleep(Duration::from_millis(3_100)).await;
    assert!(mock.mutations().is_empty());

    mock.set_displays(vec![DisplayInfo {
        id: 9,
        name: "C27F390".into(),
        frame: Rect::new(0.0, 0.0, 1000.0, 800.0),
    }]);
    sleep(Duration::from_millis(3_000)).await;
    assert_eq!(mock.mutations().len(), 2);

    cancel.cancel();
    task.await.unwrap();
}

#[test]
fn denied_permission_stops_before_enumeration() {
    let mock = mock();
    mock.set_accessibility(false);
    let err = ensure_accessibility(mock.as_ref()).unwrap_err();
    assert!(matches!(err, Error::PermissionDenied));
    assert!(err.to_string().contains("Accessibility permissions are not granted"));
    assert_eq!(mock.calls(), vec!["accessibility_ok"]);
}

#[test]
fn granted_permission_passes() {
    let mock = mock();
    ensure_accessibility(mock.as_ref()).unwrap();
    assert!(!mock.calls_contains("list_displays"));
}
