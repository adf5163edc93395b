use objc2::rc::Retained;
use objc2_app_kit::NSScreen;
use objc2_foundation::{MainThreadMarker, NSNumber, NSString};
use tracing::{trace, warn};

use crate::{DisplayId, DisplayInfo, geom};

/// Enumerate up to `max` displays in AppKit order (primary first).
///
/// AppKit requires the main thread; from any other thread this logs and
/// returns an empty list.
pub(crate) fn list_displays(max: usize) -> Vec<DisplayInfo> {
    let Some(mtm) = MainThreadMarker::new() else {
        warn!("list_displays: not on the main thread; no displays reported");
        return Vec::new();
    };
    let screens = NSScreen::screens(mtm);
    let primary_height = screens
        .iter()
        .next()
        .map(|s| s.frame().size.height)
        .unwrap_or(0.0);
    let mut out = Vec::new();
    for s in screens.iter().take(max) {
        let fr = s.frame();
        let info = DisplayInfo {
            id: screen_number(&s).unwrap_or(0),
            name: s.localizedName().to_string(),
            frame: geom::flip_appkit_frame(
                fr.origin.x,
                fr.origin.y,
                fr.size.width,
                fr.size.height,
                primary_height,
            ),
        };
        trace!(id = info.id, name = %info.name, frame = ?info.frame, "list_displays");
        out.push(info);
    }
    out
}

/// CoreGraphics display id stored under `NSScreenNumber`.
fn screen_number(screen: &Retained<NSScreen>) -> Option<DisplayId> {
    let desc = screen.deviceDescription();
    let key = NSString::from_str("NSScreenNumber");
    let value = desc.objectForKey(&key)?;
    let num = value.downcast::<NSNumber>().ok()?;
    Some(num.unsignedIntValue())
}
