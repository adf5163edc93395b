//! Target display lookup.

use mac_winops::DisplayInfo;

/// Find the display named `name`. The first exact match wins.
///
/// `None` is an ordinary outcome (display unplugged, asleep, or named
/// differently) and means the current tick has nothing to do.
pub fn resolve_target<'a>(displays: &'a [DisplayInfo], name: &str) -> Option<&'a DisplayInfo> {
    displays.iter().find(|d| d.name == name)
}
