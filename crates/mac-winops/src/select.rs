//! Matching a window-list entry to one of its owner's Accessibility windows.

use crate::geom::Rect;

/// Tolerance when matching an AX frame against window-list bounds.
pub(crate) const FRAME_MATCH_EPS: f64 = 1.0;

/// Pick the candidate for a window with `bounds`.
///
/// The first candidate whose frame matches `bounds` within
/// [`FRAME_MATCH_EPS`] wins. Without a match the last candidate is used,
/// since the window list and `AXWindows` may disagree briefly while a window
/// moves. `None` only when there are no candidates.
pub(crate) fn pick_candidate<T>(
    candidates: &[T],
    frame_of: impl Fn(&T) -> Option<Rect>,
    bounds: &Rect,
) -> Option<usize> {
    candidates
        .iter()
        .position(|c| frame_of(c).is_some_and(|f| f.approx_eq(bounds, FRAME_MATCH_EPS)))
        .or_else(|| candidates.len().checked_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> Vec<Option<Rect>> {
        vec![
            Some(Rect::new(0.0, 25.0, 800.0, 600.0)),
            None,
            Some(Rect::new(200.0, 100.0, 640.0, 480.0)),
            Some(Rect::new(900.0, 25.0, 400.0, 300.0)),
        ]
    }

    #[test]
    fn frame_match_wins_over_position() {
        let f = frames();
        let bounds = Rect::new(200.5, 99.6, 640.0, 480.0);
        assert_eq!(pick_candidate(&f, |r| *r, &bounds), Some(2));
    }

    #[test]
    fn unmatched_falls_back_to_last() {
        let f = frames();
        let bounds = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert_eq!(pick_candidate(&f, |r| *r, &bounds), Some(3));
    }

    #[test]
    fn each_window_of_one_app_gets_its_own_element() {
        // One candidate list serves every window-list entry of the same pid.
        let f = frames();
        let picks: Vec<_> = [
            Rect::new(0.0, 25.0, 800.0, 600.0),
            Rect::new(200.0, 100.0, 640.0, 480.0),
            Rect::new(900.0, 25.0, 400.0, 300.0),
        ]
        .iter()
        .map(|b| pick_candidate(&f, |r| *r, b))
        .collect();
        assert_eq!(picks, vec![Some(0), Some(2), Some(3)]);
    }

    #[test]
    fn no_candidates() {
        let f: Vec<Option<Rect>> = Vec::new();
        assert_eq!(pick_candidate(&f, |r| *r, &Rect::new(0.0, 0.0, 1.0, 1.0)), None);
    }
}
