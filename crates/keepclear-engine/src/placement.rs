//! The margin placement policy.
//!
//! A window belongs to the target display when its left edge lies in
//! `[target.x, target.x + target.w)`. A member window overflows when its right
//! edge passes `target.x + target.w * fraction`; the rightmost
//! `1 - fraction` of the display is reserved. Overflowing windows are
//! left-aligned to the display origin and clamped to exactly
//! `target.w * fraction` wide, keeping their y and height.
//!
//! The policy is a pure function of the two rectangles, so applying it to a
//! corrected window yields no further change.

use mac_winops::Rect;

/// Outcome of classifying one window against the target display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Left edge is outside the target display.
    OffDisplay,
    /// On the target display and clear of the reserved margin.
    Fits,
    /// On the target display and intruding into the margin; move and resize
    /// to the contained rectangle.
    Correct(Rect),
}

impl Decision {
    /// The corrected rectangle, if any.
    pub fn correction(&self) -> Option<Rect> {
        match self {
            Self::Correct(r) => Some(*r),
            Self::OffDisplay | Self::Fits => None,
        }
    }
}

/// Integer geometry handed to the window mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in points.
    pub width: i32,
    /// Height in points.
    pub height: i32,
}

impl From<Rect> for Placement {
    /// Truncates toward zero.
    fn from(r: Rect) -> Self {
        Self {
            x: r.x as i32,
            y: r.y as i32,
            width: r.w as i32,
            height: r.h as i32,
        }
    }
}

/// Keep windows out of the right-hand margin of a display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarginPolicy {
    /// Usable share of the display width.
    fraction: f64,
}

impl Default for MarginPolicy {
    fn default() -> Self {
        Self::new(config::DEFAULT_MARGIN_FRACTION)
    }
}

impl MarginPolicy {
    /// `fraction` is the usable share of the display width, in `(0, 1]`.
    pub fn new(fraction: f64) -> Self {
        Self { fraction }
    }

    /// Usable width on `target`.
    pub fn usable_width(&self, target: &Rect) -> f64 {
        target.w * self.fraction
    }

    /// x-coordinate where the reserved margin begins.
    pub fn boundary(&self, target: &Rect) -> f64 {
        target.x + self.usable_width(target)
    }

    /// Membership test: only the left edge is considered, so a window that
    /// straddles two displays belongs to the one holding its left edge.
    pub fn is_on(&self, target: &Rect, win: &Rect) -> bool {
        win.left() >= target.left() && win.left() < target.right()
    }

    /// Overflow test: right edge beyond the margin boundary.
    pub fn overflows(&self, target: &Rect, win: &Rect) -> bool {
        win.right() > self.boundary(target)
    }

    /// Classify `win` against `target`.
    pub fn decide(&self, target: &Rect, win: &Rect) -> Decision {
        if !self.is_on(target, win) {
            return Decision::OffDisplay;
        }
        if !self.overflows(target, win) {
            return Decision::Fits;
        }
        Decision::Correct(Rect {
            x: target.x,
            y: win.y,
            w: self.usable_width(target),
            h: win.h,
        })
    }
}
