// Geometry primitives shared by the display and window enumerators.
// All rectangles are global screen coordinates with a top-left origin and y
// growing downward (the CoreGraphics window-list convention). CGPoint/CGSize
// mirror CoreGraphics types (f64 fields) for AXValue interop.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CGPoint {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CGSize {
    pub width: f64,
    pub height: f64,
}

#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

/// Axis-aligned rectangle in global screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Build a rectangle, clamping negative extents to zero.
    #[inline]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }
    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        approx_eq(self.x, other.x, eps)
            && approx_eq(self.y, other.y, eps)
            && approx_eq(self.w, other.w, eps)
            && approx_eq(self.h, other.h, eps)
    }
}

impl From<(CGPoint, CGSize)> for Rect {
    fn from(v: (CGPoint, CGSize)) -> Self {
        let (p, s) = v;
        Self::new(p.x, p.y, s.width, s.height)
    }
}

impl From<Rect> for (CGPoint, CGSize) {
    fn from(r: Rect) -> Self {
        (
            CGPoint { x: r.x, y: r.y },
            CGSize {
                width: r.w,
                height: r.h,
            },
        )
    }
}

/// Convert an AppKit screen frame (bottom-left origin, y up) into the
/// top-left global space, given the height of the primary screen.
#[inline]
pub fn flip_appkit_frame(x: f64, y: f64, w: f64, h: f64, primary_height: f64) -> Rect {
    Rect::new(x, primary_height - (y + h), w, h)
}
