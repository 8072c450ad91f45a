//! View state and the document-to-window transform
//!
//! Coordinates come in two flavors: document units (whatever the SVG was
//! authored in) and viewport pixels. [`View`] owns the interactive state and
//! produces the [`ViewTransform`] mapping one into the other.
use std::ops::{Add, Sub};

pub type Scalar = f64;

/// Comparison tolerance for view math
pub const EPSILON: Scalar = 1e-9;
/// Pan offset applied by a single arrow key press, in document fractions
pub const PAN_STEP: Scalar = 0.05;
/// Zoom multiplier applied by a single zoom key press
pub const ZOOM_STEP: Scalar = 1.25;
/// Smallest allowed zoom
pub const MIN_ZOOM: Scalar = 0.0625;
/// Largest allowed zoom
pub const MAX_ZOOM: Scalar = 64.0;

/// Value representing a 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point(pub [Scalar; 2]);

impl Point {
    #[inline]
    pub fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(&self) -> Scalar {
        self.0[0]
    }

    /// Get `y` component of the point
    #[inline]
    pub fn y(self) -> Scalar {
        self.0[1]
    }

    /// Determine if self is close to the other within the margin of error
    pub fn is_close_to(self, other: Point) -> bool {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        (x0 - x1).abs() < EPSILON && (y0 - y1).abs() < EPSILON
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

/// Viewport size in whole pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A zero-area viewport cannot be rendered into (minimized window)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// How the document is scaled into the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    /// Uniform scale preserving aspect ratio, bounded by the smaller axis ratio
    #[default]
    Fit,
    /// Independent per-axis scale filling the viewport exactly
    Stretch,
}

/// Interactive view state
///
/// Pan is stored in normalized document fractions so a pan amount moves the
/// image by the same visual share at any window size. Zoom 1.0 is the fitted
/// size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    mode: FitMode,
    pan: Point,
    zoom: Scalar,
    viewport: Size,
}

impl View {
    pub fn new(viewport: Size) -> Self {
        Self {
            mode: FitMode::default(),
            pan: Point::default(),
            zoom: 1.0,
            viewport,
        }
    }

    /// Replace the initial zoom, clamped to the allowed range
    pub fn with_zoom(self, zoom: Scalar) -> Self {
        Self {
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            ..self
        }
    }

    /// Replace the fit mode
    pub fn with_mode(self, mode: FitMode) -> Self {
        Self { mode, ..self }
    }

    pub fn mode(&self) -> FitMode {
        self.mode
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn zoom(&self) -> Scalar {
        self.zoom
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Shift the view by document-fraction deltas
    pub fn pan_by(&mut self, dx: Scalar, dy: Scalar) {
        self.pan = self.pan + Point::new(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.zoom * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.zoom / ZOOM_STEP);
    }

    fn set_zoom(&mut self, zoom: Scalar) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            FitMode::Fit => FitMode::Stretch,
            FitMode::Stretch => FitMode::Fit,
        };
    }

    /// Back to the initial fit: zoom 1, no pan
    pub fn reset(&mut self) {
        self.pan = Point::default();
        self.zoom = 1.0;
    }

    /// Track the window size, performed on every resize event
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Compute the transform mapping document coordinates to viewport pixels.
    ///
    /// The scaled document is centered in the viewport, then shifted by the
    /// pan offset scaled by the document dimensions so pan amount does not
    /// depend on the window resolution.
    pub fn transform(&self, doc_width: Scalar, doc_height: Scalar) -> ViewTransform {
        let width = self.viewport.width as Scalar;
        let height = self.viewport.height as Scalar;
        let (sx, sy) = match self.mode {
            FitMode::Stretch => (
                width / doc_width * self.zoom,
                height / doc_height * self.zoom,
            ),
            FitMode::Fit => {
                let scale = (width / doc_width).min(height / doc_height) * self.zoom;
                (scale, scale)
            }
        };
        ViewTransform {
            sx,
            sy,
            tx: (width - doc_width * sx) / 2.0 + self.pan.x() * doc_width * sx,
            ty: (height - doc_height * sy) / 2.0 + self.pan.y() * doc_height * sy,
        }
    }
}

/// Scale and translation mapping document coordinates to viewport pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub sx: Scalar,
    pub sy: Scalar,
    pub tx: Scalar,
    pub ty: Scalar,
}

impl ViewTransform {
    /// Apply this transformation to a point
    pub fn apply(&self, point: Point) -> Point {
        let Point([x, y]) = point;
        Point([x * self.sx + self.tx, y * self.sy + self.ty])
    }

    /// Convert to the rasterizer transform (f32 at the boundary)
    pub fn to_tiny_skia(&self) -> tiny_skia::Transform {
        tiny_skia::Transform::from_row(
            self.sx as f32,
            0.0,
            0.0,
            self.sy as f32,
            self.tx as f32,
            self.ty as f32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[macro_export]
    macro_rules! assert_approx_eq {
        ( $v0:expr, $v1: expr ) => {{
            assert!(($v0 - $v1).abs() < $crate::EPSILON, "{} != {}", $v0, $v1);
        }};
        ( $v0:expr, $v1: expr, $e: expr ) => {{
            assert!(($v0 - $v1).abs() < $e, "{} != {}", $v0, $v1);
        }};
    }

    const DOC: (Scalar, Scalar) = (200.0, 100.0);

    #[test]
    fn test_fit_centers_document() {
        let view = View::new(Size::new(800, 600));
        let tr = view.transform(DOC.0, DOC.1);
        let center = tr.apply(Point::new(DOC.0 / 2.0, DOC.1 / 2.0));
        assert!(center.is_close_to(Point::new(400.0, 300.0)));
        assert_approx_eq!(tr.sx, tr.sy);
    }

    #[test]
    fn test_fit_uses_constraining_axis() {
        // wide document in a tall viewport, width constrains
        let tr = View::new(Size::new(400, 800)).transform(DOC.0, DOC.1);
        assert_approx_eq!(tr.sx, 2.0);
        assert_approx_eq!(tr.sy, 2.0);

        // doubling the viewport width doubles the scale
        let tr = View::new(Size::new(800, 800)).transform(DOC.0, DOC.1);
        assert_approx_eq!(tr.sx, 4.0);
    }

    #[test]
    fn test_stretch_fills_both_axes() {
        let view = View::new(Size::new(800, 600)).with_mode(FitMode::Stretch);
        let tr = view.transform(DOC.0, DOC.1);
        assert_approx_eq!(tr.sx * DOC.0, 800.0);
        assert_approx_eq!(tr.sy * DOC.1, 600.0);
        assert!(tr.apply(Point::new(0.0, 0.0)).is_close_to(Point::new(0.0, 0.0)));
        assert!(
            tr.apply(Point::new(DOC.0, DOC.1))
                .is_close_to(Point::new(800.0, 600.0))
        );
    }

    #[test]
    fn test_scale_monotonic_in_zoom() {
        let mut view = View::new(Size::new(640, 480));
        let mut last = view.transform(DOC.0, DOC.1).sx;
        for _ in 0..8 {
            view.zoom_in();
            let next = view.transform(DOC.0, DOC.1).sx;
            assert!(next > last, "{} <= {}", next, last);
            last = next;
        }
    }

    #[test]
    fn test_zoom_clamped() {
        let mut view = View::new(Size::new(640, 480));
        for _ in 0..100 {
            view.zoom_out();
        }
        assert_approx_eq!(view.zoom(), MIN_ZOOM);
        for _ in 0..100 {
            view.zoom_in();
        }
        assert_approx_eq!(view.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_pan_resolution_independent() {
        // +0.5 pan moves the mapped center by half the scaled document width
        for viewport in [Size::new(640, 480), Size::new(1280, 960)] {
            let mut view = View::new(viewport);
            let center = Point::new(DOC.0 / 2.0, DOC.1 / 2.0);
            let base = view.transform(DOC.0, DOC.1).apply(center);
            view.pan_by(0.5, 0.0);
            let tr = view.transform(DOC.0, DOC.1);
            let moved = tr.apply(center);
            assert_approx_eq!(moved.x() - base.x(), 0.5 * DOC.0 * tr.sx);
            assert_approx_eq!(moved.y(), base.y());
        }
    }

    #[test]
    fn test_transform_idempotent() {
        let mut view = View::new(Size::new(800, 600)).with_zoom(2.5);
        view.pan_by(-0.25, 0.1);
        assert_eq!(view.transform(320.0, 240.0), view.transform(320.0, 240.0));
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut view = View::new(Size::new(800, 600)).with_zoom(3.0);
        assert_eq!(view.mode(), FitMode::Fit);
        view.toggle_mode();
        assert_eq!(view.mode(), FitMode::Stretch);
        view.pan_by(0.3, -0.2);
        view.reset();
        // reset restores zoom and pan but keeps the mode and viewport
        assert_approx_eq!(view.zoom(), 1.0);
        assert!(view.pan().is_close_to(Point::default()));
        assert_eq!(view.mode(), FitMode::Stretch);
        assert_eq!(view.viewport(), Size::new(800, 600));
    }
}
