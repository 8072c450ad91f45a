//! Minimal SVG viewer: load a vector document, rasterize it through resvg
//! and display it in a resizable window with keyboard pan and zoom.
//!
//! Main features:
//!  - Fit and stretch view modes
//!  - Resolution-independent pan and zoom
//!  - Re-render only when the view actually changed
//!
#![deny(warnings)]

mod app;
mod dirty;
mod document;
mod frame;
mod view;

pub use app::{Action, App};
pub use dirty::Dirty;
pub use document::{Document, DocumentError};
pub use frame::{ColorError, DEFAULT_BG, Rgb, pack};
pub use view::{
    EPSILON, FitMode, MAX_ZOOM, MIN_ZOOM, PAN_STEP, Point, Scalar, Size, View, ViewTransform,
    ZOOM_STEP,
};
