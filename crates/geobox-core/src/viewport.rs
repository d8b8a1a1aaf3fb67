//! Viewport seam.
//!
//! Panning and zooming belong to the external map surface; the core only
//! asks it to recenter on a box after an external push.

use crate::geometry::BoundingBox;

/// Fixed padding margin, in surface pixels, applied around a fitted box.
pub const FIT_PADDING: f64 = 20.0;

/// Command surface of the external viewport controller.
pub trait Viewport {
    /// Recenter and rescale the view so the box is fully visible with the
    /// given padding margin.
    fn fit_bounds(&mut self, bbox: BoundingBox, padding: f64);
}

/// Viewport that records every fit request.
///
/// Backs tests and the demo app.
#[derive(Debug, Default)]
pub struct RecordingViewport {
    fits: Vec<(BoundingBox, f64)>,
}

impl RecordingViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All fit requests received so far, oldest first.
    pub fn fits(&self) -> &[(BoundingBox, f64)] {
        &self.fits
    }
}

impl Viewport for RecordingViewport {
    fn fit_bounds(&mut self, bbox: BoundingBox, padding: f64) {
        self.fits.push((bbox, padding));
    }
}
