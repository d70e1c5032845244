//! Delivery of retained detections.

use crate::geometry::BoundingBox;

/// Receives retained boxes one at a time during a suppression run.
///
/// Returning `false` declines the offered box and skips the rest of the
/// class currently being dispatched; delivery resumes with the next class,
/// and boxes already delivered are unaffected.
pub trait DetectionSink {
    /// Called once per retained box, in emission order.
    fn on_detection(&mut self, detection: &BoundingBox) -> bool;
}

impl<F> DetectionSink for F
where
    F: FnMut(&BoundingBox) -> bool,
{
    fn on_detection(&mut self, detection: &BoundingBox) -> bool {
        self(detection)
    }
}

/// Collects every delivered box, never declining.
impl DetectionSink for Vec<BoundingBox> {
    fn on_detection(&mut self, detection: &BoundingBox) -> bool {
        self.push(*detection);
        true
    }
}
