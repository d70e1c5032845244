//! Axis-aligned bounding boxes with integer-percentage IoU.
//!
//! Coordinates are inclusive pixel bounds, so a box whose corners coincide
//! still covers one pixel and an 11x11 box spans coordinates 0..=10. Areas
//! and IoU intermediates are carried in `i64` so coordinate products cannot
//! overflow.

use crate::util::{BoxMergeError, BoxMergeResult};

/// One detection candidate: inclusive pixel bounds, confidence and class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    /// Left edge (inclusive).
    pub min_x: i32,
    /// Top edge (inclusive).
    pub min_y: i32,
    /// Right edge (inclusive).
    pub max_x: i32,
    /// Bottom edge (inclusive).
    pub max_y: i32,
    /// Confidence on a 0-100 percentage scale.
    pub score: i32,
    /// Category identifier assigned by the detector.
    pub class_id: i32,
}

impl BoundingBox {
    /// Creates a box from inclusive corner coordinates.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32, score: i32, class_id: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
            score,
            class_id,
        }
    }

    /// Pixel-inclusive area. Zero or negative only for inverted bounds.
    pub fn area(&self) -> i64 {
        let width = i64::from(self.max_x) - i64::from(self.min_x) + 1;
        let height = i64::from(self.max_y) - i64::from(self.min_y) + 1;
        width * height
    }

    /// Axis-aligned overlap rectangle of the two boxes.
    ///
    /// `score` and `class_id` are taken from `self`. When the boxes do not
    /// overlap the result is inverted (a min beyond a max on at least one
    /// axis).
    pub fn intersect(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
            ..*self
        }
    }

    /// Smallest rectangle covering both boxes.
    ///
    /// `score` and `class_id` are taken from `self`, so calling this on a
    /// cluster representative preserves its confidence through a merge.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
            ..*self
        }
    }

    /// Overlap area feeding [`BoundingBox::iou`].
    ///
    /// An inverted overlap rectangle contributes zero. The inclusive-area
    /// formula alone would hand disjoint boxes a spurious positive area
    /// (the product of two negative extents), so the inversion check runs
    /// before the area is taken.
    fn intersection_area(&self, other: &BoundingBox) -> i64 {
        let overlap = self.intersect(other);
        if overlap.min_x > overlap.max_x || overlap.min_y > overlap.max_y {
            return 0;
        }
        overlap.area()
    }

    /// Intersection over union as a truncated integer percentage.
    ///
    /// Returns [`BoxMergeError::DegenerateBox`] when the combined area is
    /// not positive, which is only reachable when both inputs have inverted
    /// bounds; any well-formed box, including a single pixel, has area at
    /// least 1.
    pub fn iou(&self, other: &BoundingBox) -> BoxMergeResult<i32> {
        let overlap = self.intersection_area(other);
        let denominator = self.area() + other.area() - overlap;
        if denominator <= 0 {
            return Err(BoxMergeError::DegenerateBox { denominator });
        }
        Ok((overlap * 100 / denominator) as i32)
    }
}
