//! Greedy merge pass over one class worth of candidates.

use std::cmp::Ordering;

use crate::geometry::BoundingBox;

fn score_cmp_desc(a: &BoundingBox, b: &BoundingBox) -> Ordering {
    b.score.cmp(&a.score)
}

/// Merges overlapping candidates of a single class into representatives.
///
/// `boxes` is sorted by descending score in place (ties land in no
/// particular order), then walked once: the highest-scoring unconsumed box
/// opens a cluster, and each following candidate whose IoU with the current
/// representative strictly exceeds `iou_threshold` is folded in via
/// [`BoundingBox::union`]. The first candidate at or below the threshold
/// closes the cluster and opens the next one, so clustering is local to
/// contiguous runs in score order rather than a global graph merge.
///
/// The representative keeps the score and class of the box that opened its
/// cluster. A degenerate IoU (see [`BoundingBox::iou`]) counts as 0.
pub fn merge_overlapping(boxes: &mut [BoundingBox], iou_threshold: i32) -> Vec<BoundingBox> {
    boxes.sort_unstable_by(score_cmp_desc);

    let mut picked = Vec::new();
    let mut cursor = 0;
    while cursor < boxes.len() {
        let mut representative = boxes[cursor];
        cursor += 1;
        while cursor < boxes.len() {
            let overlap = representative.iou(&boxes[cursor]).unwrap_or(0);
            if overlap <= iou_threshold {
                break;
            }
            representative = representative.union(&boxes[cursor]);
            cursor += 1;
        }
        picked.push(representative);
    }
    picked
}
