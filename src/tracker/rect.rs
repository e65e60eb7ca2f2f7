/// Axis-aligned bounding box in image-pixel space.
///
/// Stored in TLBR form (x1, y1, x2, y2). A well-formed box has `x1 < x2` and
/// `y1 < y2`; anything else is degenerate and has zero area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
    /// Right edge
    pub x2: f32,
    /// Bottom edge
    pub y2: f32,
}

impl Rect {
    /// Create a new Rect from TLBR coordinates.
    #[inline]
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a Rect from TLWH format (left, top, width, height).
    #[inline]
    pub fn from_tlwh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Create a Rect from XYWH format (center x, center y, width, height).
    #[inline]
    pub fn from_xywh(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(
            cx - width / 2.0,
            cy - height / 2.0,
            cx + width / 2.0,
            cy + height / 2.0,
        )
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x1, self.y1, self.width(), self.height()]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Area of the box, clamped to zero for degenerate boxes.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.x1 < self.x2 && self.y1 < self.y2)
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    #[inline]
    pub fn iou(&self, other: &Rect) -> f32 {
        overlap(self, other)
    }
}

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Intersection over Union of two boxes, in `[0, 1]`.
///
/// Disjoint boxes, a non-positive union and non-finite input all give `0.0`.
pub fn overlap(a: &Rect, b: &Rect) -> f32 {
    let x1 = a.x1.max(b.x1);
    let y1 = a.y1.max(b.y1);
    let x2 = a.x2.min(b.x2);
    let y2 = a.y2.min(b.y2);

    let inter_width = (x2 - x1).max(0.0);
    let inter_height = (y2 - y1).max(0.0);
    let inter_area = inter_width * inter_height;

    let union_area = a.area() + b.area() - inter_area;

    if union_area > 0.0 {
        let iou = inter_area / union_area;
        if iou.is_finite() {
            iou.clamp(0.0, 1.0)
        } else {
            0.0
        }
    } else {
        0.0
    }
}

/// Overlap matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn overlap_matrix(boxes_a: &[Rect], boxes_b: &[Rect]) -> Array2<f32> {
    let mut scores = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            scores[[i, j]] = overlap(a, b);
        }
    }
    scores
}
