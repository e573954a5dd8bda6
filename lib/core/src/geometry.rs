//! Bounding-box helpers for emitted annotations
//!
//! Detections arrive as `[x1, y1, x2, y2]` corner boxes. Before annotations
//! are published, overlapping duplicates are dropped (earlier detections
//! win) and the survivors are converted to `x, y, width, height` form.

use serde::{Deserialize, Serialize};

/// Colour attached to every emitted annotation box
pub const ANNOTATION_COLOR: &str = "#0018F9";

/// Label used when a detection carries none
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Default IoU at or above which a later box is treated as a duplicate
pub const DEFAULT_OVERLAP_THRESHOLD: f64 = 0.5;

/// Axis-aligned box in corner form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build from a coordinate list; anything but exactly four values is rejected.
    pub fn from_slice(coords: &[f64]) -> Option<Self> {
        match *coords {
            [x1, y1, x2, y2] => Some(Self::new(x1, y1, x2, y2)),
            _ => None,
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Intersection over union.
    ///
    /// Disjoint boxes and a zero union both give 0.0. Boxes that only touch
    /// count as intersecting with zero area.
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        let left = self.x1.max(other.x1);
        let top = self.y1.max(other.y1);
        let right = self.x2.min(other.x2);
        let bottom = self.y2.min(other.y2);

        if right < left || bottom < top {
            return 0.0;
        }

        let intersection = (right - left) * (bottom - top);
        let union = self.area() + other.area() - intersection;
        if union == 0.0 {
            return 0.0;
        }

        intersection / union
    }
}

/// A detection to be turned into an annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub label: Option<String>,
    /// Corner coordinates; a missing bbox is the zero box at the origin
    #[serde(default = "zero_bbox")]
    pub bbox: Vec<f64>,
}

fn zero_bbox() -> Vec<f64> {
    vec![0.0; 4]
}

impl Annotation {
    pub fn new(label: impl Into<String>, bbox: [f64; 4]) -> Self {
        Self {
            label: Some(label.into()),
            bbox: bbox.to_vec(),
        }
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_slice(&self.bbox)
    }
}

/// Published annotation in `x, y, width, height` form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationBox {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

/// Drop annotations that overlap an earlier kept annotation by at least
/// `threshold` IoU.
///
/// Annotations with a malformed bbox are kept and never suppress others.
pub fn filter_overlapping(annotations: &[Annotation], threshold: f64) -> Vec<&Annotation> {
    if annotations.len() <= 1 {
        return annotations.iter().collect();
    }

    let boxes: Vec<Option<BoundingBox>> = annotations.iter().map(Annotation::bounding_box).collect();
    let mut keep = vec![true; annotations.len()];

    for i in 1..annotations.len() {
        let Some(current) = boxes[i] else {
            continue;
        };

        let duplicate = (0..i).any(|j| {
            keep[j] && boxes[j].is_some_and(|previous| current.iou(&previous) >= threshold)
        });
        if duplicate {
            keep[i] = false;
        }
    }

    annotations
        .iter()
        .zip(keep)
        .filter_map(|(annotation, kept)| kept.then_some(annotation))
        .collect()
}

/// Filter overlapping annotations and convert the survivors to
/// `x, y, width, height` boxes. Malformed bboxes are dropped here.
pub fn to_annotation_boxes(annotations: &[Annotation], threshold: f64) -> Vec<AnnotationBox> {
    filter_overlapping(annotations, threshold)
        .into_iter()
        .filter_map(|annotation| {
            let bbox = annotation.bounding_box()?;
            Some(AnnotationBox {
                label: annotation.label.clone().unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
                x: bbox.x1,
                y: bbox.y1,
                width: bbox.width(),
                height: bbox.height(),
                color: ANNOTATION_COLOR.to_string(),
            })
        })
        .collect()
}
