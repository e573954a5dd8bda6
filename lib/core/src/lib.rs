//! # annotator-core
//!
//! Shared building blocks for the annotator matching engine:
//!
//! - [`record`] - tolerant access to schema-less analysis records, including
//!   the double-encoded `analysis` payload and canonical JSON rendering
//! - [`geometry`] - bounding-box IoU, duplicate suppression and conversion
//!   of detections into published annotation boxes
//! - [`Error`] - failures at the edges (configuration, input files)

pub mod error;
pub mod geometry;
pub mod record;

pub use error::{read_json, Error, Result};
pub use geometry::{
    filter_overlapping, to_annotation_boxes, Annotation, AnnotationBox, BoundingBox,
    DEFAULT_OVERLAP_THRESHOLD,
};
pub use record::{
    canonical_json, canonical_object_json, is_truthy, joined_text, lookup, scalar_text, values_text,
    AnalysisRecord, Payload, ANALYSIS_KEY,
};
