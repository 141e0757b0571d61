//! Lithview Core Library
//!
//! Sample buffers, binarization and container metadata shared by the
//! threshold viewer and the metadata reporter.

pub mod container;
pub mod sample;
pub mod threshold;

pub use container::{read_volume_bbox, ContainerError, VolumeBbox};
pub use sample::{SampleBuffer, SampleError, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use threshold::{binarize, slider_to_threshold};
