pub mod bbox;
pub mod class;
pub mod counter;
pub mod detection;
pub mod error;
pub mod frame;
pub mod reporter;
pub mod track;
pub mod tracker;

mod circular_queue;

pub use class::{ClassCounts, PerClass, VehicleClass};
pub use counter::{CumulativeSeries, TimelineEntry, UniqueCounter};
pub use detection::Detection;
pub use error::{Error, Result};
pub use frame::Frame;
pub use reporter::{Report, ReporterConfig, TrafficReporter, DEFAULT_REPORT_PATH};
pub use track::{class_info, Track};
pub use tracker::{CentroidTracker, TrackerConfig};

use std::rc::Rc;

/// Turns per-frame detections into stable identities.
///
/// Implementations expect frames in order and from a single caller; none of
/// them synchronise internally.
pub trait Tracking {
    fn update(&mut self, frame: &Frame) -> Result<()>;
    fn tracks(&self) -> Rc<[Track]>;
}
