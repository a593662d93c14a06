use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

use crate::bbox::{BBox, Ltrb, Xywh};
use crate::class::VehicleClass;

/// One detector box for the current frame, corners in pixel space.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub bbox: BBox<Ltrb>,
    #[serde(rename = "c", default)]
    pub class: Option<VehicleClass>,
}

impl Detection {
    #[inline]
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            bbox: BBox::ltrb(x1, y1, x2, y2),
            class: None,
        }
    }

    #[inline]
    pub fn from_xywh(bbox: BBox<Xywh>) -> Self {
        Self {
            bbox: bbox.as_ltrb(),
            class: None,
        }
    }

    #[inline]
    pub fn with_class(mut self, class: VehicleClass) -> Self {
        self.class = Some(class);
        self
    }

    #[inline(always)]
    pub fn centroid(&self) -> na::Point2<f32> {
        self.bbox.center()
    }
}

impl From<[f32; 4]> for Detection {
    fn from(v: [f32; 4]) -> Self {
        Detection::new(v[0], v[1], v[2], v[3])
    }
}
