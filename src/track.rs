use nalgebra as na;
use std::collections::HashMap;

use crate::class::VehicleClass;

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub track_id: u32,

    // center of the last matched detection, in px
    pub centroid: na::Point2<f32>,

    pub last_seen: u64,

    // class of the last matched detection that carried one
    pub class: Option<VehicleClass>,
}

impl Track {
    #[inline(always)]
    pub fn x(&self) -> f32 {
        self.centroid.x
    }

    #[inline(always)]
    pub fn y(&self) -> f32 {
        self.centroid.y
    }
}

/// Identity to class mapping for every classified track in `tracks`.
pub fn class_info<'a, I>(tracks: I) -> HashMap<u32, VehicleClass>
where
    I: IntoIterator<Item = &'a Track>,
{
    tracks
        .into_iter()
        .filter_map(|t| Some((t.track_id, t.class?)))
        .collect()
}
