use log::{debug, trace, warn};
use nalgebra as na;
use serde_derive::{Deserialize, Serialize};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::{Detection, Frame, Track};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Largest centroid jump (px) still treated as the same object
    pub max_distance: f32,
    /// Frames a track may go unmatched before it is evicted
    pub disappear_threshold: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_distance: 50.0,
            disappear_threshold: 10,
        }
    }
}

/// Nearest-centroid tracker.
///
/// Tracks are matched greedily in creation order: each one claims the
/// closest unclaimed detection within `max_distance`. Leftover detections
/// open new tracks. Identities come from a counter that only grows, so an
/// evicted identity is never handed out again.
#[derive(Debug, Default)]
pub struct CentroidTracker {
    config: TrackerConfig,
    next_id: u32,
    last_frame: Option<u64>,
    tracks: Vec<Track>,
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            next_id: 0,
            last_frame: None,
            tracks: Vec::with_capacity(64),
        }
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Number of live tracks.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.tracks.len()
    }

    /// Identity the next new track will receive.
    #[inline]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Feeds one frame of detections and returns every live track.
    ///
    /// `frame_index` must not be lower than the last accepted one, otherwise
    /// `Error::FrameOrder` is returned and no state changes. Repeating the
    /// same index is allowed.
    pub fn update(&mut self, detections: &[Detection], frame_index: u64) -> Result<Vec<Track>> {
        if let Some(last) = self.last_frame {
            if frame_index < last {
                warn!("rejecting frame {} after frame {}", frame_index, last);
                return Err(Error::FrameOrder {
                    last,
                    got: frame_index,
                });
            }
        }
        self.last_frame = Some(frame_index);

        let centroids: Vec<na::Point2<f32>> =
            detections.iter().map(Detection::centroid).collect();
        let mut claimed = vec![false; detections.len()];

        for track in &mut self.tracks {
            let mut best: Option<(usize, f32)> = None;

            for (idx, centroid) in centroids.iter().enumerate() {
                if claimed[idx] {
                    continue;
                }

                let dist = na::distance(&track.centroid, centroid);
                if dist > self.config.max_distance {
                    continue;
                }

                match best {
                    Some((_, best_dist)) if best_dist <= dist => {}
                    _ => best = Some((idx, dist)),
                }
            }

            if let Some((idx, dist)) = best {
                trace!(
                    "track {} matched detection {} ({:.2}px)",
                    track.track_id, idx, dist
                );

                claimed[idx] = true;
                track.centroid = centroids[idx];
                track.last_seen = frame_index;
                if let Some(class) = detections[idx].class {
                    track.class = Some(class);
                }
            }
        }

        for (idx, det) in detections.iter().enumerate() {
            if claimed[idx] {
                continue;
            }

            let track_id = self.next_id;
            self.next_id += 1;

            debug!("new track {} at ({}, {})", track_id, centroids[idx].x, centroids[idx].y);

            self.tracks.push(Track {
                track_id,
                centroid: centroids[idx],
                last_seen: frame_index,
                class: det.class,
            });
        }

        let threshold = self.config.disappear_threshold;
        self.tracks.retain(|t| {
            let keep = frame_index - t.last_seen <= threshold;
            if !keep {
                debug!("track {} evicted, last seen at frame {}", t.track_id, t.last_seen);
            }
            keep
        });

        Ok(self.tracks.clone())
    }

    #[inline]
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}

impl crate::Tracking for CentroidTracker {
    #[inline]
    fn update(&mut self, frame: &Frame) -> Result<()> {
        CentroidTracker::update(self, &frame.detections, frame.index).map(|_| ())
    }

    #[inline]
    fn tracks(&self) -> Rc<[Track]> {
        self.tracks.clone().into_boxed_slice().into()
    }
}
