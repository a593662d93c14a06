use chrono::{DateTime, Duration, Local, Utc};
use log::debug;
use serde_derive::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::circular_queue::CircularQueue;
use crate::error::Result;

pub const DEFAULT_REPORT_PATH: &str = "traffic_report.csv";

const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReporterConfig {
    /// Events kept before the oldest ones are dropped
    pub capacity: usize,
    /// Window widths in seconds
    pub short_window: u64,
    pub medium_window: u64,
    pub long_window: u64,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            short_window: 600,
            medium_window: 1800,
            long_window: 3600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub count: u32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Report {
    pub avg_10min: f64,
    pub avg_30min: f64,
    pub avg_60min: f64,
    pub last_update: String,
}

impl Default for Report {
    fn default() -> Self {
        Self {
            avg_10min: 0.0,
            avg_30min: 0.0,
            avg_60min: 0.0,
            last_update: "N/A".to_string(),
        }
    }
}

#[derive(Serialize)]
struct CsvRow {
    timestamp: String,
    vehicle_count: u32,
}

/// Rolling averages over raw per-frame vehicle counts.
#[derive(Debug, Clone)]
pub struct TrafficReporter {
    config: ReporterConfig,
    events: CircularQueue<Event>,
}

impl Default for TrafficReporter {
    fn default() -> Self {
        Self::new(ReporterConfig::default())
    }
}

impl TrafficReporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            events: CircularQueue::with_capacity(config.capacity),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    #[inline]
    pub fn add_frame_detections(&mut self, count: u32) {
        self.add_frame_detections_at(Utc::now(), count)
    }

    pub fn add_frame_detections_at(&mut self, timestamp: DateTime<Utc>, count: u32) {
        self.events.push(Event { timestamp, count });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.events.capacity()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.events.clear()
    }

    /// Retained events, oldest first.
    #[inline]
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    #[inline]
    pub fn get_report(&self) -> Report {
        self.get_report_at(Utc::now())
    }

    pub fn get_report_at(&self, now: DateTime<Utc>) -> Report {
        if self.events.is_empty() {
            return Report::default();
        }

        Report {
            avg_10min: self.window_average(now, self.config.short_window),
            avg_30min: self.window_average(now, self.config.medium_window),
            avg_60min: self.window_average(now, self.config.long_window),
            last_update: now.with_timezone(&Local).format("%H:%M:%S").to_string(),
        }
    }

    fn window_average(&self, now: DateTime<Utc>, window_secs: u64) -> f64 {
        // Duration::seconds panics past i64::MAX / 1000
        let window = Duration::seconds(window_secs.min(i64::MAX as u64 / 1000) as i64);

        let (sum, n) = self
            .events
            .desc_iter()
            .filter(|e| now.signed_duration_since(e.timestamp) <= window)
            .fold((0u64, 0u64), |(sum, n), e| (sum + e.count as u64, n + 1));

        if n == 0 {
            return 0.0;
        }

        round2(sum as f64 / n as f64)
    }

    /// Writes every retained event to `path`, replacing any previous file.
    ///
    /// Returns `Ok(None)` without touching the filesystem when there is
    /// nothing to export.
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<Option<PathBuf>> {
        if self.events.is_empty() {
            return Ok(None);
        }

        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)?;

        for e in self.events.iter() {
            writer.serialize(CsvRow {
                timestamp: e.timestamp.format(CSV_TIMESTAMP_FORMAT).to_string(),
                vehicle_count: e.count,
            })?;
        }
        writer.flush()?;

        debug!("exported {} events to {}", self.events.len(), path.display());

        Ok(Some(path.to_path_buf()))
    }
}

#[inline]
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
