use chrono::{DateTime, Utc};
use log::debug;
use serde_derive::Serialize;
use std::collections::{HashMap, HashSet};

use crate::class::{ClassCounts, PerClass, VehicleClass};

/// Number of identities first seen at `timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineEntry {
    pub timestamp: DateTime<Utc>,
    pub count: usize,
}

/// Running total over time, `times` in seconds from the first increment.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct CumulativeSeries {
    pub times: Vec<f64>,
    pub counts: Vec<usize>,
}

impl CumulativeSeries {
    fn from_timeline(origin: DateTime<Utc>, timeline: &[TimelineEntry]) -> Self {
        let times = timeline
            .iter()
            .map(|e| (e.timestamp - origin).num_milliseconds() as f64 / 1000.0)
            .collect();

        let counts = timeline
            .iter()
            .scan(0, |acc, e| {
                *acc += e.count;
                Some(*acc)
            })
            .collect();

        Self { times, counts }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    #[inline]
    pub fn last(&self) -> Option<(f64, usize)> {
        Some((*self.times.last()?, *self.counts.last()?))
    }
}

/// Counts every identity once, at the cycle it first shows up.
///
/// Seen identities are never forgotten, even after the tracker drops them.
#[derive(Debug, Default)]
pub struct UniqueCounter {
    seen_ids: HashSet<u32>,
    timeline: Vec<TimelineEntry>,
    class_timelines: PerClass<Vec<TimelineEntry>>,
    class_counts: ClassCounts,
}

impl UniqueCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the identities active this cycle, stamped with the current
    /// time. Returns `(new_count, total_unique)`.
    #[inline]
    pub fn add_new_ids<I>(
        &mut self,
        current_ids: I,
        class_info: Option<&HashMap<u32, VehicleClass>>,
    ) -> (usize, usize)
    where
        I: IntoIterator<Item = u32>,
    {
        self.add_new_ids_at(Utc::now(), current_ids, class_info)
    }

    pub fn add_new_ids_at<I>(
        &mut self,
        now: DateTime<Utc>,
        current_ids: I,
        class_info: Option<&HashMap<u32, VehicleClass>>,
    ) -> (usize, usize)
    where
        I: IntoIterator<Item = u32>,
    {
        let mut new_count = 0;
        let mut new_by_class = ClassCounts::default();

        for id in current_ids {
            if !self.seen_ids.insert(id) {
                continue;
            }

            new_count += 1;

            if let Some(class) = class_info.and_then(|info| info.get(&id)) {
                *self.class_counts.get_mut(*class) += 1;
                *new_by_class.get_mut(*class) += 1;
            }
        }

        if new_count > 0 {
            debug!("{} new identities, {} unique so far", new_count, self.seen_ids.len());

            self.timeline.push(TimelineEntry {
                timestamp: now,
                count: new_count,
            });

            for (class, &count) in new_by_class.iter() {
                if count > 0 {
                    self.class_timelines.get_mut(class).push(TimelineEntry {
                        timestamp: now,
                        count,
                    });
                }
            }
        }

        (new_count, self.seen_ids.len())
    }

    #[inline]
    pub fn total_unique(&self) -> usize {
        self.seen_ids.len()
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        self.seen_ids.contains(&id)
    }

    #[inline]
    pub fn class_counts(&self) -> &ClassCounts {
        &self.class_counts
    }

    #[inline]
    pub fn timeline(&self) -> &[TimelineEntry] {
        &self.timeline
    }

    #[inline]
    pub fn class_timeline(&self, class: VehicleClass) -> &[TimelineEntry] {
        self.class_timelines.get(class)
    }

    pub fn cumulative_data(&self) -> CumulativeSeries {
        match self.timeline.first() {
            Some(first) => CumulativeSeries::from_timeline(first.timestamp, &self.timeline),
            None => CumulativeSeries::default(),
        }
    }

    /// Per-class running total. Times share the origin of
    /// [`cumulative_data`](Self::cumulative_data) so the curves line up.
    pub fn class_cumulative_data(&self, class: VehicleClass) -> CumulativeSeries {
        let timeline = self.class_timelines.get(class);

        match self.timeline.first() {
            Some(first) if !timeline.is_empty() => {
                CumulativeSeries::from_timeline(first.timestamp, timeline)
            }
            _ => CumulativeSeries::default(),
        }
    }
}
