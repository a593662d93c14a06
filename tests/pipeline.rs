use chrono::{Duration, TimeZone, Utc};
use std::collections::BTreeSet;

use vtrack::{class_info, CentroidTracker, Detection, TrafficReporter, UniqueCounter, VehicleClass};

/// A box of 20x20 px sliding right by `speed` px per frame.
struct Vehicle {
    enter: u64,
    leave: u64,
    start_x: f32,
    y: f32,
    speed: f32,
    class: VehicleClass,
}

impl Vehicle {
    fn detection(&self, frame: u64) -> Option<Detection> {
        if frame < self.enter || frame >= self.leave {
            return None;
        }

        let x = self.start_x + self.speed * (frame - self.enter) as f32;
        Some(Detection::new(x, self.y, x + 20.0, self.y + 20.0).with_class(self.class))
    }
}

fn scene() -> Vec<Vehicle> {
    let lane = |enter, leave, y, speed, class| Vehicle {
        enter,
        leave,
        start_x: 0.0,
        y,
        speed,
        class,
    };

    vec![
        lane(0, 40, 0.0, 5.0, VehicleClass::Car),
        lane(10, 60, 200.0, 8.0, VehicleClass::Truck),
        lane(20, 30, 400.0, 3.0, VehicleClass::Motorcycle),
        lane(45, 80, 600.0, 5.0, VehicleClass::Car),
    ]
}

#[test]
fn every_vehicle_counted_once() {
    let vehicles = scene();
    let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    let mut tracker = CentroidTracker::default();
    let mut counter = UniqueCounter::new();
    let mut reporter = TrafficReporter::default();

    let mut emitted = BTreeSet::new();
    let mut counted = 0;
    let mut last_total = 0;

    for frame in 0..100u64 {
        let now = t0 + Duration::milliseconds(frame as i64 * 40);
        let dets: Vec<_> = vehicles.iter().filter_map(|v| v.detection(frame)).collect();

        let tracks = tracker.update(&dets, frame).unwrap();
        emitted.extend(tracks.iter().map(|t| t.track_id));

        let info = class_info(&tracks);
        let (new_count, total) =
            counter.add_new_ids_at(now, tracks.iter().map(|t| t.track_id), Some(&info));

        assert!(new_count <= tracks.len());
        assert!(total >= last_total);
        counted += new_count;
        last_total = total;

        reporter.add_frame_detections_at(now, tracker.active_count() as u32);
    }

    assert_eq!(emitted.len(), 4);
    assert_eq!(counted, emitted.len());
    assert_eq!(counter.total_unique(), 4);
    assert!(emitted.iter().all(|id| counter.contains(*id)));

    let counts = counter.class_counts();
    assert_eq!(counts.car, 2);
    assert_eq!(counts.truck, 1);
    assert_eq!(counts.motorcycle, 1);

    let series = counter.cumulative_data();
    assert_eq!(series.times.first(), Some(&0.0));
    assert!(series.times.windows(2).all(|w| w[0] <= w[1]));
    assert!(series.counts.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(series.counts.last(), Some(&counter.total_unique()));

    // all vehicles gone well before frame 99, so every track got evicted
    assert_eq!(tracker.active_count(), 0);
    assert_eq!(reporter.len(), 100);

    let report = reporter.get_report_at(t0 + Duration::seconds(4));
    assert_eq!(report.avg_10min, report.avg_30min);
    assert_eq!(report.avg_30min, report.avg_60min);
}

#[test]
fn reappearing_vehicle_gets_new_identity() {
    let mut tracker = CentroidTracker::default();
    let mut counter = UniqueCounter::new();
    let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    let det = [Detection::new(100.0, 100.0, 120.0, 120.0)];

    let tracks = tracker.update(&det, 0).unwrap();
    counter.add_new_ids_at(t0, tracks.iter().map(|t| t.track_id), None);

    // occluded for disappear_threshold + 1 frames
    let threshold = tracker.config().disappear_threshold;
    for frame in 1..=threshold + 1 {
        tracker.update(&[], frame).unwrap();
    }
    assert_eq!(tracker.active_count(), 0);

    let tracks = tracker.update(&det, threshold + 2).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].track_id, 1);

    // the counter cannot tell it is the same vehicle
    let (new_count, total) = counter.add_new_ids_at(
        t0 + Duration::seconds(1),
        tracks.iter().map(|t| t.track_id),
        None,
    );
    assert_eq!((new_count, total), (1, 2));
}
