use serde_derive::{Deserialize, Serialize};
use std::fmt;

/// Coarse vehicle category attached to a detection.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VehicleClass {
    Car,
    Motorcycle,
    Truck,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [
        VehicleClass::Car,
        VehicleClass::Motorcycle,
        VehicleClass::Truck,
    ];

    /// Maps a COCO class id onto the vehicle vocabulary. Buses are counted
    /// as trucks.
    pub fn from_coco(class_id: i32) -> Option<Self> {
        match class_id {
            2 => Some(VehicleClass::Car),
            3 => Some(VehicleClass::Motorcycle),
            5 | 7 => Some(VehicleClass::Truck),
            _ => None,
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            VehicleClass::Car => "car",
            VehicleClass::Motorcycle => "motorcycle",
            VehicleClass::Truck => "truck",
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One slot per [`VehicleClass`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PerClass<T> {
    pub car: T,
    pub motorcycle: T,
    pub truck: T,
}

pub type ClassCounts = PerClass<usize>;

impl<T> PerClass<T> {
    #[inline]
    pub fn get(&self, class: VehicleClass) -> &T {
        match class {
            VehicleClass::Car => &self.car,
            VehicleClass::Motorcycle => &self.motorcycle,
            VehicleClass::Truck => &self.truck,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, class: VehicleClass) -> &mut T {
        match class {
            VehicleClass::Car => &mut self.car,
            VehicleClass::Motorcycle => &mut self.motorcycle,
            VehicleClass::Truck => &mut self.truck,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (VehicleClass, &T)> {
        VehicleClass::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

impl ClassCounts {
    #[inline]
    pub fn total(&self) -> usize {
        self.car + self.motorcycle + self.truck
    }
}
