use crate::detection::Detection;

pub struct Frame {
    pub index: u64,
    pub detections: Vec<Detection>,
}

impl Frame {
    #[inline]
    pub fn new(index: u64, detections: Vec<Detection>) -> Self {
        Self { index, detections }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Detection> {
        self.detections.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
