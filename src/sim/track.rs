//! Ground plane ring buffer.

use crate::consts;

#[derive(Debug, Clone, Copy)]
pub struct TrackSegment {
    pub z: f32,
}

/// Fixed ring of ground segments. Nothing is allocated after construction;
/// a segment that scrolls off the back relocates to the current front.
#[derive(Debug)]
pub struct TrackManager {
    segments: [TrackSegment; consts::TRACK_SEGMENTS],
}

impl Default for TrackManager {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackManager {
    pub fn new() -> Self {
        let mut track = Self {
            segments: [TrackSegment { z: 0.0 }; consts::TRACK_SEGMENTS],
        };
        track.reset();
        track
    }

    pub fn reset(&mut self) {
        for (i, segment) in self.segments.iter_mut().enumerate() {
            segment.z = i as f32 * consts::SEGMENT_LENGTH;
        }
    }

    pub fn update(&mut self, dt: f32, speed: f32) {
        let travel = speed * dt;
        let mut max_z = f32::MIN;
        for segment in &self.segments {
            max_z = max_z.max(segment.z - travel);
        }
        for segment in &mut self.segments {
            segment.z -= travel;
            if segment.z < -consts::SEGMENT_LENGTH {
                segment.z = max_z + consts::SEGMENT_LENGTH;
                // Later recycles in the same pass stack behind this one
                max_z = segment.z;
            }
        }
    }

    pub fn segments(&self) -> &[TrackSegment] {
        &self.segments
    }
}
