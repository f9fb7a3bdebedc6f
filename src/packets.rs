use crate::curve::QuadraticCurve;
use crate::models::{Config, Direction};
use euclid::default::Point2D;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Packet {
    pub spawn_index: u32,
    /// Fraction of the trip completed, independent of direction
    pub progress: f64,
    /// Curve parameter after applying the direction
    pub t: f64,
    pub position: Point2D<f64>,
}

/// Decides which packets are in flight on a frame and where they are.
///
/// Packet `i` spawns on frame `i * interval` and is visible while
/// `0 <= frame - spawn <= interval`. The window is closed at both ends, so on a handoff
/// frame the arriving packet and the departing one are both drawn.
#[derive(Debug, Clone, Copy)]
pub struct PacketScheduler {
    curve: QuadraticCurve,
    interval_frames: u32,
    direction: Direction,
}

impl PacketScheduler {
    pub fn new(curve: QuadraticCurve, interval_frames: u32, direction: Direction) -> Self {
        Self {
            curve,
            interval_frames,
            direction,
        }
    }

    pub fn from_config(curve: QuadraticCurve, config: &Config) -> Self {
        Self::new(
            curve,
            config.timeline().packet_interval_frames,
            config.direction,
        )
    }

    pub fn interval_frames(&self) -> u32 {
        self.interval_frames
    }

    /// Frames during which packet `spawn_index` is visible, inclusive.
    pub fn visible_frames(&self, spawn_index: u32) -> std::ops::RangeInclusive<u64> {
        let start = spawn_index as u64 * self.interval_frames as u64;
        start..=start + self.interval_frames as u64
    }

    pub fn active_packets_for_frame(&self, frame: u32) -> Vec<Packet> {
        let interval = self.interval_frames;
        if interval == 0 {
            return Vec::new();
        }

        let spawned = frame / interval + 1;
        (0..spawned)
            .filter_map(|i| {
                let traveled = frame as i64 - i as i64 * interval as i64;
                if !(0..=interval as i64).contains(&traveled) {
                    return None;
                }
                let progress = traveled as f64 / interval as f64;
                let t = match self.direction {
                    Direction::Ltr => progress,
                    Direction::Rtl => 1.0 - progress,
                };
                Some(Packet {
                    spawn_index: i,
                    progress,
                    t,
                    position: self.curve.evaluate(t),
                })
            })
            .collect()
    }
}
