// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Radar sweep cadence.
//!
//! The display redraws every frame but traffic only moves once per sweep.
//! [`SweepClock`] accumulates measured frame time and reports how many fixed
//! sweep intervals have elapsed, carrying the remainder forward so simulated
//! motion tracks wall-clock time at any frame rate.

use std::time::Duration;

use crate::error::ConfigError;

/// Default number of rendered frames per sweep.
pub const DEFAULT_SWEEP_FRAMES: u32 = 60;
/// Default render rate.
pub const DEFAULT_FRAME_RATE: u32 = 30;

/// Sweep interval for a sweep of `sweep_frames` frames at `frame_rate` fps.
#[must_use]
pub fn sweep_interval(sweep_frames: u32, frame_rate: u32) -> Duration {
    Duration::from_secs_f64(f64::from(sweep_frames) / f64::from(frame_rate.max(1)))
}

/// Fixed-step accumulator driving kinematic updates.
#[derive(Debug, Clone)]
pub struct SweepClock {
    interval: Duration,
    accumulated: Duration,
    frames: u64,
    sweeps: u64,
}

impl SweepClock {
    pub fn new(interval: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::InvalidSweepInterval);
        }
        Ok(Self {
            interval,
            accumulated: Duration::ZERO,
            frames: 0,
            sweeps: 0,
        })
    }

    /// Record one rendered frame that took `elapsed`, returning the number
    /// of sweeps that are now due.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        self.frames += 1;
        self.accumulated += elapsed;

        let mut due = 0;
        while self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            due += 1;
        }
        self.sweeps += u64::from(due);
        due
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated toward the next sweep.
    #[must_use]
    pub fn pending(&self) -> Duration {
        self.accumulated
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn sweeps(&self) -> u64 {
        self.sweeps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval_is_two_seconds() {
        assert_eq!(
            sweep_interval(DEFAULT_SWEEP_FRAMES, DEFAULT_FRAME_RATE),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(matches!(
            SweepClock::new(Duration::ZERO),
            Err(ConfigError::InvalidSweepInterval)
        ));
    }

    #[test]
    fn test_one_sweep_per_interval() {
        let mut clock = SweepClock::new(sweep_interval(60, 30)).unwrap();
        // Slightly over 1/30 s, as a measured frame would be
        let frame = Duration::from_nanos(33_333_334);

        let fired: u32 = (0..59).map(|_| clock.tick(frame)).sum();
        assert_eq!(fired, 0);
        assert_eq!(clock.tick(frame), 1);
        assert_eq!(clock.frames(), 60);
        assert_eq!(clock.pending(), Duration::from_nanos(40));
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut clock = SweepClock::new(Duration::from_millis(1000)).unwrap();
        assert_eq!(clock.tick(Duration::from_millis(700)), 0);
        assert_eq!(clock.tick(Duration::from_millis(700)), 1);
        assert_eq!(clock.pending(), Duration::from_millis(400));
        assert_eq!(clock.tick(Duration::from_millis(600)), 1);
        assert_eq!(clock.pending(), Duration::ZERO);
        assert_eq!(clock.sweeps(), 2);
    }

    #[test]
    fn test_long_stall_fires_every_missed_sweep() {
        let mut clock = SweepClock::new(Duration::from_millis(500)).unwrap();
        assert_eq!(clock.tick(Duration::from_millis(2250)), 4);
        assert_eq!(clock.pending(), Duration::from_millis(250));
    }

    #[test]
    fn test_sweep_count_independent_of_frame_rate() {
        for fps in [15_u64, 30, 60, 144] {
            let mut clock = SweepClock::new(Duration::from_secs(2)).unwrap();
            let frame = Duration::from_micros(1_000_000 / fps);
            let frames = fps * 10;
            let fired: u32 = (0..frames).map(|_| clock.tick(frame)).sum();
            // Integer-microsecond frames may fall just short of the last boundary
            assert!((4..=5).contains(&fired), "{fps} fps fired {fired}");
        }
    }
}
