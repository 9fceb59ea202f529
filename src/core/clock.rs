use std::time::Instant;

use crate::frame::FrameInfo;

/// Monotonic frame clock owned by the host.
/// Elapsed time is measured from creation; nothing downstream can rewind it.
#[derive(Debug)]
pub struct Clock {
    start: Instant,
    last_tick: Instant,
    frame_number: u64,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            frame_number: 0,
        }
    }

    /// Seconds since the clock started, without advancing it
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }

    /// Frames handed out so far
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Advance to the next frame
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        let time = now.duration_since(self.start).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_tick = now;

        info
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Clock {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        Some(self.tick())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn clock_measures_delta() {
        let mut clock = Clock::new();

        thread::sleep(Duration::from_millis(10));
        let frame = clock.tick();

        assert!(frame.delta >= 0.009);
        assert!(frame.time >= frame.delta);
    }

    #[test]
    fn clock_time_is_monotonic() {
        let clock = Clock::new();
        let frames: Vec<FrameInfo> = clock.take(5).collect();

        for pair in frames.windows(2) {
            assert!(pair[1].time >= pair[0].time);
            assert_eq!(pair[1].number, pair[0].number + 1);
        }
    }

    #[test]
    fn elapsed_does_not_advance_frames() {
        let clock = Clock::new();
        let _ = clock.elapsed();
        assert_eq!(clock.frame_number(), 0);
    }
}
