/// Frame metadata handed to every frame callback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Frames produced by the clock before this one
    pub number: u64,
    /// Seconds since the clock started
    pub time: f32,
    /// Seconds since the previous frame
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }

    /// Synthetic frame at a given elapsed time, for hosts that own their own timing
    pub fn at(time: f32) -> Self {
        Self::new(0, time, 0.0)
    }
}
