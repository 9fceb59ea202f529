use std::f32::consts::TAU;

use glam::Vec3;

/// Coefficients of the decorative float motion layered over an object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatParams {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl FloatParams {
    pub const fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
        }
    }

    /// Time for the waveform to repeat, in seconds
    pub fn period(&self) -> f32 {
        4.0 * TAU / self.speed
    }
}

/// Float contribution for one frame: a tilt around the group origin plus a vertical lift
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatOffset {
    pub rotation: Vec3,
    pub lift: f32,
}

/// Smooth periodic wobble. `phase` decorrelates objects sharing the same coefficients.
///
/// Bounded by `rotation_intensity / 8` (x, y), `rotation_intensity / 20` (z)
/// and `float_intensity / 10` (lift).
pub fn float_offset(params: &FloatParams, elapsed: f32, phase: f32) -> FloatOffset {
    let u = (phase + elapsed) / 4.0 * params.speed;
    let (sin, cos) = u.sin_cos();

    FloatOffset {
        rotation: Vec3::new(cos / 8.0, sin / 8.0, sin / 20.0) * params.rotation_intensity,
        lift: sin / 10.0 * params.float_intensity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: FloatParams = FloatParams::new(2.0, 1.0, 2.0);

    #[test]
    fn float_offset_is_bounded() {
        for i in 0..2000 {
            let t = i as f32 * 0.05;
            let offset = float_offset(&PARAMS, t, 12.5);
            assert!(offset.rotation.x.abs() <= 1.0 / 8.0 + 1e-6);
            assert!(offset.rotation.y.abs() <= 1.0 / 8.0 + 1e-6);
            assert!(offset.rotation.z.abs() <= 1.0 / 20.0 + 1e-6);
            assert!(offset.lift.abs() <= 2.0 / 10.0 + 1e-6);
        }
    }

    #[test]
    fn float_offset_repeats_after_period() {
        let period = PARAMS.period();
        let a = float_offset(&PARAMS, 3.0, 0.0);
        let b = float_offset(&PARAMS, 3.0 + period, 0.0);
        assert!((a.rotation - b.rotation).length() < 1e-4);
        assert!((a.lift - b.lift).abs() < 1e-4);
    }

    #[test]
    fn float_offset_is_continuous() {
        let mut previous = float_offset(&PARAMS, 0.0, 0.0);
        for i in 1..1000 {
            let current = float_offset(&PARAMS, i as f32 * 0.001, 0.0);
            assert!((current.rotation - previous.rotation).length() < 1e-3);
            assert!((current.lift - previous.lift).abs() < 1e-3);
            previous = current;
        }
    }

    #[test]
    fn zero_intensity_disables_motion() {
        let still = FloatParams::new(1.5, 0.0, 0.0);
        let offset = float_offset(&still, 42.0, 7.0);
        assert_eq!(offset.rotation, Vec3::ZERO);
        assert_eq!(offset.lift, 0.0);
    }
}
