use glam::Vec3;

use crate::primitive::PrimitiveKind;

/// Angular rate per axis in radians per second. Zero means the axis is not animated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationRates {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Whether the object's speed multiplier scales these rates
    pub scales_with_speed: bool,
}

impl RotationRates {
    pub const fn new(x: f32, y: f32, z: f32, scales_with_speed: bool) -> Self {
        Self {
            x,
            y,
            z,
            scales_with_speed,
        }
    }

    /// Multiplier actually applied for a given object speed
    pub fn effective_speed(&self, speed: f32) -> f32 {
        if self.scales_with_speed {
            speed
        } else {
            1.0
        }
    }
}

/// Base rotation of a primitive at `elapsed` seconds: `elapsed * rate * speed` per axis.
///
/// Pure in all arguments, so any frame can be replayed from the clock reading alone.
pub fn base_rotation(kind: PrimitiveKind, elapsed: f32, speed: f32) -> Vec3 {
    rotate(&kind.rotation_rates(), elapsed, speed)
}

/// Same as [`base_rotation`] for an explicit rate table
pub fn rotate(rates: &RotationRates, elapsed: f32, speed: f32) -> Vec3 {
    let speed = rates.effective_speed(speed);
    Vec3::new(
        axis_angle(elapsed, rates.x, speed),
        axis_angle(elapsed, rates.y, speed),
        axis_angle(elapsed, rates.z, speed),
    )
}

fn axis_angle(elapsed: f32, rate: f32, speed: f32) -> f32 {
    if rate == 0.0 {
        0.0
    } else {
        elapsed * rate * speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unanimated_axes_stay_zero() {
        let r = base_rotation(PrimitiveKind::Torus, 123.0, 1.0);
        assert_eq!(r.y, 0.0);
        let r = base_rotation(PrimitiveKind::Box, 123.0, 1.0);
        assert_eq!(r.z, 0.0);
        let r = base_rotation(PrimitiveKind::IcosahedronDistort, 123.0, 0.8);
        assert_eq!(r.z, 0.0);
    }

    #[test]
    fn speed_ignored_when_rates_are_fixed() {
        let slow = base_rotation(PrimitiveKind::Torus, 5.0, 0.1);
        let fast = base_rotation(PrimitiveKind::Torus, 5.0, 10.0);
        assert_eq!(slow, fast);
    }

    #[test]
    fn speed_scales_icosahedron() {
        let r = base_rotation(PrimitiveKind::IcosahedronDistort, 10.0, 0.8);
        assert_eq!(r.x, 10.0_f32 * 0.2 * 0.8);
        assert_eq!(r.y, 10.0_f32 * 0.3 * 0.8);
    }

    #[test]
    fn negative_time_is_total() {
        let r = base_rotation(PrimitiveKind::Box, -2.0, 1.0);
        assert_eq!(r.x, -2.0_f32 * 0.2);
        assert_eq!(r.y, -2.0_f32 * 0.4);
    }
}
